/// Redis-backed caching decorator for any embedding provider
///
/// Job descriptions rarely change between requests, so document embeddings
/// are reused across recommendations. Only cache misses reach the inner
/// provider, in a single batch that preserves input order.
use std::sync::Arc;

use crate::{
    db::{Cache, CacheKey},
    error::{AppError, AppResult},
    services::providers::{Embedding, EmbeddingProvider, InputType},
};

#[derive(Clone)]
pub struct CachedEmbeddingProvider {
    inner: Arc<dyn EmbeddingProvider>,
    cache: Cache,
    ttl: u64,
}

impl CachedEmbeddingProvider {
    pub fn new(inner: Arc<dyn EmbeddingProvider>, cache: Cache, ttl: u64) -> Self {
        Self { inner, cache, ttl }
    }

    /// Cached vectors per text; a failed lookup counts as all misses
    async fn lookup(&self, keys: &[CacheKey]) -> Vec<Option<Embedding>> {
        match self.cache.get_many::<Embedding>(keys).await {
            Ok(values) if values.len() == keys.len() => values,
            Ok(values) => {
                tracing::warn!(
                    expected = keys.len(),
                    returned = values.len(),
                    "Embedding cache returned wrong number of slots"
                );
                vec![None; keys.len()]
            }
            Err(e) => {
                tracing::warn!(error = %e, "Embedding cache lookup failed, treating as miss");
                vec![None; keys.len()]
            }
        }
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for CachedEmbeddingProvider {
    async fn embed(
        &self,
        model: &str,
        input_type: InputType,
        texts: &[String],
    ) -> AppResult<Vec<Embedding>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let keys: Vec<CacheKey> = texts
            .iter()
            .map(|text| CacheKey::Embedding {
                model: model.to_string(),
                input_type,
                text: text.clone(),
            })
            .collect();

        let mut slots = self.lookup(&keys).await;

        let misses: Vec<usize> = slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_none())
            .map(|(i, _)| i)
            .collect();

        tracing::debug!(
            input_type = %input_type,
            inputs = texts.len(),
            hits = texts.len() - misses.len(),
            provider = self.inner.name(),
            "Embedding cache lookup"
        );

        if !misses.is_empty() {
            let miss_texts: Vec<String> = misses.iter().map(|&i| texts[i].clone()).collect();
            let fresh = self.inner.embed(model, input_type, &miss_texts).await?;

            if fresh.len() != miss_texts.len() {
                return Err(AppError::ExternalService(format!(
                    "{} returned {} embeddings for {} inputs",
                    self.inner.name(),
                    fresh.len(),
                    miss_texts.len()
                )));
            }

            for (index, vector) in misses.into_iter().zip(fresh) {
                self.cache.set_in_background(&keys[index], &vector, self.ttl);
                slots[index] = Some(vector);
            }
        }

        slots
            .into_iter()
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| AppError::Internal("Embedding slot left unfilled".to_string()))
    }

    fn name(&self) -> &'static str {
        "cached"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_redis_client;
    use crate::services::providers::MockEmbeddingProvider;

    // Nothing listens on port 1, so every lookup degrades to a miss
    fn unreachable_cache() -> Cache {
        let client = create_redis_client("redis://127.0.0.1:1").unwrap();
        Cache::new(client).0
    }

    fn texts(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_cache_outage_falls_through_to_inner() {
        let mut inner = MockEmbeddingProvider::new();
        inner.expect_name().return_const("mock");
        inner
            .expect_embed()
            .times(1)
            .returning(|_, _, texts| Ok(texts.iter().map(|_| vec![1.0, 0.0]).collect()));

        let provider = CachedEmbeddingProvider::new(Arc::new(inner), unreachable_cache(), 60);
        let vectors = provider
            .embed("model", InputType::SearchDocument, &texts(&["a", "b", "c"]))
            .await
            .unwrap();

        assert_eq!(vectors.len(), 3);
    }

    #[tokio::test]
    async fn test_inner_count_mismatch_is_external_error() {
        let mut inner = MockEmbeddingProvider::new();
        inner.expect_name().return_const("mock");
        inner
            .expect_embed()
            .times(1)
            .returning(|_, _, _| Ok(vec![vec![1.0], vec![0.5]]));

        let provider = CachedEmbeddingProvider::new(Arc::new(inner), unreachable_cache(), 60);
        let err = provider
            .embed("model", InputType::SearchDocument, &texts(&["a", "b", "c"]))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::ExternalService(_)));
    }

    #[tokio::test]
    async fn test_empty_input_never_calls_inner() {
        let mut inner = MockEmbeddingProvider::new();
        inner.expect_embed().times(0);

        let provider = CachedEmbeddingProvider::new(Arc::new(inner), unreachable_cache(), 60);
        let vectors = provider
            .embed("model", InputType::SearchQuery, &[])
            .await
            .unwrap();

        assert!(vectors.is_empty());
    }
}
