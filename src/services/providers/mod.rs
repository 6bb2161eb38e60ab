/// Text embedding provider abstraction
///
/// The recommendation engine depends only on this trait. A hosted provider
/// (Cohere) and a caching decorator implement it; tests substitute stubs.
use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::error::AppResult;

pub mod cached;
pub mod cohere;

pub use cached::CachedEmbeddingProvider;
pub use cohere::CohereProvider;

/// One fixed-length float vector per input text
pub type Embedding = Vec<f32>;

/// Which side of an asymmetric search a text belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputType {
    SearchQuery,
    SearchDocument,
}

impl InputType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputType::SearchQuery => "search_query",
            InputType::SearchDocument => "search_document",
        }
    }
}

impl Display for InputType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trait for embedding providers
///
/// Implementations must return exactly one vector per input, in input order,
/// or fail with `ExternalService`. Vectors are only comparable when produced
/// by the same model; callers must use one model id per comparison.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed `texts` with `model`
    async fn embed(
        &self,
        model: &str,
        input_type: InputType,
        texts: &[String],
    ) -> AppResult<Vec<Embedding>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
