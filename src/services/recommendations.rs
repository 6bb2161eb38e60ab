use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::instrument;

use crate::{
    error::{AppError, AppResult},
    models::{Job, Recommendation, ScoredMatch, UserProfile},
    services::{
        providers::{Embedding, EmbeddingProvider, InputType},
        similarity::cosine_similarity,
        skills::SynonymTable,
        synthesis,
    },
};

pub const DEFAULT_MAX_MATCHES: usize = 3;
pub const DEFAULT_EMBED_TIMEOUT: Duration = Duration::from_secs(10);

/// Ranks job postings against a requester's profile by embedding similarity
///
/// Stateless per call: profile → skill expansion → text synthesis →
/// embeddings (query and documents fetched concurrently) → cosine scoring →
/// descending sort → top N. Any failure aborts the call; there is no
/// partial result.
#[derive(Clone)]
pub struct Recommender {
    provider: Arc<dyn EmbeddingProvider>,
    synonyms: SynonymTable,
    /// Used for both query and document embeddings so vectors are comparable
    model: String,
    timeout: Duration,
    max_matches: usize,
}

impl Recommender {
    pub fn new(provider: Arc<dyn EmbeddingProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            synonyms: SynonymTable::default(),
            model: model.into(),
            timeout: DEFAULT_EMBED_TIMEOUT,
            max_matches: DEFAULT_MAX_MATCHES,
        }
    }

    /// Bounds the combined embedding round trip
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_matches(mut self, max_matches: usize) -> Self {
        self.max_matches = max_matches;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Checks the requester can be recommended for, returning the profile
    /// and its experience
    ///
    /// No profile is `Unauthorized`. Missing skills or experience is
    /// `MissingAttribute`. Callers run this before loading the job pool.
    pub fn validate(profile: Option<&UserProfile>) -> AppResult<(&UserProfile, f64)> {
        let profile = profile.ok_or(AppError::Unauthorized)?;
        let experience = required_experience(profile)?;
        Ok((profile, experience))
    }

    /// Recommends the best-matching postings from `jobs` for `profile`
    ///
    /// Preconditions are checked before any embedding request is issued:
    /// see [`Recommender::validate`]; an empty pool is `EmptyPool`.
    #[instrument(skip_all, fields(pool_size = jobs.len(), model = %self.model))]
    pub async fn recommend(
        &self,
        profile: Option<&UserProfile>,
        jobs: Vec<Job>,
    ) -> AppResult<Recommendation> {
        let (profile, experience) = Self::validate(profile)?;

        if jobs.is_empty() {
            return Err(AppError::EmptyPool);
        }

        let expanded_skills = self.synonyms.expand(&profile.skills);
        let query = synthesis::query_text(&expanded_skills, experience, profile.job_type.as_deref());
        let documents: Vec<String> = jobs.iter().map(synthesis::job_text).collect();

        tracing::debug!(
            skills = profile.skills.len(),
            expanded_skills = expanded_skills.len(),
            query = %query,
            "Synthesized recommendation inputs"
        );

        let (query_vector, job_vectors) = self.acquire_embeddings(query, &documents).await?;
        let matches = rank(jobs, &query_vector, &job_vectors, self.max_matches)?;

        tracing::info!(
            requester_id = %profile.id,
            matches = matches.len(),
            top_score = matches.first().map(|m| m.score),
            "Recommendation ranked"
        );

        Ok(Recommendation {
            requester_id: profile.id,
            candidate: profile.username.clone(),
            matches,
        })
    }

    /// Fetches the query vector and one vector per document, concurrently
    ///
    /// Both requests share one deadline. If either fails or the deadline
    /// passes, the other is dropped along with it.
    async fn acquire_embeddings(
        &self,
        query: String,
        documents: &[String],
    ) -> AppResult<(Embedding, Vec<Embedding>)> {
        let query_texts = [query];
        let start = Instant::now();

        let joined = tokio::time::timeout(self.timeout, async {
            tokio::try_join!(
                self.provider
                    .embed(&self.model, InputType::SearchQuery, &query_texts),
                self.provider
                    .embed(&self.model, InputType::SearchDocument, documents),
            )
        })
        .await
        .map_err(|_| {
            AppError::ExternalService(format!(
                "{} embedding requests timed out after {:?}",
                self.provider.name(),
                self.timeout
            ))
        })?;

        let (mut query_vectors, document_vectors) = joined?;

        tracing::info!(
            provider = self.provider.name(),
            documents = documents.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Embeddings acquired"
        );

        if query_vectors.len() != 1 {
            return Err(AppError::ExternalService(format!(
                "expected 1 query embedding, got {}",
                query_vectors.len()
            )));
        }

        // A short or long batch would shift every score onto the wrong posting
        if document_vectors.len() != documents.len() {
            return Err(AppError::ExternalService(format!(
                "expected {} document embeddings, got {}",
                documents.len(),
                document_vectors.len()
            )));
        }

        Ok((query_vectors.swap_remove(0), document_vectors))
    }
}

/// Checks the profile carries what a recommendation needs
fn required_experience(profile: &UserProfile) -> AppResult<f64> {
    if profile.skills.is_empty() {
        return Err(AppError::MissingAttribute(
            "Missing user skills for recommendation".to_string(),
        ));
    }

    match profile.experience {
        Some(years) if years.is_finite() && years >= 0.0 => Ok(years),
        Some(_) => Err(AppError::MissingAttribute(
            "User experience must be a non-negative number".to_string(),
        )),
        None => Err(AppError::MissingAttribute(
            "Missing user experience for recommendation".to_string(),
        )),
    }
}

/// Scores `jobs[i]` against `job_vectors[i]`, sorts descending, keeps `limit`
///
/// The sort is stable: tied postings keep their pool order.
pub fn rank(
    jobs: Vec<Job>,
    query_vector: &[f32],
    job_vectors: &[Embedding],
    limit: usize,
) -> AppResult<Vec<ScoredMatch>> {
    if jobs.len() != job_vectors.len() {
        return Err(AppError::InvalidArgument(format!(
            "{} postings but {} vectors",
            jobs.len(),
            job_vectors.len()
        )));
    }

    let mut scored = jobs
        .into_iter()
        .zip(job_vectors)
        .map(|(job, vector)| {
            let score = cosine_similarity(query_vector, vector)?;
            Ok(ScoredMatch { job, score })
        })
        .collect::<AppResult<Vec<_>>>()?;

    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(limit);

    Ok(scored)
}
