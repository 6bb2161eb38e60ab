//! Cohere embed API provider
//!
//! Calls `POST /v2/embed` with float embeddings. Query and document texts are
//! embedded with different `input_type`s, which Cohere's v3 models require
//! for asymmetric search.
use std::time::Duration;

use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    services::providers::{Embedding, EmbeddingProvider, InputType},
};

const EMBED_PATH: &str = "/v2/embed";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
/// Cohere rejects requests carrying more texts than this
pub const MAX_TEXTS_PER_REQUEST: usize = 96;

#[derive(Debug, Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input_type: InputType,
    embedding_types: [&'static str; 1],
    texts: &'a [String],
}

#[derive(Debug, Deserialize)]
struct EmbedResponse {
    embeddings: EmbeddingsByType,
}

#[derive(Debug, Deserialize)]
struct EmbeddingsByType {
    #[serde(default)]
    float: Option<Vec<Embedding>>,
}

#[derive(Clone)]
pub struct CohereProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl CohereProvider {
    pub fn new(api_key: String, api_url: String) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    /// Extracts float vectors from a raw response body and checks the count
    fn parse_response(body: &str, expected: usize) -> AppResult<Vec<Embedding>> {
        let response: EmbedResponse = serde_json::from_str(body).map_err(|e| {
            tracing::error!(error = %e, "Failed to deserialize Cohere response");
            AppError::ExternalService(format!("Failed to parse Cohere response: {}", e))
        })?;

        let vectors = response.embeddings.float.ok_or_else(|| {
            AppError::ExternalService("Cohere response missing float embeddings".to_string())
        })?;

        if vectors.len() != expected {
            return Err(AppError::ExternalService(format!(
                "Cohere returned {} embeddings for {} inputs",
                vectors.len(),
                expected
            )));
        }

        Ok(vectors)
    }
}

impl CohereProvider {
    /// Sends one `/v2/embed` request; `texts` must fit in a single request
    async fn embed_batch(
        &self,
        model: &str,
        input_type: InputType,
        texts: &[String],
    ) -> AppResult<Vec<Embedding>> {
        let url = format!("{}{}", self.api_url, EMBED_PATH);
        let request = EmbedRequest {
            model,
            input_type,
            embedding_types: ["float"],
            texts,
        };

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("Cohere request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "Cohere API error response");
            return Err(AppError::ExternalService(format!(
                "Cohere API returned status {}",
                status
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AppError::ExternalService(format!("Cohere response unreadable: {}", e)))?;

        Self::parse_response(&body, texts.len())
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for CohereProvider {
    /// Embeds `texts` in input order, split into as many requests as needed
    async fn embed(
        &self,
        model: &str,
        input_type: InputType,
        texts: &[String],
    ) -> AppResult<Vec<Embedding>> {
        let mut vectors = Vec::with_capacity(texts.len());

        for batch in texts.chunks(MAX_TEXTS_PER_REQUEST) {
            vectors.extend(self.embed_batch(model, input_type, batch).await?);
        }

        tracing::debug!(
            model = %model,
            input_type = %input_type,
            inputs = texts.len(),
            requests = texts.len().div_ceil(MAX_TEXTS_PER_REQUEST),
            dimensions = vectors.first().map(Vec::len).unwrap_or(0),
            provider = "cohere",
            "Embeddings fetched"
        );

        Ok(vectors)
    }

    fn name(&self) -> &'static str {
        "cohere"
    }
}
