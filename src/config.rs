use serde::Deserialize;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// PostgreSQL database connection URL; in-memory storage when unset
    #[serde(default)]
    pub database_url: Option<String>,

    /// Redis connection URL for the embedding cache; no caching when unset
    #[serde(default)]
    pub redis_url: Option<String>,

    /// Cohere API key
    pub cohere_api_key: String,

    /// Cohere API base URL
    #[serde(default = "default_cohere_api_url")]
    pub cohere_api_url: String,

    /// Embedding model used for both query and document vectors
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,

    /// Upper bound on the combined embedding round trip
    #[serde(default = "default_embed_timeout_secs")]
    pub embed_timeout_secs: u64,

    /// Number of matches returned by a recommendation
    #[serde(default = "default_max_matches")]
    pub max_matches: usize,

    /// TTL for cached embeddings, in seconds
    #[serde(default = "default_embedding_cache_ttl")]
    pub embedding_cache_ttl: u64,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed CORS origin for the web client
    #[serde(default)]
    pub frontend_url: Option<String>,

    /// Insert the standard job postings when the job table is empty
    #[serde(default)]
    pub seed_jobs: bool,
}

fn default_cohere_api_url() -> String {
    "https://api.cohere.com".to_string()
}

fn default_embedding_model() -> String {
    "embed-english-v3.0".to_string()
}

fn default_embed_timeout_secs() -> u64 {
    10
}

fn default_max_matches() -> usize {
    3
}

fn default_embedding_cache_ttl() -> u64 {
    604800 // 1 week
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn embed_timeout(&self) -> Duration {
        Duration::from_secs(self.embed_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied() {
        let vars = vec![("COHERE_API_KEY".to_string(), "key".to_string())];
        let config: Config = envy::from_iter(vars).unwrap();

        assert_eq!(config.cohere_api_key, "key");
        assert_eq!(config.embedding_model, "embed-english-v3.0");
        assert_eq!(config.max_matches, 3);
        assert_eq!(config.port, 5000);
        assert_eq!(config.embed_timeout(), Duration::from_secs(10));
        assert!(config.database_url.is_none());
        assert!(config.redis_url.is_none());
        assert!(!config.seed_jobs);
    }

    #[test]
    fn test_missing_api_key_fails() {
        let vars: Vec<(String, String)> = vec![("PORT".to_string(), "8080".to_string())];
        let result = envy::from_iter::<_, Config>(vars);
        assert!(result.is_err());
    }

    #[test]
    fn test_overrides() {
        let vars = vec![
            ("COHERE_API_KEY".to_string(), "key".to_string()),
            ("MAX_MATCHES".to_string(), "5".to_string()),
            ("SEED_JOBS".to_string(), "true".to_string()),
            ("FRONTEND_URL".to_string(), "http://localhost:5173".to_string()),
        ];
        let config: Config = envy::from_iter(vars).unwrap();

        assert_eq!(config.max_matches, 5);
        assert!(config.seed_jobs);
        assert_eq!(config.frontend_url.as_deref(), Some("http://localhost:5173"));
    }
}
