use serde::{Deserialize, Serialize};

use super::defaults;

/// Embedding subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Primary provider: "api" or "tfidf".
    pub provider: String,
    pub dimensions: usize,
    /// OpenAI-compatible embeddings endpoint, required for "api".
    pub api_endpoint: Option<String>,
    pub api_model: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    /// Append the TF-IDF provider as a last-resort fallback.
    pub fallback_to_tfidf: bool,
    /// Reject vectors whose length differs from `dimensions`.
    pub validate_dimensions: bool,
    pub l1_cache_size: u64,
    pub cache_ttl_secs: u64,
    pub request_timeout_secs: u64,
    pub max_retries: u32,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: defaults::DEFAULT_EMBEDDING_PROVIDER.to_string(),
            dimensions: defaults::DEFAULT_EMBEDDING_DIMENSIONS,
            api_endpoint: None,
            api_model: defaults::DEFAULT_EMBEDDING_MODEL.to_string(),
            api_key_env: defaults::DEFAULT_EMBEDDING_API_KEY_ENV.to_string(),
            fallback_to_tfidf: false,
            validate_dimensions: true,
            l1_cache_size: defaults::DEFAULT_EMBEDDING_CACHE_SIZE,
            cache_ttl_secs: defaults::DEFAULT_EMBEDDING_CACHE_TTL_SECS,
            request_timeout_secs: defaults::DEFAULT_EMBEDDING_REQUEST_TIMEOUT_SECS,
            max_retries: defaults::DEFAULT_EMBEDDING_MAX_RETRIES,
        }
    }
}
