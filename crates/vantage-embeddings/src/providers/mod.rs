//! Embedding providers and the config-driven factory.

pub mod api_provider;
pub mod tfidf_fallback;

use std::sync::Arc;
use std::time::Duration;

use vantage_core::config::EmbeddingConfig;
use vantage_core::errors::{VantageError, VantageResult};
use vantage_core::traits::IEmbeddingProvider;

pub use api_provider::ApiProvider;
pub use tfidf_fallback::TfIdfFallback;

/// Build the ordered provider list described by `config`.
pub fn create_chain(config: &EmbeddingConfig) -> VantageResult<Vec<Arc<dyn IEmbeddingProvider>>> {
    let mut providers: Vec<Arc<dyn IEmbeddingProvider>> = Vec::new();

    match config.provider.as_str() {
        "tfidf" => providers.push(Arc::new(TfIdfFallback::new(config.dimensions))),
        "api" => {
            let endpoint = config
                .api_endpoint
                .clone()
                .filter(|e| !e.is_empty())
                .ok_or_else(|| {
                    VantageError::configuration("embedding", "api provider requires api_endpoint")
                })?;
            let api_key = std::env::var(&config.api_key_env).ok();
            let provider = ApiProvider::new(
                endpoint,
                config.api_model.clone(),
                api_key,
                config.dimensions,
                Duration::from_secs(config.request_timeout_secs),
            )?
            .with_max_retries(config.max_retries);
            providers.push(Arc::new(provider));
            if config.fallback_to_tfidf {
                providers.push(Arc::new(TfIdfFallback::new(config.dimensions)));
            }
        }
        other => {
            return Err(VantageError::configuration(
                "embedding",
                format!("unknown provider {other:?}"),
            ));
        }
    }

    Ok(providers)
}
