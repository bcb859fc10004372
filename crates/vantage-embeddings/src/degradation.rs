//! Fallback chain for embedding generation.
//!
//! Providers are tried in order; every fallback past the primary is
//! recorded as a [`DegradationEvent`].

use std::sync::{Arc, Mutex};

use chrono::Utc;
use tracing::warn;
use vantage_core::errors::{EmbeddingError, VantageResult};
use vantage_core::models::DegradationEvent;
use vantage_core::traits::IEmbeddingProvider;

/// Ordered embedding providers with degradation tracking.
#[derive(Default)]
pub struct DegradationChain {
    chain: Vec<Arc<dyn IEmbeddingProvider>>,
    events: Mutex<Vec<DegradationEvent>>,
}

impl DegradationChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a provider to the end of the chain.
    pub fn push(&mut self, provider: Arc<dyn IEmbeddingProvider>) {
        self.chain.push(provider);
    }

    /// Embed `text` with the first provider that succeeds.
    ///
    /// Returns the vector and the name of the provider that produced it.
    pub async fn embed(&self, text: &str) -> VantageResult<(Vec<f32>, String)> {
        let mut last_error = None;

        for (i, provider) in self.chain.iter().enumerate() {
            if !provider.is_available() {
                continue;
            }

            match provider.embed(text).await {
                Ok(vec) => {
                    if i > 0 {
                        self.record_fallback(provider.name());
                    }
                    return Ok((vec, provider.name().to_string()));
                }
                Err(e) => {
                    warn!(
                        provider = provider.name(),
                        error = %e,
                        "provider failed, trying next in chain"
                    );
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            EmbeddingError::ProviderUnavailable {
                provider: "all providers exhausted".to_string(),
            }
            .into()
        }))
    }

    /// Batch variant of [`DegradationChain::embed`].
    pub async fn embed_batch(&self, texts: &[String]) -> VantageResult<(Vec<Vec<f32>>, String)> {
        let mut last_error = None;

        for (i, provider) in self.chain.iter().enumerate() {
            if !provider.is_available() {
                continue;
            }

            match provider.embed_batch(texts).await {
                Ok(vecs) => {
                    if i > 0 {
                        self.record_fallback(provider.name());
                    }
                    return Ok((vecs, provider.name().to_string()));
                }
                Err(e) => {
                    warn!(
                        provider = provider.name(),
                        error = %e,
                        "batch embed failed, trying next in chain"
                    );
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            EmbeddingError::ProviderUnavailable {
                provider: "all providers exhausted".to_string(),
            }
            .into()
        }))
    }

    fn record_fallback(&self, fallback: &str) {
        let primary = self.chain.first().map(|p| p.name()).unwrap_or("unknown");
        let event = DegradationEvent {
            component: "embeddings".to_string(),
            failure: format!("{primary} unavailable"),
            fallback_used: fallback.to_string(),
            timestamp: Utc::now(),
        };
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(event);
    }

    /// Name of the first available provider.
    pub fn active_provider_name(&self) -> &str {
        self.chain
            .iter()
            .find(|p| p.is_available())
            .map(|p| p.name())
            .unwrap_or("none")
    }

    /// Whether any provider in the chain can currently serve.
    pub fn is_available(&self) -> bool {
        self.chain.iter().any(|p| p.is_available())
    }

    /// Drain accumulated degradation events.
    pub fn drain_events(&self) -> Vec<DegradationEvent> {
        std::mem::take(
            &mut *self
                .events
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner()),
        )
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }
}
