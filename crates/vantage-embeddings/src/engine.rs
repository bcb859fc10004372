//! EmbeddingEngine: the entry point for query embedding.
//!
//! Coordinates the provider fallback chain, the L1 cache and dimension
//! validation. Implements `IEmbeddingProvider`.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info};
use vantage_core::config::EmbeddingConfig;
use vantage_core::errors::{EmbeddingError, VantageResult};
use vantage_core::models::DegradationEvent;
use vantage_core::traits::IEmbeddingProvider;

use crate::cache::{CachedEmbedding, L1MemoryCache};
use crate::degradation::DegradationChain;
use crate::providers;

/// A query vector and where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryEmbedding {
    pub vector: Vec<f32>,
    pub provider: String,
    pub cached: bool,
}

pub struct EmbeddingEngine {
    chain: DegradationChain,
    cache: L1MemoryCache,
    config: EmbeddingConfig,
}

impl EmbeddingEngine {
    /// Build the engine from configuration.
    pub fn new(config: EmbeddingConfig) -> VantageResult<Self> {
        let providers = providers::create_chain(&config)?;
        Ok(Self::with_providers(providers, config))
    }

    /// Build the engine around caller-supplied providers, in priority order.
    pub fn with_providers(
        providers: Vec<Arc<dyn IEmbeddingProvider>>,
        config: EmbeddingConfig,
    ) -> Self {
        let mut chain = DegradationChain::new();
        for provider in providers {
            chain.push(provider);
        }
        let cache = L1MemoryCache::new(
            config.l1_cache_size,
            Duration::from_secs(config.cache_ttl_secs.max(1)),
        );

        info!(
            provider = chain.active_provider_name(),
            providers = chain.len(),
            dims = config.dimensions,
            "EmbeddingEngine initialized"
        );

        Self {
            chain,
            cache,
            config,
        }
    }

    /// Wrap a single provider, taking the expected dimensions from it.
    pub fn from_provider(provider: Arc<dyn IEmbeddingProvider>) -> Self {
        let config = EmbeddingConfig {
            dimensions: provider.dimensions(),
            ..EmbeddingConfig::default()
        };
        Self::with_providers(vec![provider], config)
    }

    /// Embed a query string, consulting the cache first.
    pub async fn embed_query(&self, query: &str) -> VantageResult<QueryEmbedding> {
        let key = L1MemoryCache::key_for(query);
        if let Some(hit) = self.cache.get(&key) {
            debug!(provider = %hit.provider, "embedding cache hit");
            return Ok(QueryEmbedding {
                vector: hit.vector.clone(),
                provider: hit.provider.clone(),
                cached: true,
            });
        }

        let (vector, provider) = self.chain.embed(query).await?;
        self.validate_dimensions(&vector)?;

        self.cache.insert(
            key,
            CachedEmbedding {
                vector: vector.clone(),
                provider: provider.clone(),
            },
        );
        Ok(QueryEmbedding {
            vector,
            provider,
            cached: false,
        })
    }

    fn validate_dimensions(&self, vector: &[f32]) -> Result<(), EmbeddingError> {
        if self.config.validate_dimensions && vector.len() != self.config.dimensions {
            return Err(EmbeddingError::DimensionMismatch {
                expected: self.config.dimensions,
                actual: vector.len(),
            });
        }
        Ok(())
    }

    pub fn drain_degradation_events(&self) -> Vec<DegradationEvent> {
        self.chain.drain_events()
    }

    pub fn active_provider(&self) -> &str {
        self.chain.active_provider_name()
    }

    pub fn dimensions(&self) -> usize {
        self.config.dimensions
    }

    pub fn cache(&self) -> &L1MemoryCache {
        &self.cache
    }
}

#[async_trait]
impl IEmbeddingProvider for EmbeddingEngine {
    async fn embed(&self, text: &str) -> VantageResult<Vec<f32>> {
        Ok(self.embed_query(text).await?.vector)
    }

    async fn embed_batch(&self, texts: &[String]) -> VantageResult<Vec<Vec<f32>>> {
        let (vectors, _) = self.chain.embed_batch(texts).await?;
        for v in &vectors {
            self.validate_dimensions(v)?;
        }
        Ok(vectors)
    }

    fn dimensions(&self) -> usize {
        self.config.dimensions
    }

    fn name(&self) -> &str {
        "vantage-embedding-engine"
    }

    fn is_available(&self) -> bool {
        self.chain.is_available()
    }
}
