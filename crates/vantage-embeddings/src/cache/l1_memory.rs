//! L1 in-memory cache using moka.
//!
//! TinyLFU admission, bounded entry count, per-entry TTL.

use std::sync::Arc;
use std::time::Duration;

use moka::sync::Cache;

/// Upper bound on either cache lifetime; moka rejects absurd durations.
const MAX_LIFETIME: Duration = Duration::from_secs(365 * 24 * 3_600);

/// A cached vector together with the provider that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedEmbedding {
    pub vector: Vec<f32>,
    pub provider: String,
}

/// L1 in-memory embedding cache.
///
/// Keys are blake3 hashes of the embedded text.
#[derive(Clone)]
pub struct L1MemoryCache {
    cache: Cache<String, Arc<CachedEmbedding>>,
}

impl L1MemoryCache {
    pub fn new(max_entries: u64, ttl: Duration) -> Self {
        let idle = ttl.min(MAX_LIFETIME);
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .time_to_idle(idle)
            .time_to_live(idle.saturating_mul(4).min(MAX_LIFETIME))
            .build();

        Self { cache }
    }

    /// Cache key for a piece of text.
    pub fn key_for(text: &str) -> String {
        blake3::hash(text.as_bytes()).to_hex().to_string()
    }

    pub fn get(&self, key: &str) -> Option<Arc<CachedEmbedding>> {
        self.cache.get(key)
    }

    pub fn insert(&self, key: String, embedding: CachedEmbedding) {
        self.cache.insert(key, Arc::new(embedding));
    }

    /// Approximate entry count. moka applies writes lazily.
    pub fn len(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.cache.invalidate_all();
    }
}
