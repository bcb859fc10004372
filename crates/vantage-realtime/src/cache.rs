//! Short-TTL cache of live-source responses.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use vantage_core::models::LiveItem;

#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub key: String,
    pub payload: Vec<LiveItem>,
    pub timestamp: DateTime<Utc>,
}

/// Response cache keyed by (source, query).
///
/// Entries are served while younger than the freshness window. Stale
/// entries are dropped when read; [`FetchCache::sweep_expired`] removes
/// anything older than the eviction age.
pub struct FetchCache {
    freshness: Duration,
    eviction: Duration,
    entries: DashMap<String, CacheEntry>,
}

impl FetchCache {
    pub fn new(freshness: std::time::Duration, eviction: std::time::Duration) -> Self {
        Self {
            freshness: Duration::from_std(freshness).unwrap_or(Duration::minutes(5)),
            eviction: Duration::from_std(eviction).unwrap_or(Duration::minutes(10)),
            entries: DashMap::new(),
        }
    }

    pub fn key(source: &str, query: &str) -> String {
        format!("{source}:{}", query.trim().to_lowercase())
    }

    pub fn get(&self, key: &str) -> Option<Vec<LiveItem>> {
        self.get_at(key, Utc::now())
    }

    pub fn get_at(&self, key: &str, now: DateTime<Utc>) -> Option<Vec<LiveItem>> {
        if let Some(entry) = self.entries.get(key) {
            if now - entry.timestamp < self.freshness {
                return Some(entry.payload.clone());
            }
        } else {
            return None;
        }
        self.entries
            .remove_if(key, |_, entry| now - entry.timestamp >= self.freshness);
        None
    }

    pub fn put(&self, key: String, payload: Vec<LiveItem>) {
        self.put_at(key, payload, Utc::now());
    }

    pub fn put_at(&self, key: String, payload: Vec<LiveItem>, now: DateTime<Utc>) {
        self.entries.insert(
            key.clone(),
            CacheEntry {
                key,
                payload,
                timestamp: now,
            },
        );
    }

    /// Remove entries older than the eviction age. Returns how many went.
    pub fn sweep_expired(&self) -> usize {
        self.sweep_expired_at(Utc::now())
    }

    pub fn sweep_expired_at(&self, now: DateTime<Utc>) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| now - entry.timestamp < self.eviction);
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache() -> FetchCache {
        FetchCache::new(
            std::time::Duration::from_secs(300),
            std::time::Duration::from_secs(600),
        )
    }

    fn item(id: &str) -> LiveItem {
        LiveItem {
            id: id.to_string(),
            title: String::new(),
            content: format!("content {id}"),
            source: "test".to_string(),
            timestamp: None,
            relevance: None,
            metadata: Default::default(),
        }
    }

    #[test]
    fn fresh_entry_is_served() {
        let cache = cache();
        let now = Utc::now();
        let key = FetchCache::key("feed", "  AI Funding ");
        assert_eq!(key, "feed:ai funding");
        cache.put_at(key.clone(), vec![item("a")], now);
        let hit = cache.get_at(&key, now + Duration::seconds(299)).unwrap();
        assert_eq!(hit[0].id, "a");
    }

    #[test]
    fn stale_entry_is_dropped_on_read() {
        let cache = cache();
        let now = Utc::now();
        cache.put_at("k".to_string(), vec![item("a")], now);
        assert!(cache.get_at("k", now + Duration::seconds(300)).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn sweep_removes_only_expired() {
        let cache = cache();
        let now = Utc::now();
        cache.put_at("old".to_string(), vec![], now - Duration::minutes(11));
        cache.put_at("young".to_string(), vec![], now - Duration::minutes(2));
        assert_eq!(cache.sweep_expired_at(now), 1);
        assert_eq!(cache.len(), 1);
    }
}
