//! Per-source fixed-window quotas.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use serde::Serialize;

/// Outbound-call counter for one source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RateCounter {
    pub source_name: String,
    pub count: u32,
    pub window_start: DateTime<Utc>,
}

impl RateCounter {
    fn new(source_name: &str, now: DateTime<Utc>) -> Self {
        Self {
            source_name: source_name.to_string(),
            count: 0,
            window_start: now,
        }
    }

    fn roll(&mut self, now: DateTime<Utc>, window: Duration) {
        if now - self.window_start >= window {
            self.count = 0;
            self.window_start = now;
        }
    }
}

/// Fixed-window rate limiter keyed by source name.
///
/// Acquisition is a check-and-increment under the map's shard lock, so two
/// concurrent requests can never both take the last slot.
pub struct RateLimiter {
    window: Duration,
    counters: DashMap<String, RateCounter>,
}

impl RateLimiter {
    pub fn new(window: std::time::Duration) -> Self {
        Self {
            window: Duration::from_std(window).unwrap_or(Duration::hours(1)),
            counters: DashMap::new(),
        }
    }

    /// Whether `source` has quota left, without consuming any.
    pub fn has_capacity(&self, source: &str, quota: u32) -> bool {
        self.has_capacity_at(source, quota, Utc::now())
    }

    pub fn has_capacity_at(&self, source: &str, quota: u32, now: DateTime<Utc>) -> bool {
        match self.counters.get_mut(source) {
            Some(mut counter) => {
                counter.roll(now, self.window);
                counter.count < quota
            }
            None => quota > 0,
        }
    }

    /// Consume one slot. Returns `false` when the quota is exhausted.
    pub fn try_acquire(&self, source: &str, quota: u32) -> bool {
        self.try_acquire_at(source, quota, Utc::now())
    }

    pub fn try_acquire_at(&self, source: &str, quota: u32, now: DateTime<Utc>) -> bool {
        let mut counter = self
            .counters
            .entry(source.to_string())
            .or_insert_with(|| RateCounter::new(source, now));
        counter.roll(now, self.window);
        if counter.count >= quota {
            return false;
        }
        counter.count += 1;
        true
    }

    /// Copy of every counter, ordered by source name.
    pub fn snapshot(&self) -> Vec<RateCounter> {
        let mut counters: Vec<RateCounter> =
            self.counters.iter().map(|r| r.value().clone()).collect();
        counters.sort_by(|a, b| a.source_name.cmp(&b.source_name));
        counters
    }
}
