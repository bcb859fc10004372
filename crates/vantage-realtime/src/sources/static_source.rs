//! Fixed-payload source for curated feeds and tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use vantage_core::config::defaults;
use vantage_core::errors::{FetchError, VantageResult};
use vantage_core::models::{LiveDataType, LiveItem};
use vantage_core::traits::ILiveSource;

/// Serves the same items for every query and counts outbound calls.
pub struct StaticSource {
    name: String,
    data_type: LiveDataType,
    priority: f64,
    quota: u32,
    items: Vec<LiveItem>,
    fail_with: Option<String>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl StaticSource {
    pub fn new(name: impl Into<String>, data_type: LiveDataType, items: Vec<LiveItem>) -> Self {
        Self {
            name: name.into(),
            data_type,
            priority: defaults::DEFAULT_SOURCE_PRIORITY,
            quota: defaults::DEFAULT_SOURCE_RATE_LIMIT,
            items,
            fail_with: None,
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_priority(mut self, priority: f64) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_quota(mut self, quota: u32) -> Self {
        self.quota = quota;
        self
    }

    /// Make every fetch fail with `reason`.
    pub fn failing(mut self, reason: impl Into<String>) -> Self {
        self.fail_with = Some(reason.into());
        self
    }

    /// Sleep before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Outbound calls served so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ILiveSource for StaticSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn data_type(&self) -> LiveDataType {
        self.data_type
    }

    fn priority(&self) -> f64 {
        self.priority
    }

    fn quota(&self) -> u32 {
        self.quota
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(defaults::DEFAULT_SOURCE_TIMEOUT_SECS)
    }

    async fn fetch(&self, _query: &str) -> VantageResult<Vec<LiveItem>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(reason) = &self.fail_with {
            return Err(FetchError::RequestFailed {
                source_name: self.name.clone(),
                reason: reason.clone(),
            }
            .into());
        }
        Ok(self.items.clone())
    }
}
