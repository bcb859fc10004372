use std::time::Duration;

use async_trait::async_trait;

use crate::errors::VantageResult;
use crate::models::{LiveDataType, LiveItem};

/// A pluggable live-data feed. The fetcher owns rate limiting, caching and
/// timeouts; an adapter only knows how to ask its endpoint.
#[async_trait]
pub trait ILiveSource: Send + Sync {
    /// Unique source name; also the rate-limit and cache namespace.
    fn name(&self) -> &str;

    fn data_type(&self) -> LiveDataType;

    /// Higher is tried first.
    fn priority(&self) -> f64;

    /// Outbound calls allowed per rate window.
    fn quota(&self) -> u32;

    /// Upper bound on one fetch.
    fn timeout(&self) -> Duration;

    async fn fetch(&self, query: &str) -> VantageResult<Vec<LiveItem>>;
}
