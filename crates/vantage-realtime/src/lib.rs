//! # vantage-realtime
//!
//! Live-data fetching behind per-source quotas and a short-TTL cache.
//! Sources are pluggable through [`vantage_core::traits::ILiveSource`].

pub mod cache;
pub mod fetcher;
pub mod markers;
pub mod rate_limit;
pub mod sources;

pub use cache::{CacheEntry, FetchCache};
pub use fetcher::{FetchedItem, FetcherStats, LiveFetch, RealTimeFetcher};
pub use rate_limit::{RateCounter, RateLimiter};
