//! RealTimeFetcher: conditional, rate-limited, cached live-data retrieval.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::future::join_all;
use serde::Serialize;
use tracing::{debug, info, warn};
use vantage_core::config::{defaults, RealtimeConfig};
use vantage_core::errors::VantageResult;
use vantage_core::models::{
    LiveDataType, LiveFetchReport, LiveItem, LiveOutcome, QueryAnalysis, SourceReport,
};
use vantage_core::text::{clamp_unit, word_set};
use vantage_core::traits::ILiveSource;

use crate::cache::FetchCache;
use crate::markers;
use crate::rate_limit::{RateCounter, RateLimiter};
use crate::sources::HttpJsonSource;

/// A live item tagged with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedItem {
    pub source_name: String,
    pub data_type: LiveDataType,
    pub item: LiveItem,
}

/// Result of one fetcher invocation.
#[derive(Debug, Clone, Default)]
pub struct LiveFetch {
    pub items: Vec<FetchedItem>,
    pub report: LiveFetchReport,
}

#[derive(Debug, Clone, Serialize)]
pub struct FetcherStats {
    pub sources: usize,
    pub cache_entries: usize,
    pub counters: Vec<RateCounter>,
    pub generated_at: DateTime<Utc>,
}

pub struct RealTimeFetcher {
    config: RealtimeConfig,
    sources: Vec<Arc<dyn ILiveSource>>,
    cache: FetchCache,
    limiter: RateLimiter,
}

impl RealTimeFetcher {
    pub fn new(config: RealtimeConfig) -> Self {
        let cache = FetchCache::new(
            Duration::from_secs(config.freshness_secs),
            Duration::from_secs(config.eviction_secs),
        );
        let limiter = RateLimiter::new(Duration::from_secs(config.rate_window_secs));
        Self {
            config,
            sources: Vec::new(),
            cache,
            limiter,
        }
    }

    /// Build a fetcher with one [`HttpJsonSource`] per configured source.
    pub fn from_config(config: RealtimeConfig) -> VantageResult<Self> {
        let declared = config.sources.clone();
        let mut fetcher = Self::new(config);
        for source in declared {
            fetcher.add_source(Arc::new(HttpJsonSource::new(source)?));
        }
        Ok(fetcher)
    }

    pub fn add_source(&mut self, source: Arc<dyn ILiveSource>) {
        info!(
            source = source.name(),
            data_type = source.data_type().as_str(),
            quota = source.quota(),
            "live source registered"
        );
        self.sources.push(source);
    }

    pub fn with_source(mut self, source: Arc<dyn ILiveSource>) -> Self {
        self.add_source(source);
        self
    }

    /// Whether the query calls for fresh data at all.
    pub fn needs_realtime(&self, query: &str, analysis: &QueryAnalysis) -> bool {
        analysis.temporality.has_temporal || markers::wants_fresh_data(query)
    }

    /// Fetch live items for `query`, if it needs any.
    pub async fn fetch(&self, query: &str, analysis: &QueryAnalysis) -> LiveFetch {
        if !self.config.enabled || self.sources.is_empty() {
            return LiveFetch::default();
        }
        if !self.needs_realtime(query, analysis) {
            debug!("query does not need live data");
            return LiveFetch::default();
        }

        let data_types = markers::data_types(query);
        let selected = self.select_sources(&data_types);
        debug!(
            data_types = ?data_types,
            sources = selected.len(),
            "fetching live data"
        );

        let outcomes = join_all(selected.iter().map(|s| self.fetch_source(s.as_ref(), query))).await;

        let mut report = LiveFetchReport {
            requested: true,
            data_types: data_types.into_iter().collect(),
            sources: Vec::with_capacity(outcomes.len()),
            items: 0,
        };
        let mut items = Vec::new();
        for (source_report, fetched) in outcomes {
            report.sources.push(source_report);
            items.extend(fetched);
        }

        let query_words = word_set(query);
        for fetched in &mut items {
            let relevance = match fetched.item.relevance {
                Some(r) if r.is_finite() => clamp_unit(r),
                _ => self.relevance(&query_words, &fetched.item),
            };
            fetched.item.relevance = Some(relevance);
        }
        items.sort_by(|a, b| {
            b.item
                .relevance
                .partial_cmp(&a.item.relevance)
                .unwrap_or(Ordering::Equal)
        });
        items.truncate(self.config.top_k);
        report.items = items.len();

        LiveFetch { items, report }
    }

    /// Qualifying sources ordered by priority, capped at `max_sources`.
    fn select_sources(&self, data_types: &BTreeSet<LiveDataType>) -> Vec<Arc<dyn ILiveSource>> {
        let mut qualifying: Vec<Arc<dyn ILiveSource>> = self
            .sources
            .iter()
            .filter(|s| data_types.contains(&s.data_type()))
            .cloned()
            .collect();
        qualifying.sort_by(|a, b| {
            b.priority()
                .partial_cmp(&a.priority())
                .unwrap_or(Ordering::Equal)
        });
        qualifying.truncate(self.config.max_sources);
        qualifying
    }

    async fn fetch_source(
        &self,
        source: &dyn ILiveSource,
        query: &str,
    ) -> (SourceReport, Vec<FetchedItem>) {
        let name = source.name().to_string();
        let data_type = source.data_type();
        let report = |items: usize, outcome: LiveOutcome| SourceReport {
            source: name.clone(),
            data_type,
            items,
            outcome,
        };

        if !self.limiter.has_capacity(&name, source.quota()) {
            info!(source = %name, "live source skipped: rate limit reached");
            return (report(0, LiveOutcome::RateLimited), Vec::new());
        }

        let key = FetchCache::key(&name, query);
        if let Some(cached) = self.cache.get(&key) {
            debug!(source = %name, items = cached.len(), "live cache hit");
            let fetched = self.tag(&name, data_type, cached);
            return (report(fetched.len(), LiveOutcome::CacheHit), fetched);
        }

        // The slot is taken before the call goes out, successful or not.
        if !self.limiter.try_acquire(&name, source.quota()) {
            info!(source = %name, "live source skipped: rate limit reached");
            return (report(0, LiveOutcome::RateLimited), Vec::new());
        }

        let timeout = clamp_timeout(source.timeout());
        match tokio::time::timeout(timeout, source.fetch(query)).await {
            Ok(Ok(items)) => {
                let items: Vec<LiveItem> = items
                    .into_iter()
                    .filter(|i| !i.content.trim().is_empty())
                    .collect();
                self.cache.put(key, items.clone());
                let fetched = self.tag(&name, data_type, items);
                (report(fetched.len(), LiveOutcome::Fetched), fetched)
            }
            Ok(Err(e)) => {
                warn!(source = %name, error = %e, "live fetch failed");
                (
                    report(0, LiveOutcome::Failed { reason: e.to_string() }),
                    Vec::new(),
                )
            }
            Err(_) => {
                let timeout_ms = timeout.as_millis() as u64;
                warn!(source = %name, timeout_ms, "live fetch timed out");
                (report(0, LiveOutcome::TimedOut { timeout_ms }), Vec::new())
            }
        }
    }

    fn tag(&self, source_name: &str, data_type: LiveDataType, items: Vec<LiveItem>) -> Vec<FetchedItem> {
        items
            .into_iter()
            .map(|item| FetchedItem {
                source_name: source_name.to_string(),
                data_type,
                item,
            })
            .collect()
    }

    /// Share of query words found in the item, plus the live bonus.
    fn relevance(&self, query_words: &HashSet<String>, item: &LiveItem) -> f64 {
        if query_words.is_empty() {
            return clamp_unit(self.config.live_bonus);
        }
        let text = word_set(&format!("{} {}", item.title, item.content));
        let overlap = query_words.intersection(&text).count() as f64 / query_words.len() as f64;
        clamp_unit(overlap + self.config.live_bonus)
    }

    pub fn stats(&self) -> FetcherStats {
        FetcherStats {
            sources: self.sources.len(),
            cache_entries: self.cache.len(),
            counters: self.limiter.snapshot(),
            generated_at: Utc::now(),
        }
    }

    /// Drop cache entries older than the eviction age.
    pub fn sweep_expired(&self) -> usize {
        let removed = self.cache.sweep_expired();
        if removed > 0 {
            debug!(removed, "swept expired live cache entries");
        }
        removed
    }

    pub fn config(&self) -> &RealtimeConfig {
        &self.config
    }
}

fn clamp_timeout(timeout: Duration) -> Duration {
    timeout.clamp(
        Duration::from_secs(defaults::MIN_SOURCE_TIMEOUT_SECS),
        Duration::from_secs(defaults::MAX_SOURCE_TIMEOUT_SECS),
    )
}
