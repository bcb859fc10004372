use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::defaults;
use crate::models::LiveDataType;

/// One `[[realtime.sources]]` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveSourceConfig {
    pub name: String,
    pub endpoint: String,
    pub data_type: LiveDataType,
    #[serde(default = "default_priority")]
    pub priority: f64,
    /// Outbound calls allowed per rate window. Zero disables the source.
    #[serde(default = "default_rate_limit")]
    pub rate_limit: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

fn default_priority() -> f64 {
    defaults::DEFAULT_SOURCE_PRIORITY
}

fn default_rate_limit() -> u32 {
    defaults::DEFAULT_SOURCE_RATE_LIMIT
}

fn default_timeout_secs() -> u64 {
    defaults::DEFAULT_SOURCE_TIMEOUT_SECS
}

impl LiveSourceConfig {
    /// Timeout clamped into the allowed outbound window.
    pub fn effective_timeout_secs(&self) -> u64 {
        self.timeout_secs.clamp(
            defaults::MIN_SOURCE_TIMEOUT_SECS,
            defaults::MAX_SOURCE_TIMEOUT_SECS,
        )
    }
}

/// Live-data fetcher configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RealtimeConfig {
    pub enabled: bool,
    /// Cache entries younger than this are served without a fetch.
    pub freshness_secs: u64,
    /// The sweep drops entries older than this.
    pub eviction_secs: u64,
    pub rate_window_secs: u64,
    pub max_sources: usize,
    pub top_k: usize,
    /// Added to computed word-overlap relevance.
    pub live_bonus: f64,
    pub sources: Vec<LiveSourceConfig>,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            freshness_secs: defaults::DEFAULT_FRESHNESS_SECS,
            eviction_secs: defaults::DEFAULT_EVICTION_SECS,
            rate_window_secs: defaults::DEFAULT_RATE_WINDOW_SECS,
            max_sources: defaults::DEFAULT_MAX_LIVE_SOURCES,
            top_k: defaults::DEFAULT_LIVE_TOP_K,
            live_bonus: defaults::DEFAULT_LIVE_BONUS,
            sources: Vec::new(),
        }
    }
}
