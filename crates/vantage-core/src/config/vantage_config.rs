//! Top-level Vantage configuration.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use super::{defaults, EmbeddingConfig, ObservabilityConfig, RealtimeConfig, RetrievalConfig};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`VANTAGE_*`)
/// 2. Config file (`vantage.toml` or an explicit path)
/// 3. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct VantageConfig {
    pub retrieval: RetrievalConfig,
    pub embedding: EmbeddingConfig,
    pub realtime: RealtimeConfig,
    pub observability: ObservabilityConfig,
}

impl VantageConfig {
    /// Load from `path`, then apply env overrides and validate.
    /// A missing file is not an error; compiled defaults are used instead.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?
        } else {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            Self::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML string. No env overrides.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }

    /// Apply `VANTAGE_*` overrides read through `lookup`.
    /// Unparseable values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("VANTAGE_TOP_K").and_then(|v| v.parse::<usize>().ok()) {
            self.retrieval.default_top_k = v;
        }
        if let Some(v) = lookup("VANTAGE_LIVE_FETCH").and_then(|v| parse_bool(&v)) {
            self.realtime.enabled = v;
        }
        if let Some(v) = lookup("VANTAGE_QUERY_EXPANSION").and_then(|v| parse_bool(&v)) {
            self.retrieval.query_expansion = v;
        }
        if let Some(v) = lookup("VANTAGE_EMBEDDING_PROVIDER") {
            self.embedding.provider = v;
        }
        if let Some(v) = lookup("VANTAGE_LOG") {
            self.observability.log_level = v;
        }
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let r = &self.retrieval;
        if r.default_top_k == 0 {
            return Err(invalid("retrieval.default_top_k", "must be greater than 0"));
        }
        if r.dense_top_k == 0 || r.semantic_dense_top_k == 0 || r.sparse_top_k == 0 {
            return Err(invalid("retrieval.dense_top_k", "must be greater than 0"));
        }
        if !(r.bm25_k1.is_finite() && r.bm25_k1 >= 0.0) {
            return Err(invalid("retrieval.bm25_k1", "must be a non-negative number"));
        }
        check_unit("retrieval.bm25_b", r.bm25_b)?;
        if !(r.sparse_score_floor.is_finite() && r.sparse_score_floor >= 0.0) {
            return Err(invalid("retrieval.sparse_score_floor", "must be a non-negative number"));
        }
        check_unit("retrieval.pattern_threshold", r.pattern_threshold)?;
        if r.backend_timeout_ms == 0 {
            return Err(invalid("retrieval.backend_timeout_ms", "must be greater than 0"));
        }
        if r.enhancer_timeout_ms == 0 {
            return Err(invalid("retrieval.enhancer_timeout_ms", "must be greater than 0"));
        }
        for (name, weight) in r.weights.as_array() {
            check_unit(&format!("retrieval.weights.{name}"), weight)?;
        }
        let total: f64 = r.weights.as_array().iter().map(|(_, w)| w).sum();
        if total <= 0.0 {
            return Err(invalid("retrieval.weights", "at least one weight must be positive"));
        }
        for (label, score) in &r.authority {
            check_unit(&format!("retrieval.authority.{label}"), *score)?;
        }
        check_unit("retrieval.default_authority", r.default_authority)?;

        let e = &self.embedding;
        match e.provider.as_str() {
            "tfidf" => {}
            "api" => {
                if e.api_endpoint.as_deref().map_or(true, str::is_empty) {
                    return Err(invalid(
                        "embedding.api_endpoint",
                        "required when provider is \"api\"",
                    ));
                }
            }
            other => {
                return Err(invalid(
                    "embedding.provider",
                    &format!("unknown provider {other:?}, expected \"api\" or \"tfidf\""),
                ));
            }
        }
        if e.dimensions == 0 {
            return Err(invalid("embedding.dimensions", "must be greater than 0"));
        }
        if !(1..=defaults::MAX_EMBEDDING_CACHE_TTL_SECS).contains(&e.cache_ttl_secs) {
            return Err(invalid(
                "embedding.cache_ttl_secs",
                &format!("must be between 1 and {}", defaults::MAX_EMBEDDING_CACHE_TTL_SECS),
            ));
        }

        let rt = &self.realtime;
        if rt.rate_window_secs == 0 {
            return Err(invalid("realtime.rate_window_secs", "must be greater than 0"));
        }
        if !(defaults::MIN_FRESHNESS_SECS..=defaults::MAX_FRESHNESS_SECS).contains(&rt.freshness_secs) {
            return Err(invalid(
                "realtime.freshness_secs",
                &format!(
                    "must be between {} and {}",
                    defaults::MIN_FRESHNESS_SECS,
                    defaults::MAX_FRESHNESS_SECS
                ),
            ));
        }
        if rt.freshness_secs > rt.eviction_secs {
            return Err(invalid(
                "realtime.freshness_secs",
                "must not exceed realtime.eviction_secs",
            ));
        }
        check_unit("realtime.live_bonus", rt.live_bonus)?;
        let mut seen = HashSet::new();
        for source in &rt.sources {
            if source.name.trim().is_empty() {
                return Err(invalid("realtime.sources.name", "must not be empty"));
            }
            if !seen.insert(source.name.as_str()) {
                return Err(invalid(
                    "realtime.sources.name",
                    &format!("duplicate source {:?}", source.name),
                ));
            }
            if !source.priority.is_finite() {
                return Err(invalid("realtime.sources.priority", "must be finite"));
            }
            if source.timeout_secs == 0 {
                return Err(invalid("realtime.sources.timeout_secs", "must be greater than 0"));
            }
        }

        if let Err(e) = EnvFilter::try_new(&self.observability.log_level) {
            return Err(invalid("observability.log_level", &e.to_string()));
        }
        Ok(())
    }
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::ValidationFailed {
        field: field.to_string(),
        message: message.to_string(),
    }
}

fn check_unit(field: &str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(field, "must be between 0.0 and 1.0"))
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
