use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Composite re-ranking weights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingWeights {
    pub content: f64,
    pub title: f64,
    pub freshness: f64,
    pub authority: f64,
    pub diversity: f64,
}

impl Default for RankingWeights {
    fn default() -> Self {
        Self {
            content: defaults::DEFAULT_WEIGHT_CONTENT,
            title: defaults::DEFAULT_WEIGHT_TITLE,
            freshness: defaults::DEFAULT_WEIGHT_FRESHNESS,
            authority: defaults::DEFAULT_WEIGHT_AUTHORITY,
            diversity: defaults::DEFAULT_WEIGHT_DIVERSITY,
        }
    }
}

impl RankingWeights {
    pub fn as_array(&self) -> [(&'static str, f64); 5] {
        [
            ("content", self.content),
            ("title", self.title),
            ("freshness", self.freshness),
            ("authority", self.authority),
            ("diversity", self.diversity),
        ]
    }
}

/// Retrieval pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Results returned when the caller does not ask for a count.
    pub default_top_k: usize,
    pub dense_top_k: usize,
    /// Dense depth for the `semantic_search` bundle.
    pub semantic_dense_top_k: usize,
    pub sparse_top_k: usize,
    pub bm25_k1: f64,
    pub bm25_b: f64,
    /// Raw BM25 scores below this are discarded.
    pub sparse_score_floor: f64,
    pub pattern_threshold: f64,
    pub pattern_top_k: usize,
    /// Per-backend budget inside the executor.
    pub backend_timeout_ms: u64,
    pub query_expansion: bool,
    pub max_expansions: usize,
    pub graph_context_enrichment: bool,
    pub max_graph_context: usize,
    pub enhancer_timeout_ms: u64,
    pub weights: RankingWeights,
    /// Source label to trust score.
    pub authority: BTreeMap<String, f64>,
    pub default_authority: f64,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            default_top_k: defaults::DEFAULT_TOP_K,
            dense_top_k: defaults::DEFAULT_DENSE_TOP_K,
            semantic_dense_top_k: defaults::DEFAULT_SEMANTIC_DENSE_TOP_K,
            sparse_top_k: defaults::DEFAULT_SPARSE_TOP_K,
            bm25_k1: defaults::DEFAULT_BM25_K1,
            bm25_b: defaults::DEFAULT_BM25_B,
            sparse_score_floor: defaults::DEFAULT_SPARSE_SCORE_FLOOR,
            pattern_threshold: defaults::DEFAULT_PATTERN_THRESHOLD,
            pattern_top_k: defaults::DEFAULT_PATTERN_TOP_K,
            backend_timeout_ms: defaults::DEFAULT_BACKEND_TIMEOUT_MS,
            query_expansion: true,
            max_expansions: defaults::DEFAULT_MAX_EXPANSIONS,
            graph_context_enrichment: true,
            max_graph_context: defaults::DEFAULT_MAX_GRAPH_CONTEXT,
            enhancer_timeout_ms: defaults::DEFAULT_ENHANCER_TIMEOUT_MS,
            weights: RankingWeights::default(),
            authority: defaults::DEFAULT_AUTHORITY_TABLE
                .iter()
                .map(|(label, score)| (label.to_string(), *score))
                .collect(),
            default_authority: defaults::DEFAULT_AUTHORITY,
        }
    }
}
