use serde::{Deserialize, Serialize};

use super::candidate::CandidateResult;
use super::live::LiveDataType;
use super::query_analysis::QueryAnalysis;
use super::vector::MetadataFilter;

/// Caller-supplied options for one `retrieve` call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RetrieveOptions {
    /// Maximum results; the engine default applies when `None`.
    pub top_k: Option<usize>,
    /// Results whose composite score is below this are removed.
    pub threshold: Option<f64>,
    /// Forwarded to the vector index and applied to stored documents.
    pub filter: Option<MetadataFilter>,
}

impl RetrieveOptions {
    pub fn top_k(mut self, top_k: usize) -> Self {
        self.top_k = Some(top_k);
        self
    }

    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }

    pub fn filter(mut self, filter: MetadataFilter) -> Self {
        self.filter = Some(filter);
        self
    }
}

/// Named strategy bundle chosen per query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyName {
    HybridDenseSparse,
    GraphEnhanced,
    SemanticSearch,
    KeywordBoosted,
    TemporalAware,
}

impl StrategyName {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HybridDenseSparse => "hybrid_dense_sparse",
            Self::GraphEnhanced => "graph_enhanced",
            Self::SemanticSearch => "semantic_search",
            Self::KeywordBoosted => "keyword_boosted",
            Self::TemporalAware => "temporal_aware",
        }
    }
}

impl std::fmt::Display for StrategyName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How one backend invocation ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BackendStatus {
    Ok,
    Failed { reason: String },
    TimedOut { timeout_ms: u64 },
}

/// Per-backend execution record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendReport {
    pub backend: String,
    pub candidates: usize,
    pub elapsed_ms: u64,
    pub status: BackendStatus,
}

/// How one live source was handled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LiveOutcome {
    Fetched,
    CacheHit,
    /// Quota exhausted for the current window; not an error.
    RateLimited,
    Failed { reason: String },
    TimedOut { timeout_ms: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceReport {
    pub source: String,
    pub data_type: LiveDataType,
    pub items: usize,
    pub outcome: LiveOutcome,
}

/// Live-data section of the response metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveFetchReport {
    /// Whether the query asked for fresh data at all.
    pub requested: bool,
    pub data_types: Vec<LiveDataType>,
    pub sources: Vec<SourceReport>,
    /// Items contributed after merge and cap.
    pub items: usize,
}

impl LiveFetchReport {
    pub fn rate_limited_sources(&self) -> Vec<&str> {
        self.sources
            .iter()
            .filter(|s| s.outcome == LiveOutcome::RateLimited)
            .map(|s| s.source.as_str())
            .collect()
    }

    pub fn cache_hits(&self) -> usize {
        self.sources
            .iter()
            .filter(|s| s.outcome == LiveOutcome::CacheHit)
            .count()
    }
}

/// The five re-ranking factors for one result, each in [0, 1].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub content_relevance: f64,
    pub title_relevance: f64,
    pub freshness: f64,
    pub authority: f64,
    pub diversity: f64,
}

/// A candidate in its final position, with its composite score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResult {
    pub candidate: CandidateResult,
    /// Composite score in [0, 1].
    pub score: f64,
    pub breakdown: ScoreBreakdown,
}

/// Observability payload returned alongside the ranked list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalMetadata {
    pub strategy: StrategyName,
    pub strategy_explanation: String,
    pub analysis: QueryAnalysis,
    pub elapsed_ms: u64,
    pub backends: Vec<BackendReport>,
    pub live: LiveFetchReport,
    /// Candidates gathered before fusion.
    pub total_candidates: usize,
    /// Candidates surviving deduplication.
    pub deduplicated_candidates: usize,
    /// Malformed candidates dropped during fusion and re-ranking.
    pub dropped_candidates: usize,
    /// Ranked results removed by the caller's threshold.
    pub below_threshold: usize,
    pub final_count: usize,
    /// Name of the embedding provider that served the query, when dense search ran.
    pub embedding_provider: Option<String>,
}

/// What `retrieve` returns. An empty `results` is a valid "no grounding found".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalResponse {
    pub results: Vec<RankedResult>,
    pub metadata: RetrievalMetadata,
}
