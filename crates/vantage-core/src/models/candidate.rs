use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::graph::GraphNode;
use super::live::LiveDataType;
use crate::text::clamp_unit;

/// Number of content characters used as identity when a candidate has no id.
pub const IDENTITY_PREFIX_CHARS: usize = 100;

/// Which backend produced a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceStrategy {
    DenseVector,
    SparseKeyword,
    GraphDirect,
    GraphRelated,
    SemanticPattern,
    Temporal,
    RealTime(LiveDataType),
}

impl SourceStrategy {
    /// Tie-break rank used by the re-ranker; lower wins.
    pub fn priority(&self) -> u8 {
        match self {
            Self::DenseVector => 0,
            Self::Temporal => 1,
            Self::GraphDirect => 2,
            Self::SparseKeyword => 3,
            Self::GraphRelated => 4,
            Self::SemanticPattern => 5,
            Self::RealTime(_) => 6,
        }
    }

    pub fn label(&self) -> String {
        match self {
            Self::DenseVector => "dense_vector".to_string(),
            Self::SparseKeyword => "sparse_keyword".to_string(),
            Self::GraphDirect => "graph_direct".to_string(),
            Self::GraphRelated => "graph_related".to_string(),
            Self::SemanticPattern => "semantic_pattern".to_string(),
            Self::Temporal => "temporal".to_string(),
            Self::RealTime(kind) => format!("realtime_{}", kind.as_str()),
        }
    }
}

/// A single retrieved item before final ranking.
///
/// Every backend produces this one shape: the common fields are mandatory,
/// backend-specific data goes into `metadata`. Values are never mutated in
/// place; re-scoring goes through [`CandidateResult::with_score`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateResult {
    pub id: Option<String>,
    pub title: String,
    pub content: String,
    /// [0.0, 1.0]
    pub score: f64,
    pub source_strategy: SourceStrategy,
    #[serde(default)]
    pub metadata: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub reasoning: Option<String>,
    #[serde(default)]
    pub graph_context: Option<Vec<GraphNode>>,
    /// When the underlying fact was published or observed.
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl CandidateResult {
    pub fn new(
        id: Option<String>,
        title: impl Into<String>,
        content: impl Into<String>,
        score: f64,
        source_strategy: SourceStrategy,
    ) -> Self {
        Self {
            id: id.filter(|s| !s.is_empty()),
            title: title.into(),
            content: content.into(),
            score: clamp_unit(score),
            source_strategy,
            metadata: BTreeMap::new(),
            reasoning: None,
            graph_context: None,
            timestamp: None,
        }
    }

    pub fn with_reasoning(mut self, reasoning: impl Into<String>) -> Self {
        self.reasoning = Some(reasoning.into());
        self
    }

    pub fn with_metadata(mut self, metadata: BTreeMap<String, serde_json::Value>) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_graph_context(mut self, nodes: Vec<GraphNode>) -> Self {
        self.graph_context = Some(nodes);
        self
    }

    pub fn with_timestamp(mut self, timestamp: Option<DateTime<Utc>>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// A copy carrying a new score, clamped to [0, 1].
    pub fn with_score(&self, score: f64) -> Self {
        Self {
            score: clamp_unit(score),
            ..self.clone()
        }
    }

    /// Provenance label, e.g. the curated knowledge base or a live feed name.
    pub fn source_label(&self) -> Option<&str> {
        self.metadata.get("source").and_then(|v| v.as_str())
    }

    /// Identity used by deduplication.
    pub fn identity_key(&self) -> String {
        identity_key(self.id.as_deref(), &self.content)
    }
}

/// Explicit id, else the first [`IDENTITY_PREFIX_CHARS`] characters of content.
pub fn identity_key(id: Option<&str>, content: &str) -> String {
    match id {
        Some(id) if !id.is_empty() => format!("id:{id}"),
        _ => format!(
            "content:{}",
            content.chars().take(IDENTITY_PREFIX_CHARS).collect::<String>()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clamps_score() {
        let c = CandidateResult::new(None, "t", "c", 3.2, SourceStrategy::SparseKeyword);
        assert_eq!(c.score, 1.0);
    }

    #[test]
    fn empty_id_is_absent() {
        let c = CandidateResult::new(Some(String::new()), "t", "body", 0.5, SourceStrategy::DenseVector);
        assert!(c.id.is_none());
        assert_eq!(c.identity_key(), "content:body");
    }

    #[test]
    fn with_score_leaves_original_untouched() {
        let c = CandidateResult::new(Some("a".into()), "t", "c", 0.4, SourceStrategy::DenseVector);
        let rescored = c.with_score(0.9);
        assert_eq!(c.score, 0.4);
        assert_eq!(rescored.score, 0.9);
        assert_eq!(rescored.identity_key(), c.identity_key());
    }

    #[test]
    fn content_identity_uses_prefix() {
        let long = "x".repeat(250);
        let key = identity_key(None, &long);
        assert_eq!(key.len(), "content:".len() + IDENTITY_PREFIX_CHARS);
    }

    #[test]
    fn realtime_label_includes_kind() {
        assert_eq!(
            SourceStrategy::RealTime(LiveDataType::Market).label(),
            "realtime_market"
        );
    }
}
