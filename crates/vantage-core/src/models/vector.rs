use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Equality predicate over metadata keys, forwarded to every backend.
///
/// A record matches when each filter key is present with an equal value.
/// An empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataFilter(pub BTreeMap<String, serde_json::Value>);

impl MetadataFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn require(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn matches(&self, metadata: &BTreeMap<String, serde_json::Value>) -> bool {
        self.0
            .iter()
            .all(|(key, expected)| metadata.get(key) == Some(expected))
    }
}

/// Parameters of a vector index query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VectorQuery {
    pub top_k: usize,
    pub filter: Option<MetadataFilter>,
}

/// One nearest-neighbour hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorMatch {
    pub id: String,
    /// Similarity as reported by the index (cosine for the in-memory index).
    pub score: f64,
    /// Opaque blob; `content`, `title`, `source`, `timestamp` are read when present.
    #[serde(default)]
    pub metadata: BTreeMap<String, serde_json::Value>,
}
