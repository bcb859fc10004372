use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A static corpus document, as held by the document store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
    pub content: String,
    /// Provenance label, e.g. "knowledge_base".
    #[serde(default)]
    pub source: Option<String>,
    /// Curated keywords attached at ingestion.
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl Document {
    pub fn new(id: impl Into<String>, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            title: title.into(),
            content: content.into(),
            source: None,
            keywords: Vec::new(),
            timestamp: None,
            metadata: BTreeMap::new(),
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_keywords(mut self, keywords: &[&str]) -> Self {
        self.keywords = keywords.iter().map(|k| k.to_string()).collect();
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn with_meta(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Metadata as seen by filters and candidates: the document's own map
    /// plus its `source` label.
    pub fn candidate_metadata(&self) -> BTreeMap<String, serde_json::Value> {
        let mut meta = self.metadata.clone();
        if let Some(source) = &self.source {
            meta.insert("source".to_string(), serde_json::Value::String(source.clone()));
        }
        meta
    }
}
