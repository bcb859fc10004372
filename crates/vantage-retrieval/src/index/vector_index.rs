//! Brute-force cosine index for hosts without a managed vector store.

use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::Value;
use vantage_core::errors::{RetrievalError, VantageResult};
use vantage_core::models::{Document, VectorMatch, VectorQuery};
use vantage_core::traits::{IEmbeddingProvider, IVectorIndex};

#[derive(Debug, Clone)]
struct Entry {
    id: String,
    vector: Vec<f32>,
    metadata: BTreeMap<String, Value>,
}

#[derive(Debug, Default)]
pub struct InMemoryVectorIndex {
    entries: RwLock<Vec<Entry>>,
}

pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (x, y) in a.iter().zip(b) {
        dot += f64::from(*x) * f64::from(*y);
        norm_a += f64::from(*x) * f64::from(*x);
        norm_b += f64::from(*y) * f64::from(*y);
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

fn poisoned(e: impl std::fmt::Display) -> RetrievalError {
    RetrievalError::IndexQueryFailed {
        reason: e.to_string(),
    }
}

impl InMemoryVectorIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &self,
        id: impl Into<String>,
        vector: Vec<f32>,
        metadata: BTreeMap<String, Value>,
    ) -> VantageResult<()> {
        let id = id.into();
        let mut entries = self.entries.write().map_err(poisoned)?;
        entries.retain(|e| e.id != id);
        entries.push(Entry {
            id,
            vector,
            metadata,
        });
        Ok(())
    }

    /// Embed and insert documents. Metadata carries `content`, `title`,
    /// `source` and `timestamp` so dense hits can become candidates.
    pub async fn index_documents(
        &self,
        embedder: &dyn IEmbeddingProvider,
        documents: &[Document],
    ) -> VantageResult<usize> {
        let texts: Vec<String> = documents
            .iter()
            .map(|d| format!("{} {}", d.title, d.content))
            .collect();
        let vectors = embedder.embed_batch(&texts).await?;

        let mut indexed = 0;
        for (position, (doc, vector)) in documents.iter().zip(vectors).enumerate() {
            let id = doc
                .id
                .clone()
                .unwrap_or_else(|| format!("doc-{position}"));
            let mut metadata = doc.candidate_metadata();
            metadata.insert("content".into(), Value::String(doc.content.clone()));
            metadata.insert("title".into(), Value::String(doc.title.clone()));
            if let Some(ts) = doc.timestamp {
                metadata.insert("timestamp".into(), Value::String(ts.to_rfc3339()));
            }
            self.insert(id, vector, metadata)?;
            indexed += 1;
        }
        Ok(indexed)
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl IVectorIndex for InMemoryVectorIndex {
    async fn query(&self, vector: &[f32], query: &VectorQuery) -> VantageResult<Vec<VectorMatch>> {
        let entries = self.entries.read().map_err(poisoned)?;
        let mut matches: Vec<VectorMatch> = entries
            .iter()
            .filter(|e| query.filter.as_ref().map_or(true, |f| f.matches(&e.metadata)))
            .map(|e| VectorMatch {
                id: e.id.clone(),
                score: cosine_similarity(vector, &e.vector),
                metadata: e.metadata.clone(),
            })
            .collect();

        matches.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        matches.truncate(query.top_k);
        Ok(matches)
    }

    fn name(&self) -> &str {
        "in-memory-cosine"
    }
}
