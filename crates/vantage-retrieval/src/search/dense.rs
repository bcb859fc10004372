//! Dense vector search: embed the (expanded) query, ask the vector index.

use chrono::{DateTime, Utc};
use serde_json::Value;
use vantage_core::errors::VantageResult;
use vantage_core::models::{CandidateResult, SourceStrategy, VectorMatch, VectorQuery};

use super::{BackendOutput, SearchContext};

pub async fn search(ctx: &SearchContext<'_>, top_k: usize) -> VantageResult<BackendOutput> {
    let embedding = ctx.embedder.embed_query(ctx.dense_query).await?;
    let matches = ctx
        .vector_index
        .query(
            &embedding.vector,
            &VectorQuery {
                top_k,
                filter: ctx.filter.cloned(),
            },
        )
        .await?;

    let candidates = matches
        .into_iter()
        .map(|m| to_candidate(m, SourceStrategy::DenseVector))
        .collect();
    Ok(BackendOutput {
        candidates,
        embedding_provider: Some(embedding.provider),
    })
}

fn take_string(metadata: &mut std::collections::BTreeMap<String, Value>, key: &str) -> String {
    match metadata.remove(key) {
        Some(Value::String(s)) => s,
        _ => String::new(),
    }
}

/// Content and title move out of the metadata blob; the rest rides along.
pub(crate) fn to_candidate(m: VectorMatch, strategy: SourceStrategy) -> CandidateResult {
    let mut metadata = m.metadata;
    let content = take_string(&mut metadata, "content");
    let title = take_string(&mut metadata, "title");
    let timestamp = metadata
        .get("timestamp")
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|t| t.with_timezone(&Utc));

    CandidateResult::new(Some(m.id), title, content, m.score, strategy)
        .with_metadata(metadata)
        .with_timestamp(timestamp)
        .with_reasoning(format!("vector similarity {:.3}", m.score))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeMap;

    #[test]
    fn match_becomes_candidate() {
        let m = VectorMatch {
            id: "doc-1".into(),
            score: 1.2,
            metadata: BTreeMap::from([
                ("content".to_string(), json!("Acme AI raised $50M")),
                ("title".to_string(), json!("Acme")),
                ("source".to_string(), json!("knowledge_base")),
                ("timestamp".to_string(), json!("2024-05-01T00:00:00Z")),
            ]),
        };
        let c = to_candidate(m, SourceStrategy::DenseVector);
        assert_eq!(c.content, "Acme AI raised $50M");
        assert_eq!(c.title, "Acme");
        assert_eq!(c.score, 1.0);
        assert_eq!(c.source_label(), Some("knowledge_base"));
        assert!(c.timestamp.is_some());
        assert!(!c.metadata.contains_key("content"));
    }

    #[test]
    fn missing_content_yields_blank_candidate() {
        let m = VectorMatch {
            id: "x".into(),
            score: 0.4,
            metadata: BTreeMap::from([("timestamp".to_string(), json!("not a date"))]),
        };
        let c = to_candidate(m, SourceStrategy::DenseVector);
        assert!(c.content.is_empty());
        assert!(c.timestamp.is_none());
    }
}
