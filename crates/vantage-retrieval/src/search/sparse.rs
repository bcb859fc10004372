//! Keyword search over the lexical index.

use serde_json::json;
use vantage_core::models::{CandidateResult, SourceStrategy};
use vantage_core::text::tokenize;

use crate::index::Bm25Params;

use super::SearchContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SparseMode {
    /// Query tokens.
    Query,
    /// Entity tokens only.
    Entities,
    /// Query tokens plus entity tokens a second time.
    Boosted,
}

pub fn keywords(query: &str, entities: &[String], mode: SparseMode) -> Vec<String> {
    let entity_tokens = || entities.iter().flat_map(|e| tokenize(e));
    match mode {
        SparseMode::Query => tokenize(query),
        SparseMode::Entities => entity_tokens().collect(),
        SparseMode::Boosted => {
            let mut terms = tokenize(query);
            terms.extend(entity_tokens());
            terms
        }
    }
}

pub fn search(ctx: &SearchContext<'_>, mode: SparseMode) -> Vec<CandidateResult> {
    let terms = keywords(ctx.query, &ctx.analysis.entities, mode);
    let params = Bm25Params::from_config(ctx.config);

    ctx.corpus
        .search(&terms, &params, ctx.filter, ctx.config.sparse_top_k)
        .into_iter()
        .map(|hit| {
            let doc = hit.document;
            let mut metadata = doc.candidate_metadata();
            metadata.insert("bm25".to_string(), json!(hit.raw));
            CandidateResult::new(
                doc.id.clone(),
                doc.title.clone(),
                doc.content.clone(),
                hit.score,
                SourceStrategy::SparseKeyword,
            )
            .with_metadata(metadata)
            .with_timestamp(doc.timestamp)
            .with_reasoning(format!("bm25 {:.3} over {} terms", hit.raw, terms.len()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_modes() {
        let entities = vec!["Acme AI".to_string()];
        let q = "Acme AI funding";
        assert_eq!(keywords(q, &entities, SparseMode::Query), vec!["acme", "ai", "funding"]);
        assert_eq!(keywords(q, &entities, SparseMode::Entities), vec!["acme", "ai"]);
        assert_eq!(
            keywords(q, &entities, SparseMode::Boosted),
            vec!["acme", "ai", "funding", "acme", "ai"]
        );
        assert!(keywords(q, &[], SparseMode::Entities).is_empty());
    }
}
