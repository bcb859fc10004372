//! Recency-aware dense search: same hits, newest first among equal similarity.

use std::cmp::Ordering;

use vantage_core::errors::VantageResult;
use vantage_core::models::{CandidateResult, SourceStrategy};

use super::{dense, BackendOutput, SearchContext};

pub async fn search(ctx: &SearchContext<'_>, top_k: usize) -> VantageResult<BackendOutput> {
    if !ctx.analysis.temporality.has_temporal {
        return Ok(BackendOutput::default());
    }
    let mut output = dense::search(ctx, top_k).await?;
    output.candidates = reorder(output.candidates);
    Ok(output)
}

/// Sort by (similarity desc, timestamp desc) and tag as temporal.
/// Undated candidates sort after dated ones at equal similarity.
pub fn reorder(candidates: Vec<CandidateResult>) -> Vec<CandidateResult> {
    let mut retagged: Vec<CandidateResult> = candidates
        .into_iter()
        .map(|c| CandidateResult {
            source_strategy: SourceStrategy::Temporal,
            ..c
        })
        .collect();
    retagged.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.timestamp.cmp(&a.timestamp))
    });
    retagged
}
