//! Fusion and deduplication.
//!
//! Candidates arrive concatenated in backend order with live items last.
//! Blank-content candidates are dropped; of several candidates sharing an
//! identity key the first one is kept, whatever its score. Pure and
//! idempotent.

use std::collections::HashSet;

use tracing::warn;
use vantage_core::models::CandidateResult;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FusionOutcome {
    pub candidates: Vec<CandidateResult>,
    /// Candidates received.
    pub total: usize,
    /// Blank-content candidates dropped.
    pub dropped_malformed: usize,
    /// Later occurrences of an already-seen identity key.
    pub duplicates: usize,
}

pub fn fuse(candidates: Vec<CandidateResult>) -> FusionOutcome {
    let total = candidates.len();
    let mut seen: HashSet<String> = HashSet::with_capacity(total);
    let mut kept = Vec::with_capacity(total);
    let mut dropped_malformed = 0;
    let mut duplicates = 0;

    for candidate in candidates {
        if candidate.content.trim().is_empty() {
            warn!(
                key = %candidate.identity_key(),
                strategy = %candidate.source_strategy.label(),
                "dropping candidate with blank content"
            );
            dropped_malformed += 1;
            continue;
        }
        if seen.insert(candidate.identity_key()) {
            kept.push(candidate);
        } else {
            duplicates += 1;
        }
    }

    FusionOutcome {
        candidates: kept,
        total,
        dropped_malformed,
        duplicates,
    }
}
