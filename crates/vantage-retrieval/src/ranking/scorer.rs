//! Five-factor scorer.
//!
//! Factors: content relevance, title relevance, freshness, authority,
//! diversity. Each is in [0, 1]; the composite is their weighted sum,
//! clamped.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use vantage_core::config::RankingWeights;
use vantage_core::models::{CandidateResult, ScoreBreakdown};
use vantage_core::text::{clamp_unit, jaccard, tokenize, word_set};

const WHOLE_WORD_HIT: f64 = 0.8;
const SUBSTRING_HIT: f64 = 0.5;
const FRESHNESS_FLOOR: f64 = 0.1;
const FRESHNESS_UNKNOWN: f64 = 0.5;
const FRESHNESS_HORIZON_SECS: f64 = 24.0 * 3600.0;

/// Term-match relevance of `text` for `terms`.
///
/// Per term: 0.8 for a whole-word match, 0.5 for a substring match. The sum
/// is multiplied by coverage and divided by the term count.
pub fn relevance(terms: &[String], text: &str) -> f64 {
    if terms.is_empty() || text.is_empty() {
        return 0.0;
    }
    let lower = text.to_lowercase();
    let words: HashSet<String> = tokenize(text).into_iter().collect();

    let mut sum = 0.0;
    let mut matched = 0usize;
    for term in terms {
        if words.contains(term) {
            sum += WHOLE_WORD_HIT;
            matched += 1;
        } else if lower.contains(term.as_str()) {
            sum += SUBSTRING_HIT;
            matched += 1;
        }
    }
    let n = terms.len() as f64;
    let coverage = matched as f64 / n;
    (sum * coverage / n).min(1.0)
}

/// 1.0 for now or the future, linear down to 0.1 at 24 h, 0.1 after;
/// 0.5 when the age is unknown.
pub fn freshness(timestamp: Option<DateTime<Utc>>, now: DateTime<Utc>) -> f64 {
    let Some(ts) = timestamp else {
        return FRESHNESS_UNKNOWN;
    };
    let age = (now - ts).num_milliseconds() as f64 / 1000.0;
    if age <= 0.0 {
        1.0
    } else if age >= FRESHNESS_HORIZON_SECS {
        FRESHNESS_FLOOR
    } else {
        1.0 - (1.0 - FRESHNESS_FLOOR) * age / FRESHNESS_HORIZON_SECS
    }
}

/// 1 − mean Jaccard similarity of candidate `index` against every other
/// word set; 1.0 when it stands alone.
pub fn diversity(index: usize, word_sets: &[HashSet<String>]) -> f64 {
    if word_sets.len() < 2 {
        return 1.0;
    }
    let total: f64 = word_sets
        .iter()
        .enumerate()
        .filter(|(j, _)| *j != index)
        .map(|(_, other)| jaccard(&word_sets[index], other))
        .sum();
    1.0 - total / (word_sets.len() - 1) as f64
}

pub fn composite(breakdown: &ScoreBreakdown, weights: &RankingWeights) -> f64 {
    clamp_unit(
        weights.content * breakdown.content_relevance
            + weights.title * breakdown.title_relevance
            + weights.freshness * breakdown.freshness
            + weights.authority * breakdown.authority
            + weights.diversity * breakdown.diversity,
    )
}

/// Content word sets used for diversity.
pub fn word_sets(candidates: &[CandidateResult]) -> Vec<HashSet<String>> {
    candidates.iter().map(|c| word_set(&c.content)).collect()
}
