//! Complexity, specificity, and temporality heuristics.

use std::collections::BTreeSet;

use vantage_core::models::Temporality;
use vantage_core::text::has_marker;

use super::markers::{ANALYTICAL_MARKERS, SPECIFICITY_CONCEPTS, TEMPORAL_MARKERS};

const LONG_QUERY_CHARS: usize = 50;
const MANY_WORDS: usize = 10;

pub fn complexity(query: &str, lower: &str, tokens: &[String]) -> f64 {
    let mut score: f64 = 0.0;
    if query.chars().count() > LONG_QUERY_CHARS {
        score += 0.3;
    }
    if query.contains('?') || query.contains('？') {
        score += 0.2;
    }
    if query.split_whitespace().count() > MANY_WORDS {
        score += 0.3;
    }
    if ANALYTICAL_MARKERS.iter().any(|m| has_marker(lower, tokens, m)) {
        score += 0.4;
    }
    score.min(1.0)
}

/// Fraction of the domain concept checklist the query touches.
pub fn specificity(lower: &str, tokens: &[String]) -> f64 {
    let hits = SPECIFICITY_CONCEPTS
        .iter()
        .filter(|(_, forms)| forms.iter().any(|f| has_marker(lower, tokens, f)))
        .count();
    hits as f64 / SPECIFICITY_CONCEPTS.len() as f64
}

pub fn temporality(lower: &str, tokens: &[String]) -> Temporality {
    let markers: BTreeSet<String> = TEMPORAL_MARKERS
        .iter()
        .filter(|m| has_marker(lower, tokens, m))
        .map(|m| m.to_string())
        .collect();
    Temporality {
        has_temporal: !markers.is_empty(),
        markers,
    }
}
