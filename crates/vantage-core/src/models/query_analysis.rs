use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::intent::Intent;

/// Time-sensitivity detected in a query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Temporality {
    pub has_temporal: bool,
    /// Matched time markers.
    pub markers: BTreeSet<String>,
}

/// Derived, per-request description of a query. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryAnalysis {
    pub intent: Intent,
    /// Extracted entities in order of first appearance.
    pub entities: Vec<String>,
    /// [0.0, 1.0]
    pub complexity: f64,
    /// [0.0, 1.0]
    pub specificity: f64,
    pub temporality: Temporality,
}

impl QueryAnalysis {
    /// Mean of complexity and specificity, the selector's scoring basis.
    pub fn strength(&self) -> f64 {
        (self.complexity + self.specificity) / 2.0
    }
}
