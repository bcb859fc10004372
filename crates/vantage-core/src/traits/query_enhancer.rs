use async_trait::async_trait;
use serde::Deserialize;

use crate::errors::VantageResult;
use crate::intent::Intent;
use crate::models::QueryAnalysis;

/// Partial override of a heuristic [`QueryAnalysis`]. Absent fields keep
/// the heuristic value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnalysisRefinement {
    pub intent: Option<String>,
    pub entities: Option<Vec<String>>,
    pub complexity: Option<f64>,
    pub specificity: Option<f64>,
}

impl AnalysisRefinement {
    /// Extract the first JSON object from free-form model output.
    ///
    /// Returns `None` when there is no parseable object.
    pub fn parse(text: &str) -> Option<Self> {
        let start = text.find('{')?;
        let end = text.rfind('}')?;
        if end < start {
            return None;
        }
        serde_json::from_str(&text[start..=end]).ok()
    }

    /// Apply onto `analysis`. Unknown intent labels and out-of-range scores
    /// are ignored field by field.
    pub fn apply(&self, analysis: &mut QueryAnalysis) {
        if let Some(intent) = self.intent.as_deref().and_then(Intent::parse) {
            analysis.intent = intent;
        }
        if let Some(entities) = &self.entities {
            let cleaned: Vec<String> = entities
                .iter()
                .map(|e| e.trim().to_string())
                .filter(|e| !e.is_empty())
                .collect();
            if !cleaned.is_empty() {
                analysis.entities = cleaned;
            }
        }
        if let Some(c) = self.complexity.filter(|c| (0.0..=1.0).contains(c)) {
            analysis.complexity = c;
        }
        if let Some(s) = self.specificity.filter(|s| (0.0..=1.0).contains(s)) {
            analysis.specificity = s;
        }
    }
}

/// Optional refinement step layered over the rule-based analyzer.
#[async_trait]
pub trait IQueryEnhancer: Send + Sync {
    async fn refine(&self, query: &str, heuristic: &QueryAnalysis)
        -> VantageResult<AnalysisRefinement>;

    fn name(&self) -> &str;
}
