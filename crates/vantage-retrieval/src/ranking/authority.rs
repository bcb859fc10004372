//! Source trust table.

use std::collections::BTreeMap;

use vantage_core::config::RetrievalConfig;
use vantage_core::models::{CandidateResult, SourceStrategy};

#[derive(Debug, Clone)]
pub struct AuthorityTable {
    table: BTreeMap<String, f64>,
    default: f64,
}

/// Table key implied by the producing backend when the candidate carries
/// no known source label.
fn strategy_key(strategy: &SourceStrategy) -> String {
    match strategy {
        SourceStrategy::DenseVector | SourceStrategy::Temporal => "dense".to_string(),
        SourceStrategy::SparseKeyword => "sparse".to_string(),
        SourceStrategy::GraphDirect | SourceStrategy::GraphRelated => "knowledge_base".to_string(),
        SourceStrategy::SemanticPattern => "pattern".to_string(),
        SourceStrategy::RealTime(_) => strategy.label(),
    }
}

impl AuthorityTable {
    pub fn new(table: BTreeMap<String, f64>, default: f64) -> Self {
        Self { table, default }
    }

    pub fn from_config(config: &RetrievalConfig) -> Self {
        Self::new(config.authority.clone(), config.default_authority)
    }

    pub fn get(&self, label: &str) -> Option<f64> {
        self.table.get(label).copied()
    }

    /// Source label first, then the backend's key, then the default.
    pub fn score(&self, candidate: &CandidateResult) -> f64 {
        candidate
            .source_label()
            .and_then(|label| self.get(label))
            .or_else(|| self.get(&strategy_key(&candidate.source_strategy)))
            .unwrap_or(self.default)
    }
}

impl Default for AuthorityTable {
    fn default() -> Self {
        Self::from_config(&RetrievalConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use vantage_core::models::LiveDataType;

    fn candidate(strategy: SourceStrategy, source: Option<&str>) -> CandidateResult {
        let c = CandidateResult::new(None, "", "c", 0.5, strategy);
        match source {
            Some(s) => c.with_metadata([("source".to_string(), json!(s))].into()),
            None => c,
        }
    }

    #[test]
    fn trust_ordering() {
        let table = AuthorityTable::default();
        let kb = table.score(&candidate(SourceStrategy::GraphDirect, None));
        let market = table.score(&candidate(SourceStrategy::RealTime(LiveDataType::Market), None));
        let company = table.score(&candidate(SourceStrategy::RealTime(LiveDataType::Company), None));
        let news = table.score(&candidate(SourceStrategy::RealTime(LiveDataType::News), None));
        let dense = table.score(&candidate(SourceStrategy::DenseVector, None));
        let sparse = table.score(&candidate(SourceStrategy::SparseKeyword, None));
        assert_eq!((kb, market, company, news, dense, sparse), (0.9, 0.8, 0.8, 0.7, 0.6, 0.5));
    }

    #[test]
    fn source_label_takes_precedence() {
        let table = AuthorityTable::default();
        let c = candidate(SourceStrategy::SparseKeyword, Some("knowledge_base"));
        assert_eq!(table.score(&c), 0.9);
    }

    #[test]
    fn unknown_sources_get_the_default() {
        let table = AuthorityTable::default();
        assert_eq!(table.score(&candidate(SourceStrategy::SemanticPattern, Some("blog"))), 0.5);
    }
}
