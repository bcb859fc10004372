//! Strategy selection: pick one backend bundle per query.
//!
//! Each bundle has a suitability predicate and a static weight. Suitable
//! bundles score `weight × (complexity + specificity) / 2`; the highest
//! strictly-greater score wins, so earlier bundles win ties.

use vantage_core::config::RetrievalConfig;
use vantage_core::intent::Intent;
use vantage_core::models::{QueryAnalysis, StrategyName};

/// One backend invocation inside a bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Dense { top_k: usize },
    Sparse,
    /// Sparse search keyed on the analyzer's entities.
    EntitySparse,
    /// Sparse search with entity tokens counted twice.
    BoostedSparse,
    Graph,
    Pattern,
    Temporal,
}

impl BackendKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Dense { .. } => "dense",
            Self::Sparse => "sparse",
            Self::EntitySparse => "entity_sparse",
            Self::BoostedSparse => "boosted_sparse",
            Self::Graph => "graph",
            Self::Pattern => "pattern",
            Self::Temporal => "temporal",
        }
    }
}

/// The selected bundle and why.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyPlan {
    pub name: StrategyName,
    pub weight: f64,
    pub score: f64,
    pub backends: Vec<BackendKind>,
    pub explanation: String,
}

struct Bundle {
    name: StrategyName,
    weight: f64,
    condition: &'static str,
    suitable: fn(&QueryAnalysis) -> bool,
}

fn needs_hybrid(a: &QueryAnalysis) -> bool {
    a.complexity > 0.7 || a.specificity > 0.8
}

fn needs_graph(a: &QueryAnalysis) -> bool {
    a.entities.len() > 2 || a.intent == Intent::Relationship
}

fn needs_semantic(a: &QueryAnalysis) -> bool {
    a.complexity > 0.5
}

fn needs_keywords(a: &QueryAnalysis) -> bool {
    a.specificity > 0.6 || !a.entities.is_empty()
}

fn needs_recency(a: &QueryAnalysis) -> bool {
    a.temporality.has_temporal
}

const BUNDLES: &[Bundle] = &[
    Bundle {
        name: StrategyName::HybridDenseSparse,
        weight: 1.0,
        condition: "complexity > 0.7 or specificity > 0.8",
        suitable: needs_hybrid,
    },
    Bundle {
        name: StrategyName::GraphEnhanced,
        weight: 0.9,
        condition: "more than two entities or a relationship question",
        suitable: needs_graph,
    },
    Bundle {
        name: StrategyName::SemanticSearch,
        weight: 0.8,
        condition: "complexity > 0.5",
        suitable: needs_semantic,
    },
    Bundle {
        name: StrategyName::KeywordBoosted,
        weight: 0.7,
        condition: "specificity > 0.6 or at least one entity",
        suitable: needs_keywords,
    },
    Bundle {
        name: StrategyName::TemporalAware,
        weight: 0.6,
        condition: "time-sensitive query",
        suitable: needs_recency,
    },
];

/// Deterministic bundle selector.
#[derive(Debug, Clone)]
pub struct StrategySelector {
    dense_top_k: usize,
    semantic_dense_top_k: usize,
}

impl StrategySelector {
    pub fn new(config: &RetrievalConfig) -> Self {
        Self {
            dense_top_k: config.dense_top_k,
            semantic_dense_top_k: config.semantic_dense_top_k,
        }
    }

    pub fn select(&self, analysis: &QueryAnalysis) -> StrategyPlan {
        let strength = analysis.strength();
        let mut best: Option<(&Bundle, f64)> = None;
        let mut best_score = 0.0;

        for bundle in BUNDLES {
            if !(bundle.suitable)(analysis) {
                continue;
            }
            let score = bundle.weight * strength;
            if score > best_score {
                best_score = score;
                best = Some((bundle, score));
            }
        }

        match best {
            Some((bundle, score)) => StrategyPlan {
                name: bundle.name,
                weight: bundle.weight,
                score,
                backends: self.backends_for(bundle.name),
                explanation: format!(
                    "{} selected ({}; score {:.3} = {:.1} x {:.3})",
                    bundle.name, bundle.condition, score, bundle.weight, strength
                ),
            },
            None => StrategyPlan {
                name: StrategyName::SemanticSearch,
                weight: 0.8,
                score: 0.0,
                backends: self.backends_for(StrategyName::SemanticSearch),
                explanation: "semantic_search by default (no bundle scored above zero)"
                    .to_string(),
            },
        }
    }

    /// Backends for a bundle, in execution and fusion order.
    pub fn backends_for(&self, name: StrategyName) -> Vec<BackendKind> {
        let dense = BackendKind::Dense {
            top_k: self.dense_top_k,
        };
        match name {
            StrategyName::HybridDenseSparse => {
                vec![dense, BackendKind::Sparse, BackendKind::Pattern]
            }
            StrategyName::GraphEnhanced => {
                vec![BackendKind::Graph, BackendKind::EntitySparse, dense]
            }
            StrategyName::SemanticSearch => vec![
                BackendKind::Dense {
                    top_k: self.semantic_dense_top_k,
                },
                BackendKind::Pattern,
            ],
            StrategyName::KeywordBoosted => vec![BackendKind::BoostedSparse, dense],
            StrategyName::TemporalAware => vec![BackendKind::Temporal, dense],
        }
    }
}

impl Default for StrategySelector {
    fn default() -> Self {
        Self::new(&RetrievalConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vantage_core::models::Temporality;

    fn analysis(complexity: f64, specificity: f64, entities: &[&str]) -> QueryAnalysis {
        QueryAnalysis {
            complexity,
            specificity,
            entities: entities.iter().map(|e| e.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn complex_queries_go_hybrid() {
        let plan = StrategySelector::default().select(&analysis(0.8, 0.5, &[]));
        assert_eq!(plan.name, StrategyName::HybridDenseSparse);
        assert_eq!(
            plan.backends,
            vec![
                BackendKind::Dense { top_k: 10 },
                BackendKind::Sparse,
                BackendKind::Pattern
            ]
        );
        assert!((plan.score - 0.65).abs() < 1e-9);
    }

    #[test]
    fn relationship_questions_go_to_the_graph() {
        let a = QueryAnalysis {
            intent: Intent::Relationship,
            complexity: 0.2,
            specificity: 0.2,
            ..Default::default()
        };
        let plan = StrategySelector::default().select(&a);
        assert_eq!(plan.name, StrategyName::GraphEnhanced);
        assert_eq!(plan.backends[0], BackendKind::Graph);
    }

    #[test]
    fn higher_weight_wins_when_several_bundles_fit() {
        // semantic (0.8) and keyword_boosted (0.7) both fit.
        let plan = StrategySelector::default().select(&analysis(0.6, 0.0, &["Acme"]));
        assert_eq!(plan.name, StrategyName::SemanticSearch);
        assert_eq!(
            plan.backends,
            vec![BackendKind::Dense { top_k: 15 }, BackendKind::Pattern]
        );
    }

    #[test]
    fn single_entity_goes_keyword_boosted() {
        let plan = StrategySelector::default().select(&analysis(0.2, 1.0 / 6.0, &["Acme AI"]));
        assert_eq!(plan.name, StrategyName::KeywordBoosted);
        assert!(plan.explanation.starts_with("keyword_boosted"));
    }

    #[test]
    fn temporal_only_query() {
        let a = QueryAnalysis {
            complexity: 0.2,
            temporality: Temporality {
                has_temporal: true,
                markers: ["latest".to_string()].into(),
            },
            ..Default::default()
        };
        let plan = StrategySelector::default().select(&a);
        assert_eq!(plan.name, StrategyName::TemporalAware);
        assert_eq!(plan.backends, vec![BackendKind::Temporal, BackendKind::Dense { top_k: 10 }]);
    }

    #[test]
    fn zero_strength_falls_back_to_semantic_search() {
        let plan = StrategySelector::default().select(&analysis(0.0, 0.0, &["Acme"]));
        assert_eq!(plan.name, StrategyName::SemanticSearch);
        assert_eq!(plan.score, 0.0);
        assert!(plan.explanation.contains("default"));
    }

    #[test]
    fn selection_is_deterministic() {
        let selector = StrategySelector::default();
        let a = analysis(0.75, 0.9, &["A", "B", "C"]);
        assert_eq!(selector.select(&a), selector.select(&a));
    }
}
