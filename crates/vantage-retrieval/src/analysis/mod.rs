//! Query analysis: a deterministic rule-based analyzer, optionally wrapped
//! by an enhancer that refines its output.

mod enhancer;
mod entities;
mod intent;
pub mod markers;
mod scoring;

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};
use vantage_core::models::QueryAnalysis;
use vantage_core::text::tokenize;
use vantage_core::traits::IQueryEnhancer;

pub use enhancer::HttpQueryEnhancer;
pub use entities::extract as extract_entities;
pub use intent::classify as classify_intent;

/// Rule-based, bilingual analyzer. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryAnalyzer;

impl QueryAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, query: &str) -> QueryAnalysis {
        let lower = query.to_lowercase();
        let tokens = tokenize(query);

        QueryAnalysis {
            intent: intent::classify(&lower, &tokens),
            entities: entities::extract(query),
            complexity: scoring::complexity(query, &lower, &tokens),
            specificity: scoring::specificity(&lower, &tokens),
            temporality: scoring::temporality(&lower, &tokens),
        }
    }
}

/// Decorator: heuristic analysis first, then an optional refinement pass.
///
/// Enhancer errors, timeouts, and unparseable output leave the heuristic
/// result untouched.
pub struct EnhancedAnalyzer {
    analyzer: QueryAnalyzer,
    enhancer: Option<Arc<dyn IQueryEnhancer>>,
    timeout: Duration,
}

impl EnhancedAnalyzer {
    pub fn new(enhancer: Option<Arc<dyn IQueryEnhancer>>, timeout: Duration) -> Self {
        Self {
            analyzer: QueryAnalyzer::new(),
            enhancer,
            timeout,
        }
    }

    pub fn heuristic_only() -> Self {
        Self::new(None, Duration::ZERO)
    }

    pub fn has_enhancer(&self) -> bool {
        self.enhancer.is_some()
    }

    pub async fn analyze(&self, query: &str) -> QueryAnalysis {
        let mut analysis = self.analyzer.analyze(query);
        let Some(enhancer) = &self.enhancer else {
            return analysis;
        };

        match tokio::time::timeout(self.timeout, enhancer.refine(query, &analysis)).await {
            Ok(Ok(refinement)) => {
                refinement.apply(&mut analysis);
                debug!(enhancer = enhancer.name(), intent = %analysis.intent, "analysis refined");
            }
            Ok(Err(e)) => {
                warn!(enhancer = enhancer.name(), error = %e, "query enhancer failed, keeping heuristic analysis");
            }
            Err(_) => {
                warn!(
                    enhancer = enhancer.name(),
                    timeout_ms = self.timeout.as_millis() as u64,
                    "query enhancer timed out, keeping heuristic analysis"
                );
            }
        }
        analysis
    }
}
