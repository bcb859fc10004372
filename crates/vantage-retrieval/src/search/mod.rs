//! Multi-strategy executor: runs one bundle's backends concurrently, each
//! under a timeout, and concatenates their candidates in declared order.
//!
//! A backend that errors or times out contributes nothing and leaves a
//! failure report; it never fails the request.

pub mod dense;
pub mod graph_search;
pub mod pattern;
pub mod sparse;
pub mod temporal;

use std::time::{Duration, Instant};

use futures::future::join_all;
use tracing::{debug, warn};
use vantage_core::config::RetrievalConfig;
use vantage_core::errors::VantageResult;
use vantage_core::models::{BackendReport, BackendStatus, CandidateResult, MetadataFilter, QueryAnalysis};
use vantage_core::traits::IVectorIndex;
use vantage_embeddings::EmbeddingEngine;

use crate::graph::KnowledgeGraph;
use crate::index::LexicalIndex;
use crate::strategy::BackendKind;

use sparse::SparseMode;

/// Everything a backend may read for one query.
pub struct SearchContext<'a> {
    pub query: &'a str,
    /// Query text for embedding, after synonym expansion.
    pub dense_query: &'a str,
    pub analysis: &'a QueryAnalysis,
    pub filter: Option<&'a MetadataFilter>,
    pub config: &'a RetrievalConfig,
    pub corpus: &'a LexicalIndex,
    pub graph: &'a KnowledgeGraph,
    pub embedder: &'a EmbeddingEngine,
    pub vector_index: &'a dyn IVectorIndex,
}

#[derive(Debug, Clone, Default)]
pub struct BackendOutput {
    pub candidates: Vec<CandidateResult>,
    /// Set by backends that embedded the query.
    pub embedding_provider: Option<String>,
}

impl From<Vec<CandidateResult>> for BackendOutput {
    fn from(candidates: Vec<CandidateResult>) -> Self {
        Self {
            candidates,
            embedding_provider: None,
        }
    }
}

/// Concatenated candidates plus one report per backend.
#[derive(Debug, Clone, Default)]
pub struct ExecutionOutcome {
    pub candidates: Vec<CandidateResult>,
    pub reports: Vec<BackendReport>,
    pub embedding_provider: Option<String>,
}

#[derive(Debug, Clone)]
pub struct MultiStrategyExecutor {
    timeout: Duration,
}

impl MultiStrategyExecutor {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn from_config(config: &RetrievalConfig) -> Self {
        Self::new(Duration::from_millis(config.backend_timeout_ms))
    }

    pub async fn execute(&self, backends: &[BackendKind], ctx: &SearchContext<'_>) -> ExecutionOutcome {
        let runs = backends.iter().map(|kind| self.run(*kind, ctx));
        let finished = join_all(runs).await;

        let mut outcome = ExecutionOutcome::default();
        for (kind, result, elapsed) in finished {
            let elapsed_ms = elapsed.as_millis() as u64;
            let (candidates, status) = match result {
                Ok(output) => {
                    if outcome.embedding_provider.is_none() {
                        outcome.embedding_provider = output.embedding_provider;
                    }
                    (output.candidates, BackendStatus::Ok)
                }
                Err(status) => (Vec::new(), status),
            };
            debug!(backend = kind.name(), candidates = candidates.len(), elapsed_ms, "backend finished");
            outcome.reports.push(BackendReport {
                backend: kind.name().to_string(),
                candidates: candidates.len(),
                elapsed_ms,
                status,
            });
            outcome.candidates.extend(candidates);
        }
        outcome
    }

    async fn run(
        &self,
        kind: BackendKind,
        ctx: &SearchContext<'_>,
    ) -> (BackendKind, Result<BackendOutput, BackendStatus>, Duration) {
        let started = Instant::now();
        let result = match tokio::time::timeout(self.timeout, dispatch(kind, ctx)).await {
            Ok(Ok(output)) => Ok(output),
            Ok(Err(e)) => {
                warn!(backend = kind.name(), error = %e, "backend failed, contributing no candidates");
                Err(BackendStatus::Failed {
                    reason: e.to_string(),
                })
            }
            Err(_) => {
                let timeout_ms = self.timeout.as_millis() as u64;
                warn!(backend = kind.name(), timeout_ms, "backend timed out, contributing no candidates");
                Err(BackendStatus::TimedOut { timeout_ms })
            }
        };
        (kind, result, started.elapsed())
    }
}

async fn dispatch(kind: BackendKind, ctx: &SearchContext<'_>) -> VantageResult<BackendOutput> {
    match kind {
        BackendKind::Dense { top_k } => dense::search(ctx, top_k).await,
        BackendKind::Temporal => temporal::search(ctx, ctx.config.dense_top_k).await,
        BackendKind::Sparse => Ok(sparse::search(ctx, SparseMode::Query).into()),
        BackendKind::EntitySparse => Ok(sparse::search(ctx, SparseMode::Entities).into()),
        BackendKind::BoostedSparse => Ok(sparse::search(ctx, SparseMode::Boosted).into()),
        BackendKind::Graph => Ok(graph_search::search(ctx.graph, &ctx.analysis.entities).into()),
        BackendKind::Pattern => Ok(pattern::search(ctx).into()),
    }
}
