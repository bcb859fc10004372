//! RetrievalEngine: implements IRetriever, orchestrates the full pipeline.
//!
//! analyze → select bundle → (backends ∥ live fetch) → fuse → re-rank →
//! graph-context enrichment.
//!
//! Process-wide state (embedding cache, live cache, rate counters, query log)
//! lives in fields of one long-lived engine; callers share it behind an `Arc`.

use std::sync::{Arc, Mutex, RwLock};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use tracing::{debug, info, warn};
use vantage_core::config::VantageConfig;
use vantage_core::errors::{VantageError, VantageResult};
use vantage_core::models::{
    CandidateResult, RetrievalMetadata, RetrievalResponse, RetrieveOptions, SourceStrategy,
};
use vantage_core::observability::{QueryLog, QueryLogEntry};
use vantage_core::traits::{
    IDocumentStore, IEmbeddingProvider, ILiveSource, IQueryEnhancer, IRetriever, IVectorIndex,
};
use vantage_embeddings::EmbeddingEngine;
use vantage_realtime::{FetchedItem, FetcherStats, RealTimeFetcher};

use crate::analysis::EnhancedAnalyzer;
use crate::enrichment;
use crate::expansion::{ExpandedQuery, SynonymExpander};
use crate::fusion;
use crate::graph::KnowledgeGraph;
use crate::index::LexicalIndex;
use crate::ranking::RankingPipeline;
use crate::search::{MultiStrategyExecutor, SearchContext};
use crate::strategy::StrategySelector;

pub struct RetrievalEngine {
    config: VantageConfig,
    analyzer: EnhancedAnalyzer,
    selector: StrategySelector,
    expander: SynonymExpander,
    executor: MultiStrategyExecutor,
    ranking: RankingPipeline,
    embedder: Arc<EmbeddingEngine>,
    vector_index: Arc<dyn IVectorIndex>,
    document_store: Option<Arc<dyn IDocumentStore>>,
    corpus: RwLock<Arc<LexicalIndex>>,
    graph: RwLock<Arc<KnowledgeGraph>>,
    fetcher: RealTimeFetcher,
    query_log: Mutex<QueryLog>,
}

/// Assembles a [`RetrievalEngine`]. An embedder and a vector index are
/// required; everything else is optional.
pub struct RetrievalEngineBuilder {
    config: VantageConfig,
    embedder: Option<Arc<EmbeddingEngine>>,
    vector_index: Option<Arc<dyn IVectorIndex>>,
    document_store: Option<Arc<dyn IDocumentStore>>,
    graph: KnowledgeGraph,
    live_sources: Vec<Arc<dyn ILiveSource>>,
    enhancer: Option<Arc<dyn IQueryEnhancer>>,
}

impl RetrievalEngineBuilder {
    pub fn new(config: VantageConfig) -> Self {
        Self {
            config,
            embedder: None,
            vector_index: None,
            document_store: None,
            graph: KnowledgeGraph::default(),
            live_sources: Vec::new(),
            enhancer: None,
        }
    }

    pub fn embedding_engine(mut self, engine: EmbeddingEngine) -> Self {
        self.embedder = Some(Arc::new(engine));
        self
    }

    /// Wrap a single provider in an embedding engine with its own cache.
    pub fn embedder(mut self, provider: Arc<dyn IEmbeddingProvider>) -> Self {
        self.embedder = Some(Arc::new(EmbeddingEngine::from_provider(provider)));
        self
    }

    pub fn vector_index(mut self, index: Arc<dyn IVectorIndex>) -> Self {
        self.vector_index = Some(index);
        self
    }

    pub fn document_store(mut self, store: Arc<dyn IDocumentStore>) -> Self {
        self.document_store = Some(store);
        self
    }

    pub fn graph(mut self, graph: KnowledgeGraph) -> Self {
        self.graph = graph;
        self
    }

    pub fn live_source(mut self, source: Arc<dyn ILiveSource>) -> Self {
        self.live_sources.push(source);
        self
    }

    pub fn query_enhancer(mut self, enhancer: Arc<dyn IQueryEnhancer>) -> Self {
        self.enhancer = Some(enhancer);
        self
    }

    pub fn build(self) -> VantageResult<RetrievalEngine> {
        let embedder = self
            .embedder
            .ok_or_else(|| VantageError::configuration("embedding", "no embedding provider configured"))?;
        let vector_index = self
            .vector_index
            .ok_or_else(|| VantageError::configuration("vector_index", "no vector index configured"))?;

        let corpus = match &self.document_store {
            Some(store) => load_corpus(store.as_ref())?,
            None => LexicalIndex::default(),
        };

        let mut fetcher = RealTimeFetcher::from_config(self.config.realtime.clone())?;
        for source in self.live_sources {
            fetcher.add_source(source);
        }

        let retrieval = &self.config.retrieval;
        let analyzer = EnhancedAnalyzer::new(
            self.enhancer,
            Duration::from_millis(retrieval.enhancer_timeout_ms),
        );

        info!(
            documents = corpus.len(),
            graph_nodes = self.graph.len(),
            vector_index = vector_index.name(),
            embedding_provider = embedder.active_provider(),
            enhancer = analyzer.has_enhancer(),
            "RetrievalEngine initialized"
        );

        Ok(RetrievalEngine {
            selector: StrategySelector::new(retrieval),
            expander: SynonymExpander::new(retrieval.max_expansions),
            executor: MultiStrategyExecutor::from_config(retrieval),
            ranking: RankingPipeline::from_config(retrieval),
            query_log: Mutex::new(QueryLog::with_capacity(
                self.config.observability.query_log_capacity,
            )),
            analyzer,
            embedder,
            vector_index,
            document_store: self.document_store,
            corpus: RwLock::new(Arc::new(corpus)),
            graph: RwLock::new(Arc::new(self.graph)),
            fetcher,
            config: self.config,
        })
    }
}

fn load_corpus(store: &dyn IDocumentStore) -> VantageResult<LexicalIndex> {
    let documents = store
        .documents()
        .map_err(|e| VantageError::configuration("document_store", e.to_string()))?;
    Ok(LexicalIndex::build(documents))
}

/// Live items join the candidate list last, tagged by data type.
fn live_candidate(fetched: FetchedItem) -> CandidateResult {
    let FetchedItem {
        source_name,
        data_type,
        item,
    } = fetched;
    let strategy = SourceStrategy::RealTime(data_type);
    let id = (!item.id.is_empty()).then(|| format!("{source_name}:{}", item.id));

    let mut metadata = item.metadata;
    metadata.insert("source".to_string(), json!(strategy.label()));
    metadata.insert("live_source".to_string(), json!(source_name));
    if !item.source.is_empty() {
        metadata.insert("feed".to_string(), json!(item.source));
    }

    CandidateResult::new(id, item.title, item.content, item.relevance.unwrap_or(0.0), strategy)
        .with_metadata(metadata)
        .with_timestamp(item.timestamp)
        .with_reasoning(format!("live {} data from {source_name}", data_type.as_str()))
}

impl RetrievalEngine {
    pub fn builder(config: VantageConfig) -> RetrievalEngineBuilder {
        RetrievalEngineBuilder::new(config)
    }

    /// Engine with the configured embedding chain and HTTP live sources.
    pub fn from_config(config: VantageConfig, vector_index: Arc<dyn IVectorIndex>) -> VantageResult<Self> {
        let embedding = EmbeddingEngine::new(config.embedding.clone())?;
        RetrievalEngineBuilder::new(config)
            .embedding_engine(embedding)
            .vector_index(vector_index)
            .build()
    }

    pub fn config(&self) -> &VantageConfig {
        &self.config
    }

    /// Required collaborators must be present and available.
    fn ensure_available(&self) -> VantageResult<()> {
        if !IEmbeddingProvider::is_available(self.embedder.as_ref()) {
            return Err(VantageError::configuration(
                "embedding",
                "no embedding provider is available",
            ));
        }
        if !self.vector_index.is_available() {
            return Err(VantageError::configuration(
                "vector_index",
                format!("vector index {} is unavailable", self.vector_index.name()),
            ));
        }
        Ok(())
    }

    fn corpus(&self) -> Arc<LexicalIndex> {
        let guard = self.corpus.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    fn knowledge_graph(&self) -> Arc<KnowledgeGraph> {
        let guard = self.graph.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    /// Reload the corpus from the document store. Returns the document count.
    pub fn refresh_corpus(&self) -> VantageResult<usize> {
        let Some(store) = &self.document_store else {
            return Ok(0);
        };
        let corpus = load_corpus(store.as_ref())?;
        let count = corpus.len();
        *self.corpus.write().unwrap_or_else(|e| e.into_inner()) = Arc::new(corpus);
        info!(documents = count, "corpus refreshed");
        Ok(count)
    }

    pub fn replace_graph(&self, graph: KnowledgeGraph) {
        let nodes = graph.len();
        *self.graph.write().unwrap_or_else(|e| e.into_inner()) = Arc::new(graph);
        info!(nodes, "knowledge graph replaced");
    }

    pub fn recent_queries(&self) -> Vec<QueryLogEntry> {
        self.query_log
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .entries()
            .cloned()
            .collect()
    }

    pub fn live_stats(&self) -> FetcherStats {
        self.fetcher.stats()
    }

    /// Evict live cache entries past the eviction age.
    pub fn sweep_live_cache(&self) -> usize {
        self.fetcher.sweep_expired()
    }

    /// Run the full pipeline for one query.
    pub async fn retrieve(
        &self,
        query: &str,
        options: &RetrieveOptions,
    ) -> VantageResult<RetrievalResponse> {
        let started = Instant::now();
        self.ensure_available()?;

        let retrieval = &self.config.retrieval;
        let top_k = options.top_k.unwrap_or(retrieval.default_top_k);

        // Step 1: Analyze.
        let analysis = self.analyzer.analyze(query).await;
        debug!(
            intent = %analysis.intent,
            entities = analysis.entities.len(),
            complexity = analysis.complexity,
            specificity = analysis.specificity,
            temporal = analysis.temporality.has_temporal,
            "query analyzed"
        );

        // Step 2: Select a bundle and expand the query for dense search.
        let plan = self.selector.select(&analysis);
        let expanded = if retrieval.query_expansion {
            self.expander.expand(query)
        } else {
            ExpandedQuery::unchanged(query)
        };
        debug!(strategy = %plan.name, additions = ?expanded.additions, "strategy selected");

        // Step 3: Backends and live fetch, concurrently.
        let corpus = self.corpus();
        let graph = self.knowledge_graph();
        let ctx = SearchContext {
            query,
            dense_query: &expanded.text,
            analysis: &analysis,
            filter: options.filter.as_ref(),
            config: retrieval,
            corpus: &corpus,
            graph: &graph,
            embedder: &self.embedder,
            vector_index: self.vector_index.as_ref(),
        };
        let (execution, live) = tokio::join!(
            self.executor.execute(&plan.backends, &ctx),
            self.fetcher.fetch(query, &analysis)
        );
        for event in self.embedder.drain_degradation_events() {
            warn!(
                component = %event.component,
                failure = %event.failure,
                fallback = %event.fallback_used,
                "embedding degraded"
            );
        }

        // Step 4: Fuse, live items last.
        let mut candidates = execution.candidates;
        candidates.extend(live.items.into_iter().map(live_candidate));
        let fused = fusion::fuse(candidates);
        let deduplicated = fused.candidates.len();

        // Step 5: Re-rank and enrich.
        let ranked = self.ranking.rank(query, fused.candidates, top_k, options.threshold, Utc::now());
        let results = if retrieval.graph_context_enrichment {
            enrichment::enrich(ranked.results, &graph, retrieval.max_graph_context)
        } else {
            ranked.results
        };

        let elapsed = started.elapsed();
        let metadata = RetrievalMetadata {
            strategy: plan.name,
            strategy_explanation: plan.explanation,
            elapsed_ms: elapsed.as_millis() as u64,
            backends: execution.reports,
            total_candidates: fused.total,
            deduplicated_candidates: deduplicated,
            dropped_candidates: fused.dropped_malformed + ranked.dropped,
            below_threshold: ranked.below_threshold,
            final_count: results.len(),
            embedding_provider: execution.embedding_provider,
            live: live.report,
            analysis,
        };

        info!(
            strategy = %metadata.strategy,
            intent = %metadata.analysis.intent,
            candidates = metadata.total_candidates,
            deduplicated = metadata.deduplicated_candidates,
            results = metadata.final_count,
            live_items = metadata.live.items,
            rate_limited = metadata.live.rate_limited_sources().len(),
            elapsed_ms = metadata.elapsed_ms,
            "retrieval complete"
        );

        self.query_log
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .record(QueryLogEntry::new(
                query,
                metadata.analysis.intent,
                metadata.strategy,
                elapsed,
                metadata.final_count,
                metadata.live.cache_hits(),
            ));

        Ok(RetrievalResponse { results, metadata })
    }
}

#[async_trait]
impl IRetriever for RetrievalEngine {
    async fn retrieve(&self, query: &str, options: &RetrieveOptions) -> VantageResult<RetrievalResponse> {
        RetrievalEngine::retrieve(self, query, options).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vantage_core::models::{LiveDataType, LiveItem};

    #[test]
    fn live_candidates_are_namespaced_and_tagged() {
        let fetched = FetchedItem {
            source_name: "market-feed".into(),
            data_type: LiveDataType::Market,
            item: LiveItem {
                id: "7".into(),
                title: "Acme valuation".into(),
                content: "Acme valued at $2B".into(),
                source: "Market Wire".into(),
                timestamp: None,
                relevance: Some(0.7),
                metadata: Default::default(),
            },
        };
        let c = live_candidate(fetched);
        assert_eq!(c.id.as_deref(), Some("market-feed:7"));
        assert_eq!(c.source_strategy, SourceStrategy::RealTime(LiveDataType::Market));
        assert_eq!(c.source_label(), Some("realtime_market"));
        assert_eq!(c.metadata["live_source"], json!("market-feed"));
        assert_eq!(c.score, 0.7);
    }

    #[test]
    fn build_requires_embedder_and_index() {
        let err = RetrievalEngineBuilder::new(VantageConfig::default())
            .build()
            .err()
            .unwrap();
        assert!(err.is_configuration());
    }
}
