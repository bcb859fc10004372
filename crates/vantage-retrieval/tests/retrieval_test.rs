//! End-to-end retrieval over the golden corpus and graph.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use test_fixtures::load_fixture;
use vantage_core::config::VantageConfig;
use vantage_core::errors::VantageResult;
use vantage_core::models::{
    BackendStatus, Document, GraphNode, LiveDataType, LiveItem, LiveOutcome, MetadataFilter,
    RetrieveOptions, SourceStrategy, StrategyName, VectorMatch, VectorQuery,
};
use vantage_core::traits::{IEmbeddingProvider, ILiveSource, IRetriever, IVectorIndex};
use vantage_embeddings::providers::TfIdfFallback;
use vantage_realtime::sources::StaticSource;
use vantage_retrieval::analysis::QueryAnalyzer;
use vantage_retrieval::graph::KnowledgeGraph;
use vantage_retrieval::index::{InMemoryDocumentStore, InMemoryVectorIndex};
use vantage_retrieval::search::graph_search;
use vantage_retrieval::{RetrievalEngine, RetrievalEngineBuilder};

const DIMS: usize = 384;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn corpus() -> Vec<Document> {
    load_fixture("golden/corpus.json")
}

fn graph() -> KnowledgeGraph {
    KnowledgeGraph::new(load_fixture::<Vec<GraphNode>>("golden/graph.json"))
}

async fn builder() -> RetrievalEngineBuilder {
    let docs = corpus();
    let provider: Arc<dyn IEmbeddingProvider> = Arc::new(TfIdfFallback::new(DIMS));
    let index = Arc::new(InMemoryVectorIndex::new());
    index.index_documents(provider.as_ref(), &docs).await.unwrap();

    RetrievalEngineBuilder::new(VantageConfig::default())
        .embedder(provider)
        .vector_index(index)
        .document_store(Arc::new(InMemoryDocumentStore::new(docs)))
        .graph(graph())
}

async fn engine() -> RetrievalEngine {
    builder().await.build().unwrap()
}

fn live_item(id: &str, title: &str, content: &str) -> LiveItem {
    LiveItem {
        id: id.into(),
        title: title.into(),
        content: content.into(),
        source: "Wire".into(),
        timestamp: Some(Utc::now()),
        relevance: None,
        metadata: Default::default(),
    }
}

struct DownProvider;

#[async_trait]
impl IEmbeddingProvider for DownProvider {
    async fn embed(&self, _: &str) -> VantageResult<Vec<f32>> {
        Ok(vec![0.0; DIMS])
    }
    async fn embed_batch(&self, texts: &[String]) -> VantageResult<Vec<Vec<f32>>> {
        Ok(vec![vec![0.0; DIMS]; texts.len()])
    }
    fn dimensions(&self) -> usize {
        DIMS
    }
    fn name(&self) -> &str {
        "down"
    }
    fn is_available(&self) -> bool {
        false
    }
}

struct OfflineIndex;

#[async_trait]
impl IVectorIndex for OfflineIndex {
    async fn query(&self, _: &[f32], _: &VectorQuery) -> VantageResult<Vec<VectorMatch>> {
        Ok(Vec::new())
    }
    fn name(&self) -> &str {
        "offline"
    }
    fn is_available(&self) -> bool {
        false
    }
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[tokio::test]
async fn series_b_question_finds_the_funding_document() {
    let engine = engine().await;
    let response = engine
        .retrieve("What did Acme AI raise in its Series B?", &RetrieveOptions::default())
        .await
        .unwrap();

    assert_eq!(response.metadata.strategy, StrategyName::KeywordBoosted);
    assert_eq!(response.metadata.analysis.entities, vec!["Acme AI", "Series B"]);
    assert!(!response.results.is_empty());

    let top = &response.results[0].candidate;
    assert_eq!(top.id.as_deref(), Some("acme-series-b"));
    let context: Vec<_> = top
        .graph_context
        .as_ref()
        .expect("mentions of graph entities are enriched")
        .iter()
        .map(|n| n.id.as_str())
        .collect();
    assert!(context.contains(&"acme ai"));
    assert_eq!(response.metadata.embedding_provider.as_deref(), Some("tfidf-fallback"));
}

#[test]
fn series_b_entities_traverse_one_hop() {
    let analysis = QueryAnalyzer::new().analyze("What did Acme AI raise in its Series B?");
    let results = graph_search::search(&graph(), &analysis.entities);

    let by_id = |id: &str| results.iter().find(|c| c.id.as_deref() == Some(id)).cloned();
    let direct = by_id("acme ai").unwrap();
    let related = by_id("series-b-2024").unwrap();
    assert_eq!(direct.score, 0.9);
    assert_eq!(direct.source_strategy, SourceStrategy::GraphDirect);
    assert!((related.score - 0.56).abs() < 1e-9);
    assert_eq!(related.source_strategy, SourceStrategy::GraphRelated);
    // Dangling edge skipped, two-hop nodes never reached.
    assert!(by_id("retired-node").is_none());
    assert!(by_id("boreal-robotics").is_none());
}

#[tokio::test]
async fn relationship_question_uses_the_graph_bundle() {
    let engine = engine().await;
    let response = engine
        .retrieve("Who invested in Acme AI?", &RetrieveOptions::default())
        .await
        .unwrap();

    assert_eq!(response.metadata.strategy, StrategyName::GraphEnhanced);
    let backends: Vec<_> = response.metadata.backends.iter().map(|b| b.backend.as_str()).collect();
    assert_eq!(backends, vec!["graph", "entity_sparse", "dense"]);
    assert!(response
        .metadata
        .backends
        .iter()
        .all(|b| b.status == BackendStatus::Ok));
    assert!(response
        .results
        .iter()
        .any(|r| r.candidate.source_strategy == SourceStrategy::GraphDirect));
}

#[tokio::test]
async fn zero_quota_source_is_skipped_and_retrieval_still_answers() {
    let exhausted: Arc<dyn ILiveSource> = Arc::new(
        StaticSource::new(
            "zero-quota",
            LiveDataType::News,
            vec![live_item("1", "never served", "never served")],
        )
        .with_quota(0),
    );
    let engine = builder().await.live_source(exhausted).build().unwrap();

    let response = engine
        .retrieve("latest Acme AI funding news", &RetrieveOptions::default())
        .await
        .unwrap();

    assert!(response.metadata.live.requested);
    assert_eq!(response.metadata.live.rate_limited_sources(), vec!["zero-quota"]);
    assert!(!response.results.is_empty());
    assert!(response
        .results
        .iter()
        .all(|r| !matches!(r.candidate.source_strategy, SourceStrategy::RealTime(_))));
}

#[tokio::test]
async fn fresh_live_items_join_and_lead_the_ranking() {
    let newswire = Arc::new(StaticSource::new(
        "newswire",
        LiveDataType::News,
        vec![live_item("n1", "Acme AI funding news", "Acme AI raises new funding round")],
    ));
    let source: Arc<dyn ILiveSource> = newswire.clone();
    let engine = builder().await.live_source(source).build().unwrap();

    let query = "latest Acme AI funding news";
    let response = engine.retrieve(query, &RetrieveOptions::default()).await.unwrap();
    assert_eq!(response.metadata.live.items, 1);
    assert_eq!(response.metadata.live.sources[0].outcome, LiveOutcome::Fetched);

    let top = &response.results[0].candidate;
    assert_eq!(top.source_strategy, SourceStrategy::RealTime(LiveDataType::News));
    assert_eq!(top.metadata["live_source"], json!("newswire"));

    // Same query again inside the freshness window: served from cache.
    let again = engine.retrieve(query, &RetrieveOptions::default()).await.unwrap();
    assert_eq!(again.metadata.live.sources[0].outcome, LiveOutcome::CacheHit);
    assert_eq!(newswire.calls(), 1);
    assert_eq!(engine.live_stats().sources, 1);
}

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

#[tokio::test]
async fn top_k_caps_the_result_count() {
    let engine = engine().await;
    let response = engine
        .retrieve(
            "Compare Acme AI, Boreal Robotics and Northwind Ventures funding",
            &RetrieveOptions::default().top_k(2),
        )
        .await
        .unwrap();
    assert!(response.results.len() <= 2);
    assert_eq!(response.metadata.final_count, response.results.len());
}

#[tokio::test]
async fn filter_restricts_every_document_backend() {
    let engine = engine().await;
    let response = engine
        .retrieve(
            "人工智能投资趋势",
            &RetrieveOptions::default().filter(MetadataFilter::new().require("lang", "zh")),
        )
        .await
        .unwrap();
    assert!(!response.results.is_empty());
    assert!(response
        .results
        .iter()
        .all(|r| r.candidate.metadata.get("lang") == Some(&json!("zh"))));
}

#[tokio::test]
async fn threshold_removes_weak_results_and_reports_them() {
    let engine = engine().await;
    let response = engine
        .retrieve("Acme AI funding", &RetrieveOptions::default().threshold(0.99))
        .await
        .unwrap();
    assert!(response.results.is_empty());
    assert!(response.metadata.below_threshold > 0);
}

#[tokio::test]
async fn results_are_unique_and_scored_in_range() {
    let engine = engine().await;
    let response = engine
        .retrieve("Acme AI valuation and funding round", &RetrieveOptions::default())
        .await
        .unwrap();

    let mut keys = HashSet::new();
    for r in &response.results {
        assert!(keys.insert(r.candidate.identity_key()));
        assert!((0.0..=1.0).contains(&r.score));
    }
    let scores: Vec<f64> = response.results.iter().map(|r| r.score).collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    assert!(response.metadata.deduplicated_candidates <= response.metadata.total_candidates);
}

#[tokio::test]
async fn empty_query_is_not_an_error() {
    let engine = engine().await;
    assert!(engine.retrieve("", &RetrieveOptions::default()).await.is_ok());
}

#[tokio::test]
async fn queries_are_logged() {
    let engine = engine().await;
    engine.retrieve("Acme AI", &RetrieveOptions::default()).await.unwrap();
    let retriever: &dyn IRetriever = &engine;
    retriever.retrieve("Boreal Robotics", &RetrieveOptions::default()).await.unwrap();

    let log = engine.recent_queries();
    assert_eq!(log.len(), 2);
    assert_eq!(log[1].query, "Boreal Robotics");
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unavailable_embedder_is_a_configuration_error() {
    let provider: Arc<dyn IEmbeddingProvider> = Arc::new(DownProvider);
    let engine = RetrievalEngineBuilder::new(VantageConfig::default())
        .embedder(provider)
        .vector_index(Arc::new(InMemoryVectorIndex::new()))
        .build()
        .unwrap();
    let err = engine.retrieve("Acme AI", &RetrieveOptions::default()).await.unwrap_err();
    assert!(err.is_configuration());
}

#[tokio::test]
async fn unavailable_vector_index_is_a_configuration_error() {
    let provider: Arc<dyn IEmbeddingProvider> = Arc::new(TfIdfFallback::new(DIMS));
    let engine = RetrievalEngineBuilder::new(VantageConfig::default())
        .embedder(provider)
        .vector_index(Arc::new(OfflineIndex))
        .build()
        .unwrap();
    let err = engine.retrieve("Acme AI", &RetrieveOptions::default()).await.unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn missing_vector_index_fails_the_build() {
    let provider: Arc<dyn IEmbeddingProvider> = Arc::new(TfIdfFallback::new(DIMS));
    let result = RetrievalEngineBuilder::new(VantageConfig::default())
        .embedder(provider)
        .build();
    assert!(matches!(result, Err(e) if e.is_configuration()));
}

#[tokio::test]
async fn corpus_refresh_picks_up_new_documents() {
    let store = Arc::new(InMemoryDocumentStore::new(Vec::new()));
    let provider: Arc<dyn IEmbeddingProvider> = Arc::new(TfIdfFallback::new(DIMS));
    let engine = RetrievalEngineBuilder::new(VantageConfig::default())
        .embedder(provider)
        .vector_index(Arc::new(InMemoryVectorIndex::new()))
        .document_store(store.clone())
        .build()
        .unwrap();

    store
        .insert(Document::new("late", "Late arrival", "Cinder Labs raised a seed round"))
        .unwrap();
    assert_eq!(engine.refresh_corpus().unwrap(), 1);

    let response = engine
        .retrieve("Cinder Labs seed round", &RetrieveOptions::default())
        .await
        .unwrap();
    assert!(response.results.iter().any(|r| r.candidate.id.as_deref() == Some("late")));
}
