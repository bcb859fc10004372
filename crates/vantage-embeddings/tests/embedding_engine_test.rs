//! Engine behaviour under provider failure.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use vantage_core::config::EmbeddingConfig;
use vantage_core::errors::{EmbeddingError, VantageResult};
use vantage_core::traits::IEmbeddingProvider;
use vantage_embeddings::providers::TfIdfFallback;
use vantage_embeddings::EmbeddingEngine;

/// Fails every call and counts attempts.
#[derive(Default)]
struct FlakyProvider {
    calls: AtomicUsize,
}

#[async_trait]
impl IEmbeddingProvider for FlakyProvider {
    async fn embed(&self, _text: &str) -> VantageResult<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(EmbeddingError::InferenceFailed {
            reason: "model server restarting".to_string(),
        }
        .into())
    }
    async fn embed_batch(&self, _texts: &[String]) -> VantageResult<Vec<Vec<f32>>> {
        Err(EmbeddingError::InferenceFailed {
            reason: "model server restarting".to_string(),
        }
        .into())
    }
    fn dimensions(&self) -> usize {
        32
    }
    fn name(&self) -> &str {
        "flaky"
    }
    fn is_available(&self) -> bool {
        true
    }
}

fn config(dims: usize) -> EmbeddingConfig {
    EmbeddingConfig {
        dimensions: dims,
        l1_cache_size: 100,
        ..Default::default()
    }
}

#[tokio::test]
async fn falls_back_and_records_degradation() {
    let flaky = Arc::new(FlakyProvider::default());
    let primary: Arc<dyn IEmbeddingProvider> = flaky.clone();
    let fallback: Arc<dyn IEmbeddingProvider> = Arc::new(TfIdfFallback::new(32));
    let engine = EmbeddingEngine::with_providers(vec![primary, fallback], config(32));

    let q = engine.embed_query("acme ai series b").await.unwrap();
    assert_eq!(q.provider, "tfidf-fallback");
    assert_eq!(flaky.calls.load(Ordering::SeqCst), 1);

    let events = engine.drain_degradation_events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].component, "embeddings");

    // Cached: the failing primary is not consulted again.
    let again = engine.embed_query("acme ai series b").await.unwrap();
    assert!(again.cached);
    assert_eq!(again.provider, "tfidf-fallback");
    assert_eq!(flaky.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn exhausted_chain_is_an_error_not_a_panic() {
    let only: Arc<dyn IEmbeddingProvider> = Arc::new(FlakyProvider::default());
    let engine = EmbeddingEngine::with_providers(vec![only], config(32));
    assert!(engine.embed_query("anything").await.is_err());
}

#[tokio::test]
async fn empty_query_embeds_to_zero_vector() {
    let engine = EmbeddingEngine::new(config(64)).unwrap();
    let q = engine.embed_query("").await.unwrap();
    assert_eq!(q.vector.len(), 64);
    assert!(q.vector.iter().all(|x| *x == 0.0));
}
