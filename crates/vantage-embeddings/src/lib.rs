//! # vantage-embeddings
//!
//! Query embedding for dense retrieval: an ordered provider fallback chain
//! with degradation events, a moka L1 cache keyed by blake3 hash, and
//! dimension validation.

pub mod cache;
pub mod degradation;
pub mod engine;
pub mod providers;

pub use engine::{EmbeddingEngine, QueryEmbedding};
