//! # vantage-retrieval
//!
//! The retrieval-and-ranking core: query analysis, strategy selection,
//! concurrent multi-backend search, fusion/dedup, five-factor re-ranking,
//! and graph-context enrichment. [`RetrievalEngine`] ties it together and
//! implements `IRetriever`.

pub mod analysis;
pub mod engine;
pub mod enrichment;
pub mod expansion;
pub mod fusion;
pub mod graph;
pub mod index;
pub mod ranking;
pub mod search;
pub mod strategy;

pub use engine::{RetrievalEngine, RetrievalEngineBuilder};
