//! # vantage-core
//!
//! Foundation crate for the Vantage retrieval core.
//! Defines the shared types, collaborator traits, errors, config, text helpers,
//! and tracing setup. Every other crate in the workspace depends on this.

pub mod config;
pub mod errors;
pub mod intent;
pub mod models;
pub mod observability;
pub mod text;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::VantageConfig;
pub use errors::{VantageError, VantageResult};
pub use intent::Intent;
pub use models::{CandidateResult, QueryAnalysis, SourceStrategy};
