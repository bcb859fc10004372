//! Configuration system for Vantage.
//! TOML-based, 3-layer resolution: env > file > defaults.

pub mod defaults;
pub mod embedding_config;
pub mod observability_config;
pub mod realtime_config;
pub mod retrieval_config;
pub mod vantage_config;

pub use embedding_config::EmbeddingConfig;
pub use observability_config::ObservabilityConfig;
pub use realtime_config::{LiveSourceConfig, RealtimeConfig};
pub use retrieval_config::{RankingWeights, RetrievalConfig};
pub use vantage_config::VantageConfig;
