mod config_error;
mod embedding_error;
mod fetch_error;
mod retrieval_error;
mod vantage_error;

pub use config_error::ConfigError;
pub use embedding_error::EmbeddingError;
pub use fetch_error::FetchError;
pub use retrieval_error::RetrievalError;
pub use vantage_error::{VantageError, VantageResult};
