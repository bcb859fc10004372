use super::{ConfigError, EmbeddingError, FetchError, RetrievalError};

/// Workspace-wide error type.
#[derive(Debug, thiserror::Error)]
pub enum VantageError {
    /// A required collaborator is missing or reports itself unavailable.
    /// The only error `retrieve` ever returns.
    #[error("configuration error in {component}: {reason}")]
    Configuration { component: String, reason: String },

    #[error(transparent)]
    Embedding(#[from] EmbeddingError),

    #[error(transparent)]
    Retrieval(#[from] RetrievalError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl VantageError {
    /// Shorthand for a [`VantageError::Configuration`].
    pub fn configuration(component: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Configuration {
            component: component.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error means the retrieval subsystem itself is down,
    /// as opposed to a recoverable per-backend failure.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }
}

pub type VantageResult<T> = Result<T, VantageError>;
