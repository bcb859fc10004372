/// Retrieval subsystem errors.
///
/// None of these escape `retrieve`: the executor turns them into empty
/// contributions and records them in the response metadata.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("backend {backend} failed: {reason}")]
    BackendFailed { backend: String, reason: String },

    #[error("backend {backend} timed out after {timeout_ms}ms")]
    BackendTimedOut { backend: String, timeout_ms: u64 },

    #[error("vector index query failed: {reason}")]
    IndexQueryFailed { reason: String },

    #[error("document store unavailable: {reason}")]
    DocumentStoreFailed { reason: String },

    #[error("malformed candidate {key}: {reason}")]
    MalformedCandidate { key: String, reason: String },

    #[error("query enhancement failed: {reason}")]
    EnhancementFailed { reason: String },
}
