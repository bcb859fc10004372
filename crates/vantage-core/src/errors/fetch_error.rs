/// Live-data fetch errors. Always recovered by the fetcher as an empty contribution.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request to {source_name} failed: {reason}")]
    RequestFailed { source_name: String, reason: String },

    #[error("{source_name} returned HTTP {status}")]
    BadStatus { source_name: String, status: u16 },

    #[error("could not decode payload from {source_name}: {reason}")]
    DecodeFailed { source_name: String, reason: String },

    #[error("{source_name} timed out after {timeout_ms}ms")]
    TimedOut { source_name: String, timeout_ms: u64 },
}
