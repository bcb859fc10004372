use async_trait::async_trait;

use crate::errors::VantageResult;
use crate::models::{RetrievalResponse, RetrieveOptions};

/// Inbound contract consumed by the chat layer.
///
/// `Ok` with an empty result list means nothing relevant was found;
/// `Err` means a required collaborator is down.
#[async_trait]
pub trait IRetriever: Send + Sync {
    async fn retrieve(&self, query: &str, options: &RetrieveOptions)
        -> VantageResult<RetrievalResponse>;
}
