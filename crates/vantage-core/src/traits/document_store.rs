use crate::errors::VantageResult;
use crate::models::Document;

/// Read-only static corpus used for lexical scoring and pattern matching.
pub trait IDocumentStore: Send + Sync {
    /// Every document in the corpus.
    fn documents(&self) -> VantageResult<Vec<Document>>;

    fn name(&self) -> &str;
}
