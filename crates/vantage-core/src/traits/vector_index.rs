use async_trait::async_trait;

use crate::errors::VantageResult;
use crate::models::{VectorMatch, VectorQuery};

/// Nearest-neighbour index over document embeddings.
#[async_trait]
pub trait IVectorIndex: Send + Sync {
    /// Top-k neighbours of `vector`, best first.
    async fn query(&self, vector: &[f32], query: &VectorQuery) -> VantageResult<Vec<VectorMatch>>;

    fn name(&self) -> &str;

    /// Whether the index can serve queries at all.
    fn is_available(&self) -> bool {
        true
    }
}
