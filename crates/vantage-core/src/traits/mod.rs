mod document_store;
mod embedding;
mod live_source;
mod query_enhancer;
mod retriever;
mod vector_index;

pub use document_store::IDocumentStore;
pub use embedding::IEmbeddingProvider;
pub use live_source::ILiveSource;
pub use query_enhancer::{AnalysisRefinement, IQueryEnhancer};
pub use retriever::IRetriever;
pub use vector_index::IVectorIndex;
