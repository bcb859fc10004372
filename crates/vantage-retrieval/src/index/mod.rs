//! Corpus-side collaborators: the BM25 lexical index and in-memory
//! implementations of the document store and vector index.

pub mod document_store;
pub mod lexical;
pub mod vector_index;

pub use document_store::InMemoryDocumentStore;
pub use lexical::{Bm25Params, IndexedDocument, LexicalHit, LexicalIndex};
pub use vector_index::InMemoryVectorIndex;
