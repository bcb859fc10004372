pub mod l1_memory;

pub use l1_memory::{CachedEmbedding, L1MemoryCache};
