//! Compiled defaults. Every sub-config reads from here.

// Retrieval
pub const DEFAULT_TOP_K: usize = 8;
pub const DEFAULT_DENSE_TOP_K: usize = 10;
pub const DEFAULT_SEMANTIC_DENSE_TOP_K: usize = 15;
pub const DEFAULT_SPARSE_TOP_K: usize = 10;
pub const DEFAULT_BM25_K1: f64 = 1.5;
pub const DEFAULT_BM25_B: f64 = 0.75;
pub const DEFAULT_SPARSE_SCORE_FLOOR: f64 = 0.1;
pub const DEFAULT_PATTERN_THRESHOLD: f64 = 0.3;
pub const DEFAULT_PATTERN_TOP_K: usize = 5;
pub const DEFAULT_BACKEND_TIMEOUT_MS: u64 = 2_000;
pub const DEFAULT_MAX_EXPANSIONS: usize = 3;
pub const DEFAULT_MAX_GRAPH_CONTEXT: usize = 3;
pub const DEFAULT_ENHANCER_TIMEOUT_MS: u64 = 3_000;

// Re-ranking weights
pub const DEFAULT_WEIGHT_CONTENT: f64 = 0.40;
pub const DEFAULT_WEIGHT_TITLE: f64 = 0.25;
pub const DEFAULT_WEIGHT_FRESHNESS: f64 = 0.15;
pub const DEFAULT_WEIGHT_AUTHORITY: f64 = 0.10;
pub const DEFAULT_WEIGHT_DIVERSITY: f64 = 0.10;

// Authority
pub const DEFAULT_AUTHORITY: f64 = 0.5;
pub const DEFAULT_AUTHORITY_TABLE: &[(&str, f64)] = &[
    ("knowledge_base", 0.9),
    ("realtime_market", 0.8),
    ("realtime_company", 0.8),
    ("realtime_news", 0.7),
    ("dense", 0.6),
    ("sparse", 0.5),
];

// Embedding
pub const DEFAULT_EMBEDDING_PROVIDER: &str = "tfidf";
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 384;
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";
pub const DEFAULT_EMBEDDING_API_KEY_ENV: &str = "VANTAGE_EMBEDDING_API_KEY";
pub const DEFAULT_EMBEDDING_CACHE_SIZE: u64 = 10_000;
pub const DEFAULT_EMBEDDING_CACHE_TTL_SECS: u64 = 3_600;
pub const MAX_EMBEDDING_CACHE_TTL_SECS: u64 = 7 * 24 * 3_600;
pub const DEFAULT_EMBEDDING_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_EMBEDDING_MAX_RETRIES: u32 = 2;

// Real-time
pub const DEFAULT_FRESHNESS_SECS: u64 = 300;
pub const MIN_FRESHNESS_SECS: u64 = 300;
pub const MAX_FRESHNESS_SECS: u64 = 600;
pub const DEFAULT_EVICTION_SECS: u64 = 600;
pub const DEFAULT_RATE_WINDOW_SECS: u64 = 3_600;
pub const DEFAULT_MAX_LIVE_SOURCES: usize = 2;
pub const DEFAULT_LIVE_TOP_K: usize = 3;
pub const DEFAULT_LIVE_BONUS: f64 = 0.2;
pub const DEFAULT_SOURCE_PRIORITY: f64 = 1.0;
pub const DEFAULT_SOURCE_RATE_LIMIT: u32 = 100;
pub const DEFAULT_SOURCE_TIMEOUT_SECS: u64 = 10;
pub const MIN_SOURCE_TIMEOUT_SECS: u64 = 5;
pub const MAX_SOURCE_TIMEOUT_SECS: u64 = 30;

// Observability
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_QUERY_LOG_CAPACITY: usize = 256;
