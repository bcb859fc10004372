mod candidate;
mod degradation_event;
mod document;
mod graph;
mod live;
mod query_analysis;
mod retrieval;
mod vector;

pub use candidate::{identity_key, CandidateResult, SourceStrategy, IDENTITY_PREFIX_CHARS};
pub use degradation_event::DegradationEvent;
pub use document::Document;
pub use graph::{GraphNode, GraphRelation, NodeType, RelationType};
pub use live::{LiveDataType, LiveItem};
pub use query_analysis::{QueryAnalysis, Temporality};
pub use retrieval::{
    BackendReport, BackendStatus, LiveFetchReport, LiveOutcome, RankedResult,
    RetrievalMetadata, RetrievalResponse, RetrieveOptions, ScoreBreakdown, SourceReport,
    StrategyName,
};
pub use vector::{MetadataFilter, VectorMatch, VectorQuery};
