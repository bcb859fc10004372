use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Records a fallback taken by a component, e.g. the embedding chain
/// moving past a failed provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DegradationEvent {
    pub component: String,
    pub failure: String,
    pub fallback_used: String,
    pub timestamp: DateTime<Utc>,
}
