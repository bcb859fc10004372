use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Kind of entity a graph node represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    Company,
    Person,
    Investment,
    Trend,
    Technology,
}

/// Kind of edge between two graph nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationType {
    InvestedIn,
    FoundedBy,
    CompetesWith,
    RelatedTo,
    TrendIn,
}

impl RelationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvestedIn => "invested_in",
            Self::FoundedBy => "founded_by",
            Self::CompetesWith => "competes_with",
            Self::RelatedTo => "related_to",
            Self::TrendIn => "trend_in",
        }
    }
}

/// A directed, weighted edge. The target may not resolve; such dead edges
/// are skipped during traversal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphRelation {
    #[serde(rename = "type")]
    pub relation_type: RelationType,
    pub target_node_id: String,
    /// [0.0, 1.0]
    pub weight: f64,
}

/// A typed entity in the knowledge graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    #[serde(default)]
    pub properties: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub relationships: Vec<GraphRelation>,
}

impl GraphNode {
    /// Display name: the `name` property, falling back to the id.
    pub fn name(&self) -> &str {
        self.properties
            .get("name")
            .and_then(|v| v.as_str())
            .unwrap_or(&self.id)
    }

    pub fn description(&self) -> &str {
        self.properties
            .get("description")
            .and_then(|v| v.as_str())
            .unwrap_or("")
    }

    /// Text form used as candidate content.
    pub fn to_content(&self) -> String {
        format!("{}: {}", self.name(), self.description())
    }
}
