//! In-memory entity graph with case-insensitive lookup and one-hop traversal.

use std::collections::HashMap;

use vantage_core::models::{GraphNode, GraphRelation};

/// A resolved outgoing edge.
#[derive(Debug, Clone, Copy)]
pub struct Neighbor<'a> {
    pub relation: &'a GraphRelation,
    pub node: &'a GraphNode,
}

#[derive(Debug, Clone, Default)]
pub struct KnowledgeGraph {
    nodes: Vec<GraphNode>,
    /// Lowercase id → position. Exact ids only.
    by_id: HashMap<String, usize>,
    /// Lowercase id or `name` property → position. Ids take precedence.
    by_key: HashMap<String, usize>,
}

impl KnowledgeGraph {
    pub fn new(nodes: Vec<GraphNode>) -> Self {
        let mut by_id = HashMap::new();
        for (i, node) in nodes.iter().enumerate() {
            by_id.entry(node.id.to_lowercase()).or_insert(i);
        }
        let mut by_key = by_id.clone();
        for (i, node) in nodes.iter().enumerate() {
            by_key.entry(node.name().to_lowercase()).or_insert(i);
        }
        Self {
            nodes,
            by_id,
            by_key,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes.iter()
    }

    /// Node by id, case-insensitive.
    pub fn get(&self, id: &str) -> Option<&GraphNode> {
        self.by_id
            .get(&id.to_lowercase())
            .and_then(|&i| self.nodes.get(i))
    }

    /// Node whose id or `name` equals `entity`, case-insensitive.
    pub fn lookup(&self, entity: &str) -> Option<&GraphNode> {
        let key = entity.trim().to_lowercase();
        if key.is_empty() {
            return None;
        }
        self.by_key.get(&key).and_then(|&i| self.nodes.get(i))
    }

    /// Outgoing one-hop neighbours. Edges whose target does not resolve are skipped.
    pub fn neighbors<'a>(&'a self, node: &'a GraphNode) -> Vec<Neighbor<'a>> {
        node.relationships
            .iter()
            .filter_map(|relation| {
                self.get(&relation.target_node_id)
                    .map(|target| Neighbor { relation, node: target })
            })
            .collect()
    }
}

impl FromIterator<GraphNode> for KnowledgeGraph {
    fn from_iter<T: IntoIterator<Item = GraphNode>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
