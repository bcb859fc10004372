//! Entity-anchored graph traversal, one hop deep.

use std::collections::HashSet;

use serde_json::json;
use vantage_core::models::{CandidateResult, GraphNode, SourceStrategy};

use crate::graph::KnowledgeGraph;

pub const DIRECT_MATCH_SCORE: f64 = 0.9;
/// Multiplied by the relationship weight.
pub const RELATED_MATCH_SCORE: f64 = 0.7;
pub const GRAPH_SOURCE: &str = "knowledge_base";

fn node_candidate(node: &GraphNode, score: f64, strategy: SourceStrategy) -> CandidateResult {
    let metadata = [
        ("source".to_string(), json!(GRAPH_SOURCE)),
        ("node_type".to_string(), json!(node.node_type)),
    ]
    .into();
    CandidateResult::new(Some(node.id.clone()), node.name(), node.to_content(), score, strategy)
        .with_metadata(metadata)
}

/// Direct matches for each entity, each followed by its one-hop neighbours.
/// A node appears at most once, at its first position.
pub fn search(graph: &KnowledgeGraph, entities: &[String]) -> Vec<CandidateResult> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut results = Vec::new();

    for entity in entities {
        let Some(node) = graph.lookup(entity) else {
            continue;
        };
        let neighbors = graph.neighbors(node);

        if seen.insert(node.id.as_str()) {
            let context: Vec<GraphNode> = neighbors.iter().map(|n| n.node.clone()).collect();
            let mut direct = node_candidate(node, DIRECT_MATCH_SCORE, SourceStrategy::GraphDirect)
                .with_reasoning(format!("entity '{entity}' matched node {}", node.id));
            if !context.is_empty() {
                direct = direct.with_graph_context(context);
            }
            results.push(direct);
        }

        for neighbor in neighbors {
            if !seen.insert(neighbor.node.id.as_str()) {
                continue;
            }
            let score = RELATED_MATCH_SCORE * neighbor.relation.weight;
            results.push(
                node_candidate(neighbor.node, score, SourceStrategy::GraphRelated)
                    .with_reasoning(format!(
                        "{} --{}--> {}",
                        node.id,
                        neighbor.relation.relation_type.as_str(),
                        neighbor.node.id
                    ))
                    .with_graph_context(vec![node.clone()]),
            );
        }
    }
    results
}
