//! Graph-context enrichment of ranked results.

use vantage_core::models::{GraphNode, RankedResult};

use crate::graph::KnowledgeGraph;

/// Attach up to `max_nodes` graph nodes whose name occurs in the content of
/// each result that has no graph context yet. Nodes are taken in id order.
pub fn enrich(results: Vec<RankedResult>, graph: &KnowledgeGraph, max_nodes: usize) -> Vec<RankedResult> {
    if graph.is_empty() || max_nodes == 0 {
        return results;
    }
    let mut named: Vec<(&GraphNode, String)> = graph
        .nodes()
        .map(|n| (n, n.name().to_lowercase()))
        .filter(|(_, name)| !name.trim().is_empty())
        .collect();
    named.sort_by(|a, b| a.0.id.cmp(&b.0.id));

    results
        .into_iter()
        .map(|result| {
            if result.candidate.graph_context.is_some() {
                return result;
            }
            let content = result.candidate.content.to_lowercase();
            let context: Vec<GraphNode> = named
                .iter()
                .filter(|(_, name)| content.contains(name.as_str()))
                .take(max_nodes)
                .map(|(node, _)| (*node).clone())
                .collect();
            if context.is_empty() {
                return result;
            }
            RankedResult {
                candidate: result.candidate.with_graph_context(context),
                ..result
            }
        })
        .collect()
}
