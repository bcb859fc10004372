use test_fixtures::{fixture_exists, list_fixtures, load_fixture};
use vantage_core::models::{Document, GraphNode};

#[test]
fn golden_corpus_parses() {
    let docs: Vec<Document> = load_fixture("golden/corpus.json");
    assert_eq!(docs.len(), 7);
    assert!(docs.iter().all(|d| !d.content.is_empty()));
}

#[test]
fn golden_graph_parses() {
    let nodes: Vec<GraphNode> = load_fixture("golden/graph.json");
    assert!(nodes.iter().any(|n| n.id == "acme ai"));
}

#[test]
fn listing_finds_both_files() {
    assert!(fixture_exists("golden/corpus.json"));
    assert_eq!(list_fixtures("golden").len(), 2);
}
