//! The rendered node/edge set, keyed by node id.

use super::types::{MeshEdge, MeshNode};
use std::collections::HashMap;

/// In-memory graph of mesh nodes and the links between them.
///
/// Nodes are keyed by id and overwritten on re-insert. An edge is only
/// accepted once both endpoints are present; edges referencing unknown
/// nodes are dropped, not queued (nodes are expected to arrive before
/// their links).
#[derive(Debug, Default)]
pub struct MeshGraph {
    nodes: HashMap<String, MeshNode>,
    edges: Vec<MeshEdge>,
}

impl MeshGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites a node.
    pub fn insert_node(&mut self, node: MeshNode) {
        self.nodes.insert(node.id.clone(), node);
    }

    /// Inserts an edge between two known nodes.
    ///
    /// Returns `false` (and inserts nothing) when either endpoint is
    /// unknown or the edge is already present.
    pub fn insert_edge(&mut self, from: &str, to: &str) -> bool {
        if !self.nodes.contains_key(from) || !self.nodes.contains_key(to) {
            return false;
        }
        let edge = MeshEdge {
            from: from.to_string(),
            to: to.to_string(),
        };
        if self.edges.contains(&edge) {
            return false;
        }
        self.edges.push(edge);
        true
    }

    pub fn node(&self, id: &str) -> Option<&MeshNode> {
        self.nodes.get(id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &MeshNode> {
        self.nodes.values()
    }

    pub fn edges(&self) -> &[MeshEdge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str) -> MeshNode {
        MeshNode {
            id: id.to_string(),
            lat: 0.0,
            lng: 0.0,
            owner: String::new(),
            status: 1,
            source: "local".to_string(),
        }
    }

    #[test]
    fn test_edge_with_unknown_endpoint_is_dropped() {
        let mut graph = MeshGraph::new();
        graph.insert_node(node("a"));

        assert!(!graph.insert_edge("a", "missing"));
        assert!(!graph.insert_edge("missing", "a"));
        assert!(graph.edges().is_empty());
    }

    #[test]
    fn test_edge_between_known_nodes_is_kept() {
        let mut graph = MeshGraph::new();
        graph.insert_node(node("a"));
        graph.insert_node(node("b"));

        assert!(graph.insert_edge("a", "b"));
        assert_eq!(graph.edges().len(), 1);
    }

    #[test]
    fn test_duplicate_edge_is_dropped() {
        let mut graph = MeshGraph::new();
        graph.insert_node(node("a"));
        graph.insert_node(node("b"));

        assert!(graph.insert_edge("a", "b"));
        assert!(!graph.insert_edge("a", "b"));
        assert_eq!(graph.edges().len(), 1);
    }

    #[test]
    fn test_node_reinsert_overwrites() {
        let mut graph = MeshGraph::new();
        graph.insert_node(node("a"));
        let mut updated = node("a");
        updated.owner = "ada".to_string();
        graph.insert_node(updated);

        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.node("a").unwrap().owner, "ada");
    }

    #[test]
    fn test_late_node_does_not_resurrect_dropped_edge() {
        let mut graph = MeshGraph::new();
        graph.insert_node(node("a"));
        assert!(!graph.insert_edge("a", "b"));

        // "b" appearing later does not bring the edge back.
        graph.insert_node(node("b"));
        assert!(graph.edges().is_empty());
    }
}
