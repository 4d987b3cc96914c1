//! Application state management.
//!
//! `AppState` is the single context object owned by the application
//! root and passed by reference into every component, with lifecycle =
//! page session. All mutation happens on the UI thread inside
//! `update()`, so the registry and graph need no locking.

mod placement;
mod viewport;

pub use placement::{PendingPlacement, PlacementForm, PlacementState};
pub use viewport::{Viewport, MAX_ZOOM, MIN_ZOOM};

use crate::mesh::{LoaderEvent, MapDescriptor, MeshGraph, MeshNode, Notice, StatusSummary};
use std::collections::HashMap;

/// Root application state.
#[derive(Default)]
pub struct AppState {
    /// The map's zoom and center.
    pub viewport: Viewport,

    /// Set by the canvas when a user-driven move finished this frame;
    /// consumed by the fragment writer.
    pub viewport_moved: bool,

    /// Known child/federated maps, keyed by id. Entries are only ever
    /// inserted or overwritten, never removed.
    pub registry: HashMap<String, MapDescriptor>,

    /// The rendered node/edge set.
    pub graph: MeshGraph,

    /// New-node placement marker and form.
    pub placement: PlacementState,

    /// Set by the canvas when a placement click needs an address
    /// lookup; consumed by the echo channel dispatch.
    pub echo_requested: bool,

    /// Set by the form's submit button; consumed by the notify
    /// channel dispatch.
    pub submit_requested: bool,

    /// Id of the node whose info window is open. Mutually exclusive
    /// with an open placement form.
    pub selected_node: Option<String>,

    /// Search query filtering/highlighting nodes by owner or address.
    pub search_query: String,

    /// Read-only mode: placement UI suppressed, warning banner shown.
    pub read_only: bool,

    /// Status line in the top bar.
    pub status_message: String,

    /// Map status summary, once fetched.
    pub status_summary: Option<StatusSummary>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            status_message: "Loading map data...".to_string(),
            ..Default::default()
        }
    }

    /// Merges one completed loader step into the registry and graph.
    pub fn apply_loader_event(&mut self, event: LoaderEvent) {
        match event {
            LoaderEvent::ChildMaps(maps) => {
                for map in maps {
                    // Re-fetched descriptors overwrite by id.
                    self.registry.insert(map.id.clone(), map);
                }
                self.status_message = format!("Aggregating {} map(s)", self.registry.len() + 1);
            }
            LoaderEvent::Nodes(nodes) => {
                for node in nodes {
                    self.graph.insert_node(node);
                }
                self.status_message = format!("{} node(s)", self.graph.node_count());
            }
            LoaderEvent::Edges(connections) => {
                let mut dropped = 0usize;
                for connection in &connections {
                    if !self.graph.insert_edge(&connection.from, &connection.to) {
                        dropped += 1;
                    }
                }
                if dropped > 0 {
                    log::debug!(
                        "Dropped {dropped} of {} connection(s) with unknown endpoints",
                        connections.len()
                    );
                }
            }
            LoaderEvent::Status(summary) => {
                self.status_summary = Some(summary);
            }
            LoaderEvent::Error(e) => {
                log::error!("Map load error: {e}");
                self.status_message = "Showing partial map data".to_string();
            }
        }
    }

    /// Surfaces a one-shot request outcome in the status line.
    ///
    /// A successful registration also closes the form and clears the
    /// pending marker; the node is no longer pending from the
    /// visitor's point of view.
    pub fn apply_notice(&mut self, notice: Notice) {
        self.status_message = match notice {
            Notice::Verified(Ok(msg)) => format!("Verification: {msg}"),
            Notice::Verified(Err(e)) => {
                log::error!("Verification failed: {e}");
                "Verification failed".to_string()
            }
            Notice::Submitted(Ok(msg)) => {
                self.placement.dismiss();
                msg
            }
            Notice::Submitted(Err(e)) => {
                log::error!("Node registration failed: {e}");
                "Node registration failed".to_string()
            }
        };
    }

    /// True if the node matches the current search query.
    ///
    /// Case-insensitive substring match over owner and address; an
    /// empty query matches nothing (no highlight).
    pub fn matches_search(&self, node: &MeshNode) -> bool {
        let query = self.search_query.trim().to_lowercase();
        if query.is_empty() {
            return false;
        }
        node.id.to_lowercase().contains(&query) || node.owner.to_lowercase().contains(&query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::types::{ConnectionRecord, NodeRecord};

    fn node_event(ids: &[&str]) -> LoaderEvent {
        LoaderEvent::Nodes(
            ids.iter()
                .map(|id| {
                    MeshNode::from_record(
                        NodeRecord {
                            addr: id.to_string(),
                            owner: String::new(),
                            latitude: 0.0,
                            longitude: 0.0,
                            status: 1,
                        },
                        "local",
                    )
                })
                .collect(),
        )
    }

    fn edge_event(pairs: &[(&str, &str)]) -> LoaderEvent {
        LoaderEvent::Edges(
            pairs
                .iter()
                .map(|(from, to)| ConnectionRecord {
                    from: from.to_string(),
                    to: to.to_string(),
                })
                .collect(),
        )
    }

    fn descriptor(id: &str, name: &str) -> MapDescriptor {
        MapDescriptor {
            id: id.to_string(),
            name: name.to_string(),
            hostname: format!("{name}.example.net"),
        }
    }

    #[test]
    fn test_duplicate_descriptor_overwrites() {
        let mut state = AppState::new();
        state.apply_loader_event(LoaderEvent::ChildMaps(vec![descriptor("1", "east")]));
        state.apply_loader_event(LoaderEvent::ChildMaps(vec![descriptor("1", "east-renamed")]));

        assert_eq!(state.registry.len(), 1);
        assert_eq!(state.registry["1"].name, "east-renamed");
    }

    #[test]
    fn test_edges_before_nodes_are_dropped() {
        let mut state = AppState::new();
        state.apply_loader_event(LoaderEvent::ChildMaps(vec![]));
        // Connection completion beats the node completion.
        state.apply_loader_event(edge_event(&[("a", "b")]));
        state.apply_loader_event(node_event(&["a", "b"]));

        assert!(state.graph.edges().is_empty());
        assert_eq!(state.graph.node_count(), 2);
    }

    #[test]
    fn test_edges_after_nodes_are_kept() {
        let mut state = AppState::new();
        state.apply_loader_event(LoaderEvent::ChildMaps(vec![]));
        state.apply_loader_event(node_event(&["a", "b", "c"]));
        state.apply_loader_event(edge_event(&[("a", "b"), ("b", "missing")]));

        assert_eq!(state.graph.edges().len(), 1);
    }

    #[test]
    fn test_stage_error_degrades_to_partial_render() {
        let mut state = AppState::new();
        state.apply_loader_event(node_event(&["a"]));
        state.apply_loader_event(LoaderEvent::Error("HTTP 502".to_string()));

        // Already-rendered data stays; only the status line changes.
        assert_eq!(state.graph.node_count(), 1);
        assert_eq!(state.status_message, "Showing partial map data");
    }

    #[test]
    fn test_successful_registration_closes_form() {
        let mut state = AppState::new();
        state.placement.place(37.7, -122.4);

        state.apply_notice(Notice::Submitted(Ok("Node registered".to_string())));

        assert!(!state.placement.is_open());
        assert_eq!(state.placement.pending(), None);
        assert_eq!(state.status_message, "Node registered");
    }

    #[test]
    fn test_failed_registration_keeps_form_open() {
        let mut state = AppState::new();
        state.placement.place(37.7, -122.4);
        state.placement.form_mut().unwrap().name = "Ada".to_string();

        state.apply_notice(Notice::Submitted(Err("HTTP 500".to_string())));

        // The visitor can retry without retyping anything.
        assert!(state.placement.is_open());
        assert_eq!(state.placement.form().unwrap().name, "Ada");
        assert_eq!(state.status_message, "Node registration failed");
    }

    #[test]
    fn test_search_matches_owner_and_address() {
        let mut state = AppState::new();
        state.apply_loader_event(node_event(&["10.4.5.6"]));
        let node = state.graph.node("10.4.5.6").unwrap().clone();

        state.search_query = "4.5".to_string();
        assert!(state.matches_search(&node));
        state.search_query = "ada".to_string();
        assert!(!state.matches_search(&node));
        state.search_query = String::new();
        assert!(!state.matches_search(&node));
    }
}
