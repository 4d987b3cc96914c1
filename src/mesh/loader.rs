//! Hierarchical map loading pipeline.
//!
//! Uses channel-based communication to bridge async fetches with
//! egui's synchronous update loop. Loading runs in three stages: the
//! child-map list first, then node data and connection data fanned out
//! once the list has resolved. Node and connection completions may
//! arrive in either order; the graph drops edges whose endpoints are
//! not yet known.

use super::types::{ConnectionRecord, MapDescriptor, MeshNode, StatusSummary};
use std::sync::mpsc::{channel, Receiver, Sender};

/// One completed pipeline step, delivered to the update loop.
#[derive(Debug)]
pub enum LoaderEvent {
    /// Stage 1: the child-map registry contents.
    ChildMaps(Vec<MapDescriptor>),
    /// Stage 2: nodes across all known maps, source already attached.
    Nodes(Vec<MeshNode>),
    /// Stage 3: connections between node ids.
    Edges(Vec<ConnectionRecord>),
    /// Map status summary for the top bar.
    Status(StatusSummary),
    /// A stage failed; the map renders whatever has arrived.
    Error(String),
}

/// Channel-based loader for the map data pipeline.
///
/// Fetches are async but egui's `update()` is synchronous; results are
/// passed back over an mpsc channel and drained once per frame.
pub struct LoaderChannel {
    sender: Sender<LoaderEvent>,
    receiver: Receiver<LoaderEvent>,
}

impl Default for LoaderChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl LoaderChannel {
    pub fn new() -> Self {
        let (sender, receiver) = channel();
        Self { sender, receiver }
    }

    /// Non-blocking check for a completed pipeline step.
    pub fn try_recv(&self) -> Option<LoaderEvent> {
        self.receiver.try_recv().ok()
    }

    /// Starts the three-stage load.
    ///
    /// Stage 1 fetches the child-map list; only once it has resolved
    /// (populated or confirmed empty) are the node and connection
    /// fetches spawned. If stage 1 fails, nothing further is requested
    /// and a single error event is emitted.
    #[cfg(target_arch = "wasm32")]
    pub fn start(&self, ctx: eframe::egui::Context) {
        use super::api;

        let sender = self.sender.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let maps = match api::fetch_child_maps().await {
                Ok(maps) => maps,
                Err(e) => {
                    log::error!("Child map fetch failed: {e}");
                    let _ = sender.send(LoaderEvent::Error(e));
                    ctx.request_repaint();
                    return;
                }
            };

            log::info!("Loaded {} child map(s)", maps.len());
            let _ = sender.send(LoaderEvent::ChildMaps(maps));
            ctx.request_repaint();

            // Stage 1 resolved; fan out nodes and connections. Their
            // completions interleave in arbitrary order.
            {
                let sender = sender.clone();
                let ctx = ctx.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    let event = match api::fetch_nodes().await {
                        Ok(dump) => {
                            let nodes: Vec<MeshNode> = dump
                                .into_iter()
                                .flat_map(|(source, records)| {
                                    records
                                        .into_iter()
                                        .map(move |r| MeshNode::from_record(r, &source))
                                })
                                .collect();
                            log::info!("Loaded {} node(s)", nodes.len());
                            LoaderEvent::Nodes(nodes)
                        }
                        Err(e) => {
                            log::error!("Node fetch failed: {e}");
                            LoaderEvent::Error(e)
                        }
                    };
                    let _ = sender.send(event);
                    ctx.request_repaint();
                });
            }

            wasm_bindgen_futures::spawn_local(async move {
                let event = match api::fetch_connections().await {
                    Ok(connections) => {
                        log::info!("Loaded {} connection(s)", connections.len());
                        LoaderEvent::Edges(connections)
                    }
                    Err(e) => {
                        log::error!("Connection fetch failed: {e}");
                        LoaderEvent::Error(e)
                    }
                };
                let _ = sender.send(event);
                ctx.request_repaint();
            });
        });
    }

    /// No-op stub for native builds; the map starts empty.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn start(&self, _ctx: eframe::egui::Context) {
        log::warn!("Map loading requires the browser; starting with an empty map");
    }

    /// Requests the status summary, independent of the pipeline.
    #[cfg(target_arch = "wasm32")]
    pub fn fetch_status(&self, ctx: eframe::egui::Context) {
        use super::api;

        let sender = self.sender.clone();
        wasm_bindgen_futures::spawn_local(async move {
            match api::fetch_status().await {
                Ok(summary) => {
                    let _ = sender.send(LoaderEvent::Status(summary));
                    ctx.request_repaint();
                }
                Err(e) => log::warn!("Status fetch failed: {e}"),
            }
        });
    }

    /// No-op stub for native builds.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn fetch_status(&self, _ctx: eframe::egui::Context) {}

    #[cfg(test)]
    pub(crate) fn send_for_test(&self, event: LoaderEvent) {
        let _ = self.sender.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::types::NodeRecord;

    #[test]
    fn test_events_drain_in_send_order() {
        let loader = LoaderChannel::new();
        loader.send_for_test(LoaderEvent::ChildMaps(vec![]));
        loader.send_for_test(LoaderEvent::Nodes(vec![MeshNode::from_record(
            NodeRecord {
                addr: "10.0.0.1".into(),
                owner: "ada".into(),
                latitude: 1.0,
                longitude: 2.0,
                status: 1,
            },
            "local",
        )]));

        assert!(matches!(loader.try_recv(), Some(LoaderEvent::ChildMaps(_))));
        assert!(matches!(loader.try_recv(), Some(LoaderEvent::Nodes(_))));
        assert!(loader.try_recv().is_none());
    }
}
