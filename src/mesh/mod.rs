//! Mesh network domain: wire types, the rendered graph, and the async
//! API channels that feed it.

#[cfg(target_arch = "wasm32")]
mod api;
mod echo;
mod graph;
mod loader;
mod notify;
pub mod types;

pub use echo::{EchoChannel, EchoResult};
pub use graph::MeshGraph;
pub use loader::{LoaderChannel, LoaderEvent};
pub use notify::{Notice, NotifyChannel};
pub use types::{
    MapDescriptor, MeshNode, NodeClass, NodeSubmission, StatusSummary,
};
