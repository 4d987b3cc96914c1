//! UI modules for the MeshMap application.
//!
//! The UI is split into distinct pieces:
//! - Top bar: title, status summary, search, legend, status line
//! - Central canvas: the map with nodes, links, and the pending marker
//! - Placement form: the new-node registration window
//! - Node info: details for a selected existing node

mod canvas;
mod node_info;
mod placement_form;
mod top_bar;

pub use canvas::render_canvas;
pub use node_info::render_node_info;
pub use placement_form::render_placement_form;
pub use top_bar::render_top_bar;

use crate::mesh::NodeClass;
use eframe::egui::Color32;

/// Marker color for each node class.
pub(crate) fn class_color(class: NodeClass) -> Color32 {
    match class {
        NodeClass::Residential => Color32::from_rgb(80, 180, 90),
        NodeClass::Hosted => Color32::from_rgb(90, 140, 220),
        NodeClass::Inactive => Color32::from_rgb(130, 130, 130),
    }
}
