//! Info window for a selected existing node.

use crate::state::AppState;
use eframe::egui;

pub fn render_node_info(ctx: &egui::Context, state: &mut AppState) {
    let Some(id) = state.selected_node.clone() else {
        return;
    };
    let Some(node) = state.graph.node(&id) else {
        state.selected_node = None;
        return;
    };

    let mut open = true;
    egui::Window::new("Node")
        .id(egui::Id::new("node_info"))
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-12.0, 12.0))
        .show(ctx, |ui| {
            egui::Grid::new("node_info_fields")
                .num_columns(2)
                .show(ui, |ui| {
                    ui.label("Address");
                    ui.label(&node.id);
                    ui.end_row();

                    ui.label("Owner");
                    ui.label(if node.owner.is_empty() {
                        "(unknown)"
                    } else {
                        &node.owner
                    });
                    ui.end_row();

                    ui.label("Status");
                    ui.colored_label(super::class_color(node.class()), node.class().label());
                    ui.end_row();

                    ui.label("Map");
                    ui.label(&node.source);
                    ui.end_row();
                });
        });

    if !open {
        state.selected_node = None;
    }
}
