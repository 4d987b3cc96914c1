//! Top bar UI: title, map status summary, search, legend, status line.

use crate::mesh::NodeClass;
use crate::state::AppState;
use eframe::egui::{self, Align, Color32, Layout, RichText};

/// Render the top bar and, in read-only mode, the warning banner.
pub fn render_top_bar(ctx: &egui::Context, state: &mut AppState) {
    egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.heading("MeshMap");

            if let Some(summary) = &state.status_summary {
                ui.separator();
                ui.label(format!(
                    "{}: {} local, {} cached across {} map(s)",
                    summary.name,
                    summary.local_nodes,
                    summary.cached_nodes,
                    summary.cached_maps
                ));
            }

            ui.separator();
            ui.label(egui_phosphor::regular::MAGNIFYING_GLASS);
            ui.add(
                egui::TextEdit::singleline(&mut state.search_query)
                    .hint_text("Search nodes")
                    .desired_width(160.0),
            );

            ui.menu_button("Legend", |ui| {
                for class in [
                    NodeClass::Residential,
                    NodeClass::Hosted,
                    NodeClass::Inactive,
                ] {
                    ui.horizontal(|ui| {
                        ui.label(RichText::new("\u{25CF}").color(super::class_color(class)));
                        ui.label(class.label());
                    });
                }
            });

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                ui.label(&state.status_message);
            });
        });
    });

    if state.read_only {
        egui::TopBottomPanel::top("read_only_banner").show(ctx, |ui| {
            ui.colored_label(
                Color32::from_rgb(230, 90, 90),
                format!(
                    "{} Database is in read only mode.",
                    egui_phosphor::regular::WARNING
                ),
            );
        });
    }
}
