//! New-node registration form window.

use crate::state::AppState;
use eframe::egui;

/// Render the placement form, if one is open.
///
/// In read-only mode the form is never shown. Closing or cancelling
/// the window discards the pending placement marker along with it.
pub fn render_placement_form(ctx: &egui::Context, state: &mut AppState) {
    if state.read_only {
        return;
    }

    let mut open = true;
    let mut cancelled = false;
    let mut submitted = false;

    if let Some(form) = state.placement.form_mut() {
        egui::Window::new(format!(
            "{} Register a node",
            egui_phosphor::regular::MAP_PIN
        ))
        .id(egui::Id::new("placement_form"))
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-12.0, 12.0))
        .show(ctx, |ui| {
            egui::Grid::new("placement_fields")
                .num_columns(2)
                .show(ui, |ui| {
                    ui.label("Name");
                    let name_response = ui.text_edit_singleline(&mut form.name);
                    if form.focus_name {
                        form.focus_name = false;
                        name_response.request_focus();
                    }
                    ui.end_row();

                    ui.label("Email");
                    ui.text_edit_singleline(&mut form.email);
                    ui.end_row();

                    ui.label("Contact");
                    ui.text_edit_singleline(&mut form.contact);
                    ui.end_row();

                    ui.label("Details");
                    ui.text_edit_singleline(&mut form.details);
                    ui.end_row();

                    ui.label("Address");
                    ui.text_edit_singleline(&mut form.address);
                    ui.end_row();

                    ui.label("Latitude");
                    ui.text_edit_singleline(&mut form.latitude);
                    ui.end_row();

                    ui.label("Longitude");
                    ui.text_edit_singleline(&mut form.longitude);
                    ui.end_row();
                });

            ui.horizontal(|ui| {
                let ready = !form.latitude.is_empty() && !form.longitude.is_empty();
                if ui
                    .add_enabled(ready, egui::Button::new("Submit"))
                    .clicked()
                {
                    submitted = true;
                }
                if ui.button("Cancel").clicked() {
                    cancelled = true;
                }
            });
        });
    } else {
        return;
    }

    if submitted {
        state.submit_requested = true;
    }
    if !open || cancelled {
        state.placement.dismiss();
    }
}
