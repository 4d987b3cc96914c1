//! Central canvas UI: the map itself.
//!
//! Draws links beneath nodes beneath the pending-placement marker, and
//! handles pan (drag), zoom (scroll, anchored at the cursor), and
//! clicks (select an existing node, or start a placement).

use crate::geo::MapProjection;
use crate::state::{AppState, Viewport, MAX_ZOOM, MIN_ZOOM};
use eframe::egui::{self, Color32, Pos2, Rect, Sense, Stroke};
use geo_types::Coord;

const NODE_RADIUS: f32 = 5.0;
const HIT_RADIUS: f32 = 9.0;

pub fn render_canvas(ctx: &egui::Context, state: &mut AppState) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let available_size = ui.available_size();
        let (response, painter) = ui.allocate_painter(available_size, Sense::click_and_drag());
        let rect = response.rect;

        painter.rect_filled(rect, 0.0, Color32::from_rgb(18, 22, 28));

        let projection = MapProjection::new(&state.viewport, rect);

        // Links first so markers draw on top
        let link_stroke = Stroke::new(1.0, Color32::from_rgb(70, 120, 80));
        for edge in state.graph.edges() {
            let (Some(from), Some(to)) = (state.graph.node(&edge.from), state.graph.node(&edge.to))
            else {
                continue;
            };
            let a = projection.to_screen(Coord {
                x: from.lng,
                y: from.lat,
            });
            let b = projection.to_screen(Coord {
                x: to.lng,
                y: to.lat,
            });
            painter.line_segment([a, b], link_stroke);
        }

        for node in state.graph.nodes() {
            let pos = projection.to_screen(Coord {
                x: node.lng,
                y: node.lat,
            });
            if !rect.expand(NODE_RADIUS).contains(pos) {
                continue;
            }

            painter.circle_filled(pos, NODE_RADIUS, super::class_color(node.class()));

            if state.matches_search(node) {
                painter.circle_stroke(
                    pos,
                    NODE_RADIUS + 3.0,
                    Stroke::new(2.0, Color32::from_rgb(240, 210, 80)),
                );
            }
            if state.selected_node.as_deref() == Some(node.id.as_str()) {
                painter.circle_stroke(pos, NODE_RADIUS + 3.0, Stroke::new(2.0, Color32::WHITE));
            }
        }

        if let Some(pending) = state.placement.pending() {
            let pos = projection.to_screen(Coord {
                x: pending.lng,
                y: pending.lat,
            });
            painter.circle_filled(pos, NODE_RADIUS + 1.0, Color32::from_rgb(230, 150, 60));
            painter.circle_stroke(pos, NODE_RADIUS + 4.0, Stroke::new(2.0, Color32::WHITE));
        }

        handle_input(state, &response, &projection, rect);
    });
}

fn handle_input(
    state: &mut AppState,
    response: &egui::Response,
    projection: &MapProjection,
    rect: Rect,
) {
    // Dragging pans the map under the cursor
    if response.dragged() {
        let delta = response.drag_delta();
        if delta != egui::Vec2::ZERO {
            let center = projection.center_after_pan(delta);
            state.viewport.center_lat = center.y;
            state.viewport.center_lng = center.x;
        }
    }
    if response.drag_stopped() {
        state.viewport_moved = true;
    }

    // Scroll zooms one level at a time, keeping the cursor anchored
    if let Some(hover) = response.hover_pos() {
        let scroll = response.ctx.input(|i| i.raw_scroll_delta.y);
        if scroll != 0.0 {
            let zoom = state.viewport.zoom;
            let new_zoom = if scroll > 0.0 {
                (zoom + 1).min(MAX_ZOOM)
            } else {
                zoom.saturating_sub(1).max(MIN_ZOOM)
            };
            if new_zoom != zoom {
                let anchor = projection.to_coord(hover);
                let center = MapProjection::center_keeping_anchor(new_zoom, anchor, hover, rect);
                state.viewport = Viewport::new(new_zoom, center.y, center.x);
                state.viewport_moved = true;
            }
        }
    }

    if response.clicked() {
        if let Some(pos) = response.interact_pointer_pos() {
            on_click(state, projection, pos);
        }
    }
}

/// A click either selects the node under the cursor or starts a
/// placement on the map body. The two modes are mutually exclusive.
fn on_click(state: &mut AppState, projection: &MapProjection, pos: Pos2) {
    let hit = state
        .graph
        .nodes()
        .find(|node| {
            let screen = projection.to_screen(Coord {
                x: node.lng,
                y: node.lat,
            });
            screen.distance(pos) <= HIT_RADIUS
        })
        .map(|node| node.id.clone());

    if let Some(id) = hit {
        state.placement.dismiss();
        state.selected_node = Some(id);
        return;
    }

    state.selected_node = None;
    if state.read_only {
        return;
    }

    let coord = projection.to_coord(pos);
    state.placement.place(coord.y, coord.x);
    state.echo_requested = true;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::MeshNode;

    fn projection(state: &AppState) -> MapProjection {
        let rect = Rect::from_min_size(Pos2::ZERO, egui::vec2(800.0, 600.0));
        MapProjection::new(&state.viewport, rect)
    }

    fn node(id: &str, lat: f64, lng: f64) -> MeshNode {
        MeshNode {
            id: id.to_string(),
            lat,
            lng,
            owner: String::new(),
            status: 1,
            source: "local".to_string(),
        }
    }

    #[test]
    fn test_map_body_click_starts_placement() {
        let mut state = AppState::new();
        let projection = projection(&state);

        on_click(&mut state, &projection, Pos2::new(400.0, 300.0));

        assert!(state.placement.pending().is_some());
        assert!(state.placement.is_open());
        assert!(state.echo_requested);
    }

    #[test]
    fn test_read_only_click_is_ignored() {
        let mut state = AppState::new();
        state.read_only = true;
        let projection = projection(&state);

        on_click(&mut state, &projection, Pos2::new(400.0, 300.0));

        assert_eq!(state.placement.pending(), None);
        assert!(!state.placement.is_open());
        assert!(!state.echo_requested);
    }

    #[test]
    fn test_read_only_click_still_selects_node() {
        let mut state = AppState::new();
        state.read_only = true;
        state.graph.insert_node(node("10.0.0.1", 37.7, -122.4));
        let projection = projection(&state);

        let pos = projection.to_screen(Coord { x: -122.4, y: 37.7 });
        on_click(&mut state, &projection, pos);

        assert_eq!(state.selected_node.as_deref(), Some("10.0.0.1"));
        assert!(!state.placement.is_open());
        assert!(!state.echo_requested);
    }
}
