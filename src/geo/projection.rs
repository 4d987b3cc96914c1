//! Map projection and coordinate transformation.
//!
//! Converts between geographic coordinates (lat/lng) and screen
//! coordinates for rendering on the canvas. Uses the spherical
//! Web-Mercator projection with slippy-map integer zoom levels, so
//! screen scale matches the tile pyramid the fragment's zoom refers to.

use crate::state::Viewport;
use eframe::egui::{Pos2, Rect, Vec2};
use geo_types::Coord;

/// Pixel size of the world at zoom 0.
const TILE_SIZE: f64 = 256.0;

/// Mercator breaks down at the poles; clamp like tiled maps do.
const MAX_LATITUDE: f64 = 85.05112878;

/// Map projection for converting geographic to screen coordinates.
///
/// A `Coord` is (x: longitude, y: latitude) in degrees.
#[derive(Debug, Clone)]
pub struct MapProjection {
    center: Coord,
    zoom: u32,
    screen_rect: Rect,
}

impl MapProjection {
    /// Creates a projection for the given viewport over a screen area.
    pub fn new(viewport: &Viewport, screen_rect: Rect) -> Self {
        Self {
            center: Coord {
                x: viewport.center_lng,
                y: viewport.center_lat,
            },
            zoom: viewport.zoom,
            screen_rect,
        }
    }

    fn world_size(zoom: u32) -> f64 {
        TILE_SIZE * f64::from(1u32 << zoom.min(31))
    }

    /// Projects degrees to absolute world pixels at a zoom level.
    fn project(coord: Coord, zoom: u32) -> (f64, f64) {
        let size = Self::world_size(zoom);
        let lat = coord.y.clamp(-MAX_LATITUDE, MAX_LATITUDE);
        let siny = lat.to_radians().sin();

        let x = (coord.x + 180.0) / 360.0 * size;
        let y = (0.5 - ((1.0 + siny) / (1.0 - siny)).ln() / (4.0 * std::f64::consts::PI)) * size;
        (x, y)
    }

    /// Inverse of `project`.
    fn unproject(x: f64, y: f64, zoom: u32) -> Coord {
        let size = Self::world_size(zoom);
        let lng = x / size * 360.0 - 180.0;
        let n = std::f64::consts::PI * (1.0 - 2.0 * y / size);
        let lat = n.sinh().atan().to_degrees();
        Coord { x: lng, y: lat }
    }

    /// Converts geographic coordinates to a screen position.
    pub fn to_screen(&self, coord: Coord) -> Pos2 {
        let (wx, wy) = Self::project(coord, self.zoom);
        let (cx, cy) = Self::project(self.center, self.zoom);
        let screen_center = self.screen_rect.center();
        Pos2::new(
            screen_center.x + (wx - cx) as f32,
            screen_center.y + (wy - cy) as f32,
        )
    }

    /// Converts a screen position back to geographic coordinates.
    pub fn to_coord(&self, pos: Pos2) -> Coord {
        let (cx, cy) = Self::project(self.center, self.zoom);
        let screen_center = self.screen_rect.center();
        let wx = cx + f64::from(pos.x - screen_center.x);
        let wy = cy + f64::from(pos.y - screen_center.y);
        Self::unproject(wx, wy, self.zoom)
    }

    /// Center after panning the view by a screen-space delta.
    pub fn center_after_pan(&self, delta: Vec2) -> Coord {
        self.to_coord(self.screen_rect.center() - delta)
    }

    /// Center that keeps `anchor` under `anchor_pos` at a new zoom level.
    ///
    /// Used for scroll zooming so the point under the cursor stays put.
    pub fn center_keeping_anchor(
        zoom: u32,
        anchor: Coord,
        anchor_pos: Pos2,
        screen_rect: Rect,
    ) -> Coord {
        let (ax, ay) = Self::project(anchor, zoom);
        let screen_center = screen_rect.center();
        let cx = ax - f64::from(anchor_pos.x - screen_center.x);
        let cy = ay - f64::from(anchor_pos.y - screen_center.y);
        Self::unproject(cx, cy, zoom)
    }
}
