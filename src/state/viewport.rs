//! Map viewport: zoom level and geographic center.

/// Minimum zoom level (whole world).
pub const MIN_ZOOM: u32 = 0;
/// Maximum zoom level (street scale).
pub const MAX_ZOOM: u32 = 18;

/// The map's current zoom level and geographic center.
///
/// Zoom is an integer tile-pyramid level; the center is in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub zoom: u32,
    pub center_lat: f64,
    pub center_lng: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        // Whole-world view until a fragment or the user says otherwise
        Self {
            zoom: 2,
            center_lat: 20.0,
            center_lng: 0.0,
        }
    }
}

impl Viewport {
    pub fn new(zoom: u32, center_lat: f64, center_lng: f64) -> Self {
        Self {
            zoom,
            center_lat,
            center_lng,
        }
    }

    /// True if the center is finite and within geographic range.
    pub fn is_valid(&self) -> bool {
        self.center_lat.is_finite()
            && self.center_lng.is_finite()
            && (-90.0..=90.0).contains(&self.center_lat)
            && (-180.0..=180.0).contains(&self.center_lng)
    }
}
