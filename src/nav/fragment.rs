//! Location codec: the URL fragment <-> viewport mapping.
//!
//! The fragment is `<zoom>/<lat>/<lng>` with lat/lng fixed to three
//! decimals, so views are shareable and bookmarkable at roughly
//! 100 m precision.

use crate::state::Viewport;

/// Encodes a viewport as a navigation fragment (without the leading `#`).
///
/// Deterministic and total; lossy beyond three decimals.
pub fn encode(viewport: &Viewport) -> String {
    format!(
        "{}/{:.3}/{:.3}",
        viewport.zoom, viewport.center_lat, viewport.center_lng
    )
}

/// Decodes a navigation fragment back into a viewport.
///
/// Returns `None` unless the fragment has exactly three `/`-separated
/// numeric components; callers must leave the current viewport untouched
/// in that case. Out-of-range but parseable coordinates are passed
/// through unchecked, matching the permissiveness of the fragment's
/// original consumers.
pub fn decode(fragment: &str) -> Option<Viewport> {
    let parts: Vec<&str> = fragment.split('/').collect();
    if parts.len() != 3 {
        return None;
    }

    let zoom: u32 = parts[0].parse().ok()?;
    let lat: f64 = parts[1].parse().ok()?;
    let lng: f64 = parts[2].parse().ok()?;

    Some(Viewport::new(zoom, lat, lng))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_fixed_precision() {
        let v = Viewport::new(12, 37.774929, -122.419416);
        assert_eq!(encode(&v), "12/37.775/-122.419");
    }

    #[test]
    fn test_round_trip_at_codec_precision() {
        let v = Viewport::new(12, 37.774, -122.419);
        assert_eq!(decode(&encode(&v)), Some(v));
    }

    #[test]
    fn test_re_encode_is_idempotent() {
        let v = Viewport::new(7, 51.5074, -0.1278);
        let fragment = encode(&v);
        let reapplied = decode(&fragment).unwrap();
        assert_eq!(encode(&reapplied), fragment);
    }

    #[test]
    fn test_wrong_segment_count_is_rejected() {
        assert_eq!(decode("5/10"), None);
        assert_eq!(decode(""), None);
        assert_eq!(decode("5/10/20/30"), None);
    }

    #[test]
    fn test_non_numeric_component_is_rejected() {
        assert_eq!(decode("abc/10.0/20.0"), None);
        assert_eq!(decode("5/x/20.0"), None);
        assert_eq!(decode("-1/10.0/20.0"), None);
    }

    #[test]
    fn test_load_scenario() {
        let v = decode("12/37.774/-122.419").unwrap();
        assert_eq!(v.zoom, 12);
        assert_eq!(v.center_lat, 37.774);
        assert_eq!(v.center_lng, -122.419);
    }
}
