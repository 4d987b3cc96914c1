//! Two-way synchronization between the navigation fragment and the
//! map viewport.
//!
//! Both directions share one guard: the fragment we last wrote (or
//! applied) ourselves. A navigation change caused by our own
//! `location.hash` write compares equal to the guard and is a no-op, so
//! a programmatic viewport apply can never re-fire as another apply.

use super::fragment;
use crate::state::Viewport;

/// Guarded state machine between `location.hash` and the viewport.
///
/// Pure: the browser glue feeds fragments in and writes fragments out;
/// this type only decides what to apply and what to write.
#[derive(Debug, Default)]
pub struct LocationSync {
    /// Fragment last written to or applied from navigation.
    last_fragment: Option<String>,
}

impl LocationSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles a navigation change (including the synthetic one at load).
    ///
    /// Returns the viewport to apply, or `None` when the fragment is
    /// empty, invalid, or the one we last wrote ourselves. Invalid
    /// fragments leave the guard untouched so the previous view stands.
    pub fn apply_fragment(&mut self, fragment: &str) -> Option<Viewport> {
        if fragment.is_empty() {
            return None;
        }
        if self.last_fragment.as_deref() == Some(fragment) {
            return None;
        }

        let viewport = fragment::decode(fragment)?;
        self.last_fragment = Some(fragment.to_string());
        Some(viewport)
    }

    /// Handles a completed viewport move.
    ///
    /// Returns the fragment to write to navigation, or `None` when the
    /// encoded view matches the last-written fragment (re-encoding an
    /// applied fragment converges instead of looping).
    pub fn complete_move(&mut self, viewport: &Viewport) -> Option<String> {
        let fragment = fragment::encode(viewport);
        if self.last_fragment.as_deref() == Some(fragment.as_str()) {
            return None;
        }

        self.last_fragment = Some(fragment.clone());
        Some(fragment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_fragment_is_applied() {
        let mut sync = LocationSync::new();
        let v = sync.apply_fragment("12/37.774/-122.419").unwrap();
        assert_eq!(v, Viewport::new(12, 37.774, -122.419));
    }

    #[test]
    fn test_empty_fragment_is_ignored() {
        let mut sync = LocationSync::new();
        assert_eq!(sync.apply_fragment(""), None);
    }

    #[test]
    fn test_invalid_fragment_leaves_state_untouched() {
        let mut sync = LocationSync::new();
        sync.apply_fragment("12/37.774/-122.419");
        assert_eq!(sync.apply_fragment("5/10"), None);
        // The guard still holds the valid fragment: re-encoding the
        // applied view stays silent.
        let v = Viewport::new(12, 37.774, -122.419);
        assert_eq!(sync.complete_move(&v), None);
    }

    #[test]
    fn test_own_write_does_not_reapply() {
        let mut sync = LocationSync::new();
        let v = Viewport::new(9, 40.713, -74.006);

        let written = sync.complete_move(&v).unwrap();
        // The hash change caused by our own write comes back around.
        assert_eq!(sync.apply_fragment(&written), None);
    }

    #[test]
    fn test_move_after_apply_is_idempotent() {
        let mut sync = LocationSync::new();
        let v = sync.apply_fragment("12/37.774/-122.419").unwrap();
        // Move-completion re-encodes the same view; nothing to write.
        assert_eq!(sync.complete_move(&v), None);
    }

    #[test]
    fn test_higher_precision_fragment_converges() {
        let mut sync = LocationSync::new();
        // A hand-typed fragment with extra decimals applies as-is...
        let v = sync.apply_fragment("12/37.774929/-122.419416").unwrap();
        // ...and the next move-completion writes the normalized form,
        let written = sync.complete_move(&v).unwrap();
        assert_eq!(written, "12/37.775/-122.419");
        // whose echo is then a no-op.
        assert_eq!(sync.apply_fragment(&written), None);
    }

    #[test]
    fn test_real_move_writes_new_fragment() {
        let mut sync = LocationSync::new();
        sync.apply_fragment("12/37.774/-122.419");

        let moved = Viewport::new(13, 37.800, -122.400);
        assert_eq!(sync.complete_move(&moved), Some("13/37.800/-122.400".into()));
    }
}
