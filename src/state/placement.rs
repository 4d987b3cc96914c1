//! New-node placement state.
//!
//! A click on the map body creates a pending placement (at most one
//! exists; the last click wins) and opens or updates the registration
//! form. The form carries a generation counter so an address lookup
//! that resolves after the form was dismissed is dropped.

use crate::mesh::NodeSubmission;

/// The transient marker for a node being registered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingPlacement {
    pub lat: f64,
    pub lng: f64,
}

/// The registration form's field values.
#[derive(Debug, Clone, Default)]
pub struct PlacementForm {
    /// Which placement cycle this form belongs to; stale async fills
    /// compare against it.
    pub generation: u64,
    pub name: String,
    pub email: String,
    pub contact: String,
    pub details: String,
    pub address: String,
    pub latitude: String,
    pub longitude: String,
    /// One-shot: the name field grabs focus on the next frame.
    pub focus_name: bool,
}

/// Placement interaction state: the pending marker plus the form.
#[derive(Debug, Default)]
pub struct PlacementState {
    pending: Option<PendingPlacement>,
    form: Option<PlacementForm>,
    generations: u64,
}

impl PlacementState {
    /// Handles a map-body click at a geographic coordinate.
    ///
    /// Replaces any previous pending marker. If the form is already
    /// open, only its coordinate fields are updated (everything else
    /// the visitor typed is preserved); otherwise a fresh prefilled
    /// form is opened. Returns the generation the caller should tag
    /// the address lookup with.
    pub fn place(&mut self, lat: f64, lng: f64) -> u64 {
        self.pending = Some(PendingPlacement { lat, lng });

        match &mut self.form {
            Some(form) => {
                form.latitude = format!("{lat:.6}");
                form.longitude = format!("{lng:.6}");
                form.focus_name = true;
            }
            None => {
                self.generations += 1;
                self.form = Some(PlacementForm {
                    generation: self.generations,
                    latitude: format!("{lat:.6}"),
                    longitude: format!("{lng:.6}"),
                    focus_name: true,
                    ..Default::default()
                });
            }
        }

        // The form is Some on both paths.
        self.form.as_ref().map(|f| f.generation).unwrap_or_default()
    }

    /// Dismisses the form and discards the pending marker.
    pub fn dismiss(&mut self) {
        self.pending = None;
        self.form = None;
    }

    /// Fills the address field from a resolved lookup.
    ///
    /// Returns `false` (dropping the value) when the generation no
    /// longer matches the open form.
    pub fn fill_address(&mut self, generation: u64, address: &str) -> bool {
        match &mut self.form {
            Some(form) if form.generation == generation => {
                form.address = address.to_string();
                true
            }
            _ => false,
        }
    }

    pub fn pending(&self) -> Option<PendingPlacement> {
        self.pending
    }

    pub fn form(&self) -> Option<&PlacementForm> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut PlacementForm> {
        self.form.as_mut()
    }

    pub fn is_open(&self) -> bool {
        self.form.is_some()
    }

    /// Builds the registration request from the current form.
    pub fn submission(&self) -> Option<NodeSubmission> {
        self.form.as_ref().map(|form| NodeSubmission {
            address: form.address.clone(),
            name: form.name.clone(),
            email: form.email.clone(),
            contact: form.contact.clone(),
            details: form.details.clone(),
            latitude: form.latitude.clone(),
            longitude: form.longitude.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_click_wins() {
        let mut placement = PlacementState::default();
        placement.place(10.0, 20.0);
        placement.place(11.0, 21.0);

        assert_eq!(
            placement.pending(),
            Some(PendingPlacement {
                lat: 11.0,
                lng: 21.0
            })
        );
    }

    #[test]
    fn test_reclick_preserves_entered_fields() {
        let mut placement = PlacementState::default();
        placement.place(10.0, 20.0);
        placement.form_mut().unwrap().name = "Ada".to_string();

        placement.place(11.0, 21.0);
        let form = placement.form().unwrap();
        assert_eq!(form.name, "Ada");
        assert_eq!(form.latitude, "11.000000");
        assert_eq!(form.longitude, "21.000000");
    }

    #[test]
    fn test_reclick_keeps_generation() {
        let mut placement = PlacementState::default();
        let first = placement.place(10.0, 20.0);
        let second = placement.place(11.0, 21.0);
        assert_eq!(first, second);
    }

    #[test]
    fn test_stale_address_fill_is_dropped() {
        let mut placement = PlacementState::default();
        let generation = placement.place(10.0, 20.0);

        placement.dismiss();
        assert!(!placement.fill_address(generation, "10.0.0.7"));

        // A new placement cycle gets a new generation; the old lookup
        // still does not land.
        let fresh = placement.place(12.0, 22.0);
        assert_ne!(generation, fresh);
        assert!(!placement.fill_address(generation, "10.0.0.7"));
        assert_eq!(placement.form().unwrap().address, "");
    }

    #[test]
    fn test_current_address_fill_lands() {
        let mut placement = PlacementState::default();
        let generation = placement.place(10.0, 20.0);
        assert!(placement.fill_address(generation, "10.0.0.7"));
        assert_eq!(placement.form().unwrap().address, "10.0.0.7");
    }

    #[test]
    fn test_dismiss_clears_marker_and_form() {
        let mut placement = PlacementState::default();
        placement.place(10.0, 20.0);
        placement.dismiss();
        assert_eq!(placement.pending(), None);
        assert!(!placement.is_open());
    }
}
