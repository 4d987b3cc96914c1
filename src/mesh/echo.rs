//! Originating-address lookup for the placement form.
//!
//! Each lookup is tagged with the placement form's generation. A result
//! arriving after the form was dismissed (or replaced) carries a stale
//! generation and is dropped instead of filling a field that no longer
//! exists.

use std::sync::mpsc::{channel, Receiver, Sender};

/// A completed address lookup, tagged with the form generation that
/// requested it.
#[derive(Debug)]
pub struct EchoResult {
    pub generation: u64,
    pub address: Result<String, String>,
}

/// Channel for async `/api/echo` lookups.
pub struct EchoChannel {
    sender: Sender<EchoResult>,
    receiver: Receiver<EchoResult>,
}

impl Default for EchoChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl EchoChannel {
    pub fn new() -> Self {
        let (sender, receiver) = channel();
        Self { sender, receiver }
    }

    /// Spawns an address lookup on behalf of the given form generation.
    #[cfg(target_arch = "wasm32")]
    pub fn lookup(&self, ctx: eframe::egui::Context, generation: u64) {
        let sender = self.sender.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let address = super::api::fetch_echo().await;
            let _ = sender.send(EchoResult {
                generation,
                address,
            });
            ctx.request_repaint();
        });
    }

    /// No-op stub for native builds.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn lookup(&self, _ctx: eframe::egui::Context, _generation: u64) {}

    /// Non-blocking check for a completed lookup.
    pub fn try_recv(&self) -> Option<EchoResult> {
        self.receiver.try_recv().ok()
    }

    #[cfg(test)]
    pub(crate) fn send_for_test(&self, result: EchoResult) {
        let _ = self.sender.send(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_results_preserve_generation_tag() {
        let echo = EchoChannel::new();
        echo.send_for_test(EchoResult {
            generation: 3,
            address: Ok("10.0.0.7".into()),
        });

        let result = echo.try_recv().unwrap();
        assert_eq!(result.generation, 3);
        assert_eq!(result.address.unwrap(), "10.0.0.7");
        assert!(echo.try_recv().is_none());
    }
}
