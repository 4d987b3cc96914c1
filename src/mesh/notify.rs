//! One-shot API requests whose only product is a status-line message:
//! token verification and node registration.

use super::types::NodeSubmission;
use std::sync::mpsc::{channel, Receiver, Sender};

/// Outcome of a one-shot request, for the status line.
#[derive(Debug)]
pub enum Notice {
    Verified(Result<String, String>),
    Submitted(Result<String, String>),
}

/// Channel for fire-once requests.
pub struct NotifyChannel {
    sender: Sender<Notice>,
    receiver: Receiver<Notice>,
}

impl Default for NotifyChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl NotifyChannel {
    pub fn new() -> Self {
        let (sender, receiver) = channel();
        Self { sender, receiver }
    }

    /// Issues the single verification request for a `/verify/<token>`
    /// page load.
    #[cfg(target_arch = "wasm32")]
    pub fn verify(&self, ctx: eframe::egui::Context, token: String) {
        let sender = self.sender.clone();
        wasm_bindgen_futures::spawn_local(async move {
            log::info!("Verifying node with token {token}");
            let result = super::api::verify_node(&token).await;
            let _ = sender.send(Notice::Verified(result));
            ctx.request_repaint();
        });
    }

    /// No-op stub for native builds.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn verify(&self, _ctx: eframe::egui::Context, _token: String) {}

    /// Submits a new-node registration form.
    #[cfg(target_arch = "wasm32")]
    pub fn submit(&self, ctx: eframe::egui::Context, submission: NodeSubmission) {
        let sender = self.sender.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let result = super::api::submit_node(&submission).await;
            let _ = sender.send(Notice::Submitted(result));
            ctx.request_repaint();
        });
    }

    /// No-op stub for native builds.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn submit(&self, _ctx: eframe::egui::Context, _submission: NodeSubmission) {
        log::warn!("Node submission requires the browser");
    }

    /// Non-blocking check for a completed request.
    pub fn try_recv(&self) -> Option<Notice> {
        self.receiver.try_recv().ok()
    }
}
