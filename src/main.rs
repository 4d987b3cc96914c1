#![warn(clippy::all)]

//! MeshMap - a web-based interactive map of a peer-to-peer mesh network.
//!
//! Renders the nodes and links aggregated from a federation of child
//! maps, lets a visitor register a new node by clicking the map, and
//! handles `/verify/<token>` URLs by firing a one-shot verification
//! request. The map view round-trips through the URL fragment so views
//! are shareable.

mod geo;
mod mesh;
mod nav;
mod state;
mod ui;

use eframe::egui;
use mesh::{EchoChannel, LoaderChannel, NotifyChannel};
use nav::LocationSync;
use state::AppState;

// Native entry point
#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result<()> {
    env_logger::init();

    let native_options = eframe::NativeOptions::default();

    eframe::run_native(
        "MeshMap",
        native_options,
        Box::new(|cc| Ok(Box::new(MeshMapApp::new(cc)))),
    )
}

// WASM entry point - main is not called on wasm32
#[cfg(target_arch = "wasm32")]
fn main() {}

/// Entry point for the WASM application.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub async fn start() {
    use eframe::wasm_bindgen::JsCast as _;

    // Redirect `log` messages to `console.log`:
    eframe::WebLogger::init(log::LevelFilter::Debug).ok();

    let web_options = eframe::WebOptions::default();

    wasm_bindgen_futures::spawn_local(async {
        let document = web_sys::window()
            .expect("No window")
            .document()
            .expect("No document");

        let canvas = document
            .get_element_by_id("app_canvas")
            .expect("Failed to find app_canvas")
            .dyn_into::<web_sys::HtmlCanvasElement>()
            .expect("app_canvas was not a HtmlCanvasElement");

        let start_result = eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(|cc| Ok(Box::new(MeshMapApp::new(cc)))),
            )
            .await;

        // Remove the loading text once the app has loaded:
        if let Some(loading_text) = document.get_element_by_id("loading_text") {
            match start_result {
                Ok(_) => {
                    loading_text.remove();
                }
                Err(e) => {
                    loading_text.set_inner_html(
                        "<p>The app has crashed. See the developer console for details.</p>",
                    );
                    panic!("Failed to start eframe: {e:?}");
                }
            }
        }
    });
}

/// Main application state and logic.
pub struct MeshMapApp {
    /// Application state: viewport, registry, graph, placement
    state: AppState,

    /// Guard between `location.hash` and the viewport
    location_sync: LocationSync,

    /// Channel for the three-stage map data pipeline
    loader: LoaderChannel,

    /// Channel for originating-address lookups
    echo: EchoChannel,

    /// Channel for verification and registration requests
    notify: NotifyChannel,

    /// Fragment seen at the last navigation poll
    polled_fragment: String,

    /// Monotonic instant of the last fragment write (throttles scroll
    /// zoom to one write per settle interval)
    last_fragment_write: web_time::Instant,
}

/// Minimum spacing between fragment writes while the view keeps moving.
const FRAGMENT_WRITE_INTERVAL: f64 = 0.5;

impl MeshMapApp {
    /// Creates a new MeshMapApp instance and kicks off the load.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        let mut state = AppState::new();
        state.read_only = nav::location::read_only_flag();
        if state.read_only {
            log::info!("Read-only mode: placement UI disabled");
        }

        // Synthetic navigation change at startup: apply the fragment if
        // one is present; otherwise the default viewport stands and the
        // fragment is written lazily on the first move.
        let mut location_sync = LocationSync::new();
        let fragment = nav::location::current_fragment();
        if let Some(viewport) = location_sync.apply_fragment(&fragment) {
            state.viewport = viewport;
        }

        let loader = LoaderChannel::new();
        loader.start(cc.egui_ctx.clone());
        loader.fetch_status(cc.egui_ctx.clone());

        // The verification route is checked once per page load, never
        // on later in-page navigation.
        let notify = NotifyChannel::new();
        if let Some(token) = nav::verification_token(&nav::location::current_path()) {
            notify.verify(cc.egui_ctx.clone(), token.to_string());
        }

        Self {
            state,
            location_sync,
            loader,
            echo: EchoChannel::new(),
            notify,
            polled_fragment: fragment,
            last_fragment_write: web_time::Instant::now(),
        }
    }

    /// Drains completed async work into the application state.
    fn drain_channels(&mut self) {
        while let Some(event) = self.loader.try_recv() {
            self.state.apply_loader_event(event);
        }

        while let Some(result) = self.echo.try_recv() {
            match result.address {
                Ok(address) => {
                    if !self.state.placement.fill_address(result.generation, &address) {
                        log::debug!("Dropping address lookup for a dismissed form");
                    }
                }
                Err(e) => log::warn!("Address lookup failed: {e}"),
            }
        }

        while let Some(notice) = self.notify.try_recv() {
            self.state.apply_notice(notice);
        }
    }

    /// Applies navigation changes to the viewport, and completed moves
    /// back to navigation.
    fn sync_location(&mut self, ctx: &egui::Context) {
        let fragment = nav::location::current_fragment();
        if fragment != self.polled_fragment {
            self.polled_fragment = fragment.clone();
            if let Some(viewport) = self.location_sync.apply_fragment(&fragment) {
                self.state.viewport = viewport;
            }
        }

        // Write the fragment once the move has settled: no button held,
        // and not more often than the throttle interval.
        if self.state.viewport_moved && !ctx.input(|i| i.pointer.any_down()) {
            let now = web_time::Instant::now();
            if now.duration_since(self.last_fragment_write).as_secs_f64()
                >= FRAGMENT_WRITE_INTERVAL
            {
                self.state.viewport_moved = false;
                self.last_fragment_write = now;
                if let Some(fragment) = self.location_sync.complete_move(&self.state.viewport) {
                    nav::location::set_fragment(&fragment);
                    self.polled_fragment = fragment;
                }
            } else {
                ctx.request_repaint_after(std::time::Duration::from_millis(100));
            }
        }
    }

    /// Starts async requests the UI flagged this frame.
    fn dispatch_requests(&mut self, ctx: &egui::Context) {
        if self.state.echo_requested {
            self.state.echo_requested = false;
            if let Some(form) = self.state.placement.form() {
                self.echo.lookup(ctx.clone(), form.generation);
            }
        }

        if self.state.submit_requested {
            self.state.submit_requested = false;
            if let Some(submission) = self.state.placement.submission() {
                self.state.status_message = "Registering node...".to_string();
                self.notify.submit(ctx.clone(), submission);
            }
        }
    }
}

impl eframe::App for MeshMapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_channels();
        self.sync_location(ctx);
        self.dispatch_requests(ctx);

        ui::render_top_bar(ctx, &mut self.state);
        ui::render_canvas(ctx, &mut self.state);
        ui::render_placement_form(ctx, &mut self.state);
        ui::render_node_info(ctx, &mut self.state);
    }
}
