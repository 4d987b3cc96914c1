//! Browser location and host-page configuration glue.
//!
//! Reads and writes `location.hash`, reads `location.pathname`, and
//! reads the read-only flag the host page exposes. Native builds get
//! no-op stubs so the core stays testable off-browser.

/// Current navigation fragment, without the leading `#`.
#[cfg(target_arch = "wasm32")]
pub fn current_fragment() -> String {
    let Some(window) = web_sys::window() else {
        return String::new();
    };
    match window.location().hash() {
        Ok(hash) => hash.trim_start_matches('#').to_string(),
        Err(_) => String::new(),
    }
}

/// No-op stub for native builds.
#[cfg(not(target_arch = "wasm32"))]
pub fn current_fragment() -> String {
    String::new()
}

/// Writes a new navigation fragment.
#[cfg(target_arch = "wasm32")]
pub fn set_fragment(fragment: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_hash(fragment);
    }
}

/// No-op stub for native builds.
#[cfg(not(target_arch = "wasm32"))]
pub fn set_fragment(_fragment: &str) {}

/// Current navigation path (e.g. `/verify/abc123`).
#[cfg(target_arch = "wasm32")]
pub fn current_path() -> String {
    let Some(window) = web_sys::window() else {
        return String::new();
    };
    window.location().pathname().unwrap_or_default()
}

/// No-op stub for native builds.
#[cfg(not(target_arch = "wasm32"))]
pub fn current_path() -> String {
    String::new()
}

/// Read-only mode flag, set by the host page as `window.MESHMAP_READONLY`.
///
/// Consumed, not computed: any truthy value suppresses the placement UI
/// and raises the warning banner.
#[cfg(target_arch = "wasm32")]
pub fn read_only_flag() -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    match js_sys::Reflect::get(&window, &wasm_bindgen::JsValue::from_str("MESHMAP_READONLY")) {
        Ok(value) => value.is_truthy(),
        Err(_) => false,
    }
}

/// No-op stub for native builds.
#[cfg(not(target_arch = "wasm32"))]
pub fn read_only_flag() -> bool {
    false
}
