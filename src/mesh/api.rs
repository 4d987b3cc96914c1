//! HTTP client for the map server's JSON API (wasm only).
//!
//! All endpoints wrap their payload in a `{"data": ...}` envelope.
//! Errors are flattened to `String` so pipeline stages can carry them
//! over channels without caring about the failure's origin.

use super::types::{
    ConnectionRecord, Envelope, MapDescriptor, NodeDump, NodeSubmission, StatusSummary,
};
use serde::de::DeserializeOwned;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

/// Child-map descriptors (`GET /api/child_maps`).
pub async fn fetch_child_maps() -> Result<Vec<MapDescriptor>, String> {
    get_json("/api/child_maps").await
}

/// Aggregate node dump across all known maps (`GET /api/all`).
pub async fn fetch_nodes() -> Result<NodeDump, String> {
    get_json("/api/all").await
}

/// Connection list (`GET /api/connections`).
pub async fn fetch_connections() -> Result<Vec<ConnectionRecord>, String> {
    get_json("/api/connections").await
}

/// Map status summary (`GET /api/status`).
pub async fn fetch_status() -> Result<StatusSummary, String> {
    get_json("/api/status").await
}

/// The visitor's originating network address (`GET /api/echo`).
pub async fn fetch_echo() -> Result<String, String> {
    get_json("/api/echo").await
}

/// Redeems a verification token (`GET /api/verify?id=<token>`).
pub async fn verify_node(token: &str) -> Result<String, String> {
    get_json(&format!("/api/verify?id={token}")).await
}

/// Registers a new node (`POST /api/node`).
pub async fn submit_node(submission: &NodeSubmission) -> Result<String, String> {
    let text = fetch_text("/api/node", "POST", Some(&submission.form_body())).await?;
    decode_envelope(&text)
}

async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T, String> {
    let text = fetch_text(url, "GET", None).await?;
    decode_envelope(&text)
}

fn decode_envelope<T: DeserializeOwned>(text: &str) -> Result<T, String> {
    let envelope: Envelope<T> =
        serde_json::from_str(text).map_err(|e| format!("malformed response: {e}"))?;
    Ok(envelope.data)
}

async fn fetch_text(url: &str, method: &str, form_body: Option<&str>) -> Result<String, String> {
    let opts = RequestInit::new();
    opts.set_method(method);
    opts.set_mode(RequestMode::SameOrigin);
    if let Some(body) = form_body {
        opts.set_body(&JsValue::from_str(body));
    }

    let request =
        Request::new_with_str_and_init(url, &opts).map_err(|e| js_error(url, &e))?;
    if form_body.is_some() {
        request
            .headers()
            .set("Content-Type", "application/x-www-form-urlencoded")
            .map_err(|e| js_error(url, &e))?;
    }

    let window = web_sys::window().ok_or("no window")?;
    let response: Response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| js_error(url, &e))?
        .dyn_into()
        .map_err(|_| format!("{url}: fetch did not yield a Response"))?;

    if !response.ok() {
        return Err(format!("{url}: HTTP {}", response.status()));
    }

    let text = JsFuture::from(response.text().map_err(|e| js_error(url, &e))?)
        .await
        .map_err(|e| js_error(url, &e))?;
    text.as_string()
        .ok_or_else(|| format!("{url}: response body was not text"))
}

fn js_error(url: &str, value: &JsValue) -> String {
    format!("{url}: {value:?}")
}
