//! Wire and domain types for the mesh map.
//!
//! Wire structs mirror the JSON the map server emits (Go-style field
//! names, every response wrapped in a `{"data": ...}` envelope); the
//! rendered graph uses the leaner `MeshNode`/`MeshEdge` forms.

use serde::Deserialize;
use std::collections::HashMap;

/// Envelope every API response is wrapped in.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

/// A child/federated map whose nodes are aggregated into this view.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MapDescriptor {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Hostname")]
    pub hostname: String,
}

/// Node status bit: the node is reachable.
pub const STATUS_ACTIVE: u32 = 1;
/// Node status bit: the node is physical hardware (vs. hosted/virtual).
pub const STATUS_PHYSICAL: u32 = 1 << 1;

/// Marker classification derived from the status bitfield.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeClass {
    /// Active node on physical hardware.
    Residential,
    /// Active hosted/virtual node.
    Hosted,
    /// Unreachable node.
    Inactive,
}

impl NodeClass {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Residential => "Active Residential Node",
            Self::Hosted => "Active Hosted/Virtual Node",
            Self::Inactive => "Inactive Node",
        }
    }
}

/// One node as dumped by the aggregate node endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct NodeRecord {
    #[serde(rename = "Addr")]
    pub addr: String,
    #[serde(rename = "OwnerName", default)]
    pub owner: String,
    #[serde(rename = "Latitude")]
    pub latitude: f64,
    #[serde(rename = "Longitude")]
    pub longitude: f64,
    #[serde(rename = "Status", default)]
    pub status: u32,
}

/// Aggregate node dump: source map name to its nodes.
pub type NodeDump = HashMap<String, Vec<NodeRecord>>;

/// One link as dumped by the connection endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectionRecord {
    #[serde(rename = "From")]
    pub from: String,
    #[serde(rename = "To")]
    pub to: String,
}

/// Map status summary for the top bar.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusSummary {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "LocalNodes")]
    pub local_nodes: u64,
    #[serde(rename = "CachedNodes")]
    pub cached_nodes: u64,
    #[serde(rename = "CachedMaps")]
    pub cached_maps: u64,
}

/// A node in the rendered graph, keyed by its address.
#[derive(Debug, Clone)]
pub struct MeshNode {
    pub id: String,
    pub lat: f64,
    pub lng: f64,
    pub owner: String,
    pub status: u32,
    /// Name of the map this node came from ("local" or a child map).
    pub source: String,
}

impl MeshNode {
    pub fn from_record(record: NodeRecord, source: &str) -> Self {
        Self {
            id: record.addr,
            lat: record.latitude,
            lng: record.longitude,
            owner: record.owner,
            status: record.status,
            source: source.to_string(),
        }
    }

    pub fn class(&self) -> NodeClass {
        if self.status & STATUS_ACTIVE == 0 {
            NodeClass::Inactive
        } else if self.status & STATUS_PHYSICAL != 0 {
            NodeClass::Residential
        } else {
            NodeClass::Hosted
        }
    }
}

/// A rendered link between two known node ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeshEdge {
    pub from: String,
    pub to: String,
}

/// Form fields for registering a new node.
#[derive(Debug, Clone, Default)]
pub struct NodeSubmission {
    pub address: String,
    pub name: String,
    pub email: String,
    pub contact: String,
    pub details: String,
    pub latitude: String,
    pub longitude: String,
}

impl NodeSubmission {
    /// Encodes the submission as an `application/x-www-form-urlencoded`
    /// request body. Empty optional fields are omitted.
    pub fn form_body(&self) -> String {
        let mut pairs: Vec<(&str, &str)> = vec![
            ("address", &self.address),
            ("name", &self.name),
            ("email", &self.email),
            ("latitude", &self.latitude),
            ("longitude", &self.longitude),
        ];
        if !self.contact.is_empty() {
            pairs.push(("contact", &self.contact));
        }
        if !self.details.is_empty() {
            pairs.push(("details", &self.details));
        }

        pairs
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Percent-encodes a form value (RFC 3986 unreserved set, space as `+`).
fn urlencode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}
