//! Proxy listing data models

use serde::Deserialize;
use serde_json::Value;

/// One page of the upstream proxy listing
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ListingPage {
    #[serde(default)]
    pub data: Vec<ListingEntry>,
}

impl ListingPage {
    /// Proxy addresses of every usable entry on this page, in listing order
    pub fn addresses(&self) -> Vec<String> {
        self.data.iter().filter_map(ListingEntry::address).collect()
    }
}

/// A single proxy record as reported by the listing API
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ListingEntry {
    #[serde(default)]
    pub protocols: Option<Vec<String>>,
    #[serde(default)]
    pub ip: Option<String>,
    /// Upstream sends this either as a string or a number
    #[serde(default)]
    pub port: Option<Value>,
}

impl ListingEntry {
    /// Build the `protocol://ip:port` address for this record
    ///
    /// Returns `None` when the protocol list is empty or any of the first
    /// protocol, the ip or the port is missing.
    pub fn address(&self) -> Option<String> {
        let protocol = self.protocols.as_ref()?.first()?.to_lowercase();
        let ip = self.ip.as_deref().filter(|ip| !ip.is_empty())?;
        let port = self.port.as_ref().and_then(render_port)?;

        if protocol.is_empty() {
            return None;
        }

        Some(format!("{}://{}:{}", protocol, ip, port))
    }
}

fn render_port(port: &Value) -> Option<String> {
    match port {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        // zero counts as missing, same as an empty string
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}
