#![allow(clippy::self_named_module_files)]

use crate::client::EntryLayout;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

pub mod reader;
pub mod writer;

pub const APIVERVE_MCP_URL: &str = "https://api.apiverve.com/v1/mcp";
pub const SSE_TRANSPORT: &str = "sse";

/// A client configuration file's top-level JSON object.
pub type ConfigDocument = Map<String, Value>;

/// The MCP server being registered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerDescriptor {
    #[serde(rename = "type")]
    pub transport: String,
    pub url: String,
}

impl ServerDescriptor {
    #[must_use]
    pub fn new(transport: impl Into<String>, url: impl Into<String>) -> Self {
        Self { transport: transport.into(), url: url.into() }
    }

    /// The APIVerve SSE endpoint.
    #[must_use]
    pub fn apiverve() -> Self {
        Self::new(SSE_TRANSPORT, APIVERVE_MCP_URL)
    }

    /// Render the descriptor in the entry shape a client expects.
    #[must_use]
    pub fn to_entry(&self, layout: &EntryLayout) -> Value {
        let mut entry = json!({ "type": self.transport, "url": self.url });
        if layout.with_headers {
            entry["headers"] = json!({});
        }
        entry
    }
}
