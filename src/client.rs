use serde::{Deserialize, Serialize};
use std::fmt;

/// An MCP client application whose configuration file this tool edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Client {
    ClaudeDesktop,
    VsCode,
    Cursor,
}

/// Where and how the server entry is placed inside a client's document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryLayout {
    /// Object keys leading to the server map, outermost first
    pub key_path: &'static [&'static str],
    /// Key of the registered entry inside the server map (case-sensitive)
    pub entry_key: &'static str,
    /// Whether the entry carries an empty `headers` object
    pub with_headers: bool,
}

const MCP_SERVERS_LAYOUT: EntryLayout =
    EntryLayout { key_path: &["mcpServers"], entry_key: "apiverve", with_headers: false };

// VS Code nests servers under `mcp.servers` and names entries in PascalCase.
const VSCODE_LAYOUT: EntryLayout =
    EntryLayout { key_path: &["mcp", "servers"], entry_key: "APIVerve", with_headers: true };

impl Client {
    pub const ALL: [Self; 3] = [Self::ClaudeDesktop, Self::VsCode, Self::Cursor];

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::ClaudeDesktop => "Claude Desktop",
            Self::VsCode => "VS Code",
            Self::Cursor => "Cursor",
        }
    }

    /// Short identifier used in environment variable names and the app config.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::ClaudeDesktop => "claude",
            Self::VsCode => "vscode",
            Self::Cursor => "cursor",
        }
    }

    #[must_use]
    pub const fn layout(self) -> EntryLayout {
        match self {
            Self::ClaudeDesktop | Self::Cursor => MCP_SERVERS_LAYOUT,
            Self::VsCode => VSCODE_LAYOUT,
        }
    }
}

impl fmt::Display for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Client selection accepted on the command line and in the app config.
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum Target {
    /// Claude Desktop
    #[default]
    Claude,
    /// VS Code
    Vscode,
    /// Cursor
    Cursor,
    /// Every supported client
    All,
}

impl Target {
    /// Clients covered by this target, in configuration order.
    #[must_use]
    pub fn clients(self) -> &'static [Client] {
        match self {
            Self::Claude => &[Client::ClaudeDesktop],
            Self::Vscode => &[Client::VsCode],
            Self::Cursor => &[Client::Cursor],
            Self::All => &Client::ALL,
        }
    }
}
