use crate::client::Target;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "apiverve-mcp",
    about = "Register the APIVerve MCP server with Claude Desktop, VS Code, or Cursor",
    long_about = "apiverve-mcp adds the APIVerve MCP server to the configuration of your MCP clients.

It writes the following entries, keeping everything else in the file intact:
  • Claude Desktop: mcpServers.apiverve in claude_desktop_config.json
  • Cursor:         mcpServers.apiverve in Cursor/User/settings.json
  • VS Code:        mcp.servers.APIVerve in Code/User/settings.json

Config file locations can be overridden with APIVERVE_MCP_CLAUDE_CONFIG_PATH,
APIVERVE_MCP_VSCODE_CONFIG_PATH, APIVERVE_MCP_CURSOR_CONFIG_PATH, or the [paths]
table of $XDG_CONFIG_HOME/apiverve-mcp/config.toml. APIVERVE_MCP_TARGET selects
the client when no target argument is given.

Examples:
  # Configure Claude Desktop (default)
  apiverve-mcp

  # Configure every supported client
  apiverve-mcp all

  # Preview the VS Code settings without writing them
  apiverve-mcp vscode --dry-run",
    version,
    author
)]
pub struct Cli {
    /// Client to configure [default: claude]
    #[arg(value_enum, env = "APIVERVE_MCP_TARGET")]
    pub target: Option<Target>,

    /// Preview merged configuration without writing it
    #[arg(short, long)]
    pub dry_run: bool,

    /// Create timestamped backup of each config file before rewriting it
    #[arg(short, long)]
    pub backup: bool,

    /// Enable debug output (shows INFO and DEBUG messages)
    #[arg(long, global = true)]
    pub debug: bool,

    /// Enable trace output (shows all log messages including TRACE)
    #[arg(short = 't', long, global = true)]
    pub trace: bool,
}
