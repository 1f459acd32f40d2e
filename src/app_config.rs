use crate::client::{Client, Target};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_CONFIG_PATH_ENV: &str = "APIVERVE_MCP_CONFIG";

/// Preferences for the installer itself, read from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct AppConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<DefaultConfig>,
    #[serde(default, skip_serializing_if = "PathOverrides::is_empty")]
    pub paths: PathOverrides,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct DefaultConfig {
    /// Target used when none is given on the command line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<Target>,
    /// Back up each config file before it is rewritten
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup: Option<bool>,
}

/// Explicit config file locations that bypass the per-platform defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct PathOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claude: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vscode: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<PathBuf>,
}

impl PathOverrides {
    #[must_use]
    pub fn get(&self, client: Client) -> Option<&Path> {
        match client {
            Client::ClaudeDesktop => self.claude.as_deref(),
            Client::VsCode => self.vscode.as_deref(),
            Client::Cursor => self.cursor.as_deref(),
        }
    }

    pub fn set(&mut self, client: Client, path: impl Into<PathBuf>) {
        let slot = match client {
            Client::ClaudeDesktop => &mut self.claude,
            Client::VsCode => &mut self.vscode,
            Client::Cursor => &mut self.cursor,
        };
        *slot = Some(path.into());
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.claude.is_none() && self.vscode.is_none() && self.cursor.is_none()
    }
}

impl AppConfig {
    /// Load the application configuration from the default path
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Unable to determine the config directory
    /// - Unable to read the config file (other than it not existing)
    /// - The config file contains invalid TOML
    pub fn load() -> Result<Option<Self>> {
        Self::load_from(Self::config_path()?)
    }

    /// Load the application configuration from an explicit path
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Option<Self>> {
        let config_path = path.as_ref();

        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config at {}", config_path.display()))?;

        Ok(Some(config))
    }

    /// Get the path to the configuration file
    ///
    /// # Errors
    ///
    /// Returns an error if unable to determine the config directory
    pub fn config_path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(APP_CONFIG_PATH_ENV).filter(|v| !v.is_empty()) {
            Ok(PathBuf::from(path))
        } else if let Some(config_home) =
            std::env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty())
        {
            Ok(PathBuf::from(config_home).join("apiverve-mcp").join("config.toml"))
        } else if let Some(proj_dirs) = ProjectDirs::from("", "", "apiverve-mcp") {
            Ok(proj_dirs.config_dir().join("config.toml"))
        } else {
            anyhow::bail!("Could not determine config directory")
        }
    }

    #[must_use]
    pub fn default_target(&self) -> Option<Target> {
        self.default.as_ref().and_then(|d| d.target)
    }

    #[must_use]
    pub fn backup_enabled(&self) -> bool {
        self.default.as_ref().and_then(|d| d.backup).unwrap_or(false)
    }
}
