use crate::app_config::PathOverrides;
use crate::client::Client;
use crate::InstallError;
use std::path::PathBuf;
use tracing::debug;

const APPDATA_ENV: &str = "APPDATA";
const CLAUDE_CONFIG_PATH_ENV: &str = "APIVERVE_MCP_CLAUDE_CONFIG_PATH";
const VSCODE_CONFIG_PATH_ENV: &str = "APIVERVE_MCP_VSCODE_CONFIG_PATH";
const CURSOR_CONFIG_PATH_ENV: &str = "APIVERVE_MCP_CURSOR_CONFIG_PATH";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    MacOs,
    Windows,
    /// Linux and every other Unix-like system
    Linux,
}

impl Platform {
    #[must_use]
    pub const fn current() -> Self {
        if cfg!(target_os = "macos") {
            Self::MacOs
        } else if cfg!(windows) {
            Self::Windows
        } else {
            Self::Linux
        }
    }
}

/// Directory a config path is rooted at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathRoot {
    Home,
    AppData,
}

struct PathRule {
    platform: Platform,
    client: Client,
    root: PathRoot,
    suffix: &'static [&'static str],
}

const PATH_RULES: [PathRule; 9] = [
    PathRule {
        platform: Platform::MacOs,
        client: Client::ClaudeDesktop,
        root: PathRoot::Home,
        suffix: &["Library", "Application Support", "Claude", "claude_desktop_config.json"],
    },
    PathRule {
        platform: Platform::MacOs,
        client: Client::VsCode,
        root: PathRoot::Home,
        suffix: &["Library", "Application Support", "Code", "User", "settings.json"],
    },
    PathRule {
        platform: Platform::MacOs,
        client: Client::Cursor,
        root: PathRoot::Home,
        suffix: &["Library", "Application Support", "Cursor", "User", "settings.json"],
    },
    PathRule {
        platform: Platform::Windows,
        client: Client::ClaudeDesktop,
        root: PathRoot::AppData,
        suffix: &["Claude", "claude_desktop_config.json"],
    },
    PathRule {
        platform: Platform::Windows,
        client: Client::VsCode,
        root: PathRoot::AppData,
        suffix: &["Code", "User", "settings.json"],
    },
    PathRule {
        platform: Platform::Windows,
        client: Client::Cursor,
        root: PathRoot::AppData,
        suffix: &["Cursor", "User", "settings.json"],
    },
    PathRule {
        platform: Platform::Linux,
        client: Client::ClaudeDesktop,
        root: PathRoot::Home,
        suffix: &[".config", "Claude", "claude_desktop_config.json"],
    },
    PathRule {
        platform: Platform::Linux,
        client: Client::VsCode,
        root: PathRoot::Home,
        suffix: &[".config", "Code", "User", "settings.json"],
    },
    PathRule {
        platform: Platform::Linux,
        client: Client::Cursor,
        root: PathRoot::Home,
        suffix: &[".config", "Cursor", "User", "settings.json"],
    },
];

/// Root and path components of a client's config file on a platform.
#[must_use]
pub fn config_path_rule(
    platform: Platform,
    client: Client,
) -> Option<(PathRoot, &'static [&'static str])> {
    PATH_RULES
        .iter()
        .find(|rule| rule.platform == platform && rule.client == client)
        .map(|rule| (rule.root, rule.suffix))
}

/// Snapshot of the environment values path resolution depends on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathEnv {
    pub home_dir: Option<PathBuf>,
    pub app_data_dir: Option<PathBuf>,
}

impl PathEnv {
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            home_dir: directories::BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf()),
            app_data_dir: non_empty_env(APPDATA_ENV).map(PathBuf::from),
        }
    }
}

/// Resolve a client's config path from the platform rule table.
///
/// # Errors
///
/// Returns [`InstallError::PathResolution`] if the root directory the rule
/// needs is unknown (no `APPDATA` on Windows, no home directory elsewhere).
pub fn resolve_config_path(
    client: Client,
    platform: Platform,
    env: &PathEnv,
) -> Result<PathBuf, InstallError> {
    let (root, suffix) = config_path_rule(platform, client).ok_or_else(|| {
        InstallError::PathResolution(format!("No config path known for {client} on {platform:?}"))
    })?;

    let base = match root {
        PathRoot::Home => env.home_dir.clone().ok_or_else(|| {
            InstallError::PathResolution("Could not determine home directory".to_string())
        })?,
        PathRoot::AppData => env.app_data_dir.clone().ok_or_else(|| {
            InstallError::PathResolution(format!("{APPDATA_ENV} environment variable not found"))
        })?,
    };

    Ok(suffix.iter().fold(base, |path, component| path.join(component)))
}

/// Environment variable that overrides a client's config path.
#[must_use]
pub const fn override_env_var(client: Client) -> &'static str {
    match client {
        Client::ClaudeDesktop => CLAUDE_CONFIG_PATH_ENV,
        Client::VsCode => VSCODE_CONFIG_PATH_ENV,
        Client::Cursor => CURSOR_CONFIG_PATH_ENV,
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|value| value.trim().to_string()).filter(|value| !value.is_empty())
}

/// Finds config files, applying overrides before the platform defaults.
///
/// Lookup order: the client's `APIVERVE_MCP_*_CONFIG_PATH` variable, then the
/// app config `[paths]` table, then the rule table.
#[derive(Debug, Clone)]
pub struct ConfigLocator {
    platform: Platform,
    env: PathEnv,
    overrides: PathOverrides,
}

impl ConfigLocator {
    #[must_use]
    pub fn new(platform: Platform, env: PathEnv) -> Self {
        Self { platform, env, overrides: PathOverrides::default() }
    }

    #[must_use]
    pub fn from_env() -> Self {
        Self::new(Platform::current(), PathEnv::from_env())
    }

    #[must_use]
    pub fn with_overrides(mut self, overrides: PathOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Locate the config file for a client.
    ///
    /// # Errors
    ///
    /// Returns [`InstallError::PathResolution`] when no override applies and
    /// the platform default cannot be resolved.
    pub fn locate(&self, client: Client) -> Result<PathBuf, InstallError> {
        if let Some(path) = non_empty_env(override_env_var(client)) {
            debug!("{client} config path overridden by {}", override_env_var(client));
            return Ok(PathBuf::from(path));
        }

        if let Some(path) = self.overrides.get(client) {
            debug!("{client} config path overridden by app config");
            return Ok(path.to_path_buf());
        }

        resolve_config_path(client, self.platform, &self.env)
    }
}
