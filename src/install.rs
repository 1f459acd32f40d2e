use crate::client::{Client, Target};
use crate::client_paths::ConfigLocator;
use crate::config::reader::{self, LoadStatus};
use crate::config::{writer, ConfigDocument, ServerDescriptor};
use crate::merge::{merge_server_entry, MergeOutcome};
use crate::InstallError;
use serde_json::json;
use std::path::PathBuf;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InstallOptions {
    /// Merge in memory only; nothing is written
    pub dry_run: bool,
    /// Copy an existing config file aside before rewriting it
    pub backup: bool,
}

/// Result of configuring one client successfully.
#[derive(Debug, Clone)]
pub struct ClientInstall {
    pub client: Client,
    pub path: PathBuf,
    pub load_status: LoadStatus,
    pub outcome: MergeOutcome,
    /// The merged document, as written (or as it would be on a dry run)
    pub document: ConfigDocument,
    pub backup_path: Option<PathBuf>,
    pub written: bool,
}

#[derive(Debug)]
pub struct ClientAttempt {
    pub client: Client,
    pub result: Result<ClientInstall, InstallError>,
}

/// Per-client results of a `configure` run.
#[derive(Debug, Default)]
pub struct InstallReport {
    pub attempts: Vec<ClientAttempt>,
}

impl InstallReport {
    /// True when every attempted client was configured.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.attempts.iter().all(|attempt| attempt.result.is_ok())
    }

    pub fn successes(&self) -> impl Iterator<Item = &ClientInstall> {
        self.attempts.iter().filter_map(|attempt| attempt.result.as_ref().ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = (Client, &InstallError)> {
        self.attempts
            .iter()
            .filter_map(|attempt| attempt.result.as_ref().err().map(|e| (attempt.client, e)))
    }
}

/// Registers a server descriptor with MCP client configuration files.
#[derive(Debug, Clone)]
pub struct Installer {
    descriptor: ServerDescriptor,
    locator: ConfigLocator,
    options: InstallOptions,
}

impl Installer {
    #[must_use]
    pub const fn new(
        descriptor: ServerDescriptor,
        locator: ConfigLocator,
        options: InstallOptions,
    ) -> Self {
        Self { descriptor, locator, options }
    }

    #[must_use]
    pub const fn descriptor(&self) -> &ServerDescriptor {
        &self.descriptor
    }

    /// Configure every client selected by `target`.
    ///
    /// Clients are handled independently: a failure is recorded in the report
    /// and the remaining clients are still attempted.
    pub fn configure(&self, target: Target) -> InstallReport {
        let attempts = target
            .clients()
            .iter()
            .map(|&client| {
                let result = self.configure_client(client);
                if let Err(e) = &result {
                    debug!("{client} attempt failed: {e}");
                }
                ClientAttempt { client, result }
            })
            .collect();

        InstallReport { attempts }
    }

    /// Load, merge and save a single client's configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config path cannot be resolved
    /// - An existing config file cannot be read
    /// - The backup copy or the write fails
    pub fn configure_client(&self, client: Client) -> Result<ClientInstall, InstallError> {
        let path = self.locator.locate(client)?;
        info!("{client} config path: {}", path.display());

        let loaded = reader::read_config_document(&path)?;
        match &loaded.status {
            LoadStatus::Missing => debug!("No existing config at {}", path.display()),
            LoadStatus::Parsed => debug!("Loaded existing config from {}", path.display()),
            LoadStatus::Malformed(reason) => warn!(
                "Could not parse existing config at {} ({reason}), creating new one",
                path.display()
            ),
        }

        let mut document = loaded.document;
        let outcome = merge_server_entry(&mut document, &client.layout(), &self.descriptor);
        debug!("Merged {client} entry: {outcome:?}");

        if self.options.dry_run {
            info!("Dry run mode - not writing {}", path.display());
            return Ok(ClientInstall {
                client,
                path,
                load_status: loaded.status,
                outcome,
                document,
                backup_path: None,
                written: false,
            });
        }

        let backup_path = if self.options.backup { writer::backup_file(&path)? } else { None };
        if let Some(backup) = &backup_path {
            debug!("Backup created: {}", backup.display());
        }

        writer::write_config_document(&path, &document)?;

        Ok(ClientInstall {
            client,
            path,
            load_status: loaded.status,
            outcome,
            document,
            backup_path,
            written: true,
        })
    }
}

/// JSON a user can paste into a client config by hand.
///
/// # Errors
///
/// Returns an error if the snippet cannot be serialized
pub fn manual_configuration_snippet(descriptor: &ServerDescriptor) -> Result<String, InstallError> {
    let layout = Client::ClaudeDesktop.layout();
    let snippet = json!({ "mcpServers": { layout.entry_key: descriptor.to_entry(&layout) } });
    Ok(serde_json::to_string_pretty(&snippet)?)
}
