#![allow(missing_docs)]

pub mod app_config;
pub mod cli;
pub mod client;
pub mod client_paths;
pub mod config;
pub mod install;
pub mod merge;

pub use client::{Client, EntryLayout, Target};
pub use config::{ConfigDocument, ServerDescriptor};
pub use install::{InstallOptions, InstallReport, Installer};
pub use merge::{merge_server_entry, MergeOutcome};

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum InstallError {
    #[error("Could not resolve config path: {0}")]
    PathResolution(String),

    #[error("Failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: std::io::Error },

    #[error("Failed to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: std::io::Error },

    #[error("Failed to back up {}: {source}", .path.display())]
    Backup { path: PathBuf, source: std::io::Error },

    #[error("JSON serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
