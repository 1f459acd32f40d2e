use super::ConfigDocument;
use crate::InstallError;
use chrono::Local;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Write a configuration document to a JSON file
///
/// The document is written to a temporary file beside the target and renamed
/// over it, so the target is either fully replaced or left untouched. When
/// `path` is a symlink the file it points to is replaced and the link is kept.
///
/// # Errors
///
/// Returns an error if:
/// - Unable to create parent directories
/// - Unable to serialize the document
/// - Unable to write or rename the temporary file
pub fn write_config_document<P: AsRef<Path>>(
    path: P,
    document: &ConfigDocument,
) -> Result<(), InstallError> {
    let path_ref = path.as_ref();
    let write_error = |source| InstallError::Write { path: path_ref.to_path_buf(), source };

    let json = serde_json::to_string_pretty(document)?;

    let target = resolve_write_target(path_ref).map_err(write_error)?;
    if target != path_ref {
        debug!("{} is a symlink, writing through to {}", path_ref.display(), target.display());
    }

    let parent = parent_dir(&target);
    fs::create_dir_all(parent).map_err(write_error)?;

    let mut temp_file = NamedTempFile::new_in(parent).map_err(write_error)?;
    temp_file.write_all(json.as_bytes()).map_err(write_error)?;
    temp_file.as_file().sync_all().map_err(write_error)?;

    // Temp files are created owner-only; keep the mode of the file being replaced
    if let Ok(metadata) = fs::metadata(&target) {
        temp_file.as_file().set_permissions(metadata.permissions()).map_err(write_error)?;
    }

    temp_file.persist(&target).map_err(|e| write_error(e.error))?;

    Ok(())
}

/// File the rename must land on: `path` itself, or the file a symlink at
/// `path` points to. A dangling link resolves to its (not yet existing) target.
fn resolve_write_target(path: &Path) -> io::Result<PathBuf> {
    match fs::symlink_metadata(path) {
        Ok(metadata) if metadata.file_type().is_symlink() => {
            fs::canonicalize(path).or_else(|_| {
                let link = fs::read_link(path)?;
                Ok(parent_dir(path).join(link))
            })
        },
        _ => Ok(path.to_path_buf()),
    }
}

fn parent_dir(path: &Path) -> &Path {
    path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or_else(|| Path::new("."))
}

/// Create a backup of a file with timestamp
///
/// # Errors
///
/// Returns an error if unable to copy the file
pub fn backup_file<P: AsRef<Path>>(path: P) -> Result<Option<PathBuf>, InstallError> {
    let path_ref = path.as_ref();

    if !path_ref.exists() {
        return Ok(None);
    }

    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let backup_path = path_ref.with_file_name(format!(
        "{}.backup.{}",
        path_ref.file_name().and_then(|n| n.to_str()).unwrap_or("settings.json"),
        timestamp
    ));

    fs::copy(path_ref, &backup_path)
        .map_err(|source| InstallError::Backup { path: path_ref.to_path_buf(), source })?;

    Ok(Some(backup_path))
}
