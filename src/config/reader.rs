use super::ConfigDocument;
use crate::InstallError;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// How an existing configuration file was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// No file at the path
    Missing,
    /// File held a JSON object
    Parsed,
    /// File was unusable and will be replaced; carries the reason
    Malformed(String),
}

#[derive(Debug, Clone)]
pub struct LoadedDocument {
    pub document: ConfigDocument,
    pub status: LoadStatus,
}

impl LoadedDocument {
    fn empty(status: LoadStatus) -> Self {
        Self { document: ConfigDocument::new(), status }
    }
}

/// Read a client configuration document from a JSON file
///
/// A missing file yields an empty document. Content that is not a JSON object
/// also yields an empty document, with [`LoadStatus::Malformed`].
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read
pub fn read_config_document<P: AsRef<Path>>(path: P) -> Result<LoadedDocument, InstallError> {
    let path_ref = path.as_ref();

    if !path_ref.exists() {
        return Ok(LoadedDocument::empty(LoadStatus::Missing));
    }

    let content = fs::read(path_ref)
        .map_err(|source| InstallError::Read { path: path_ref.to_path_buf(), source })?;

    Ok(parse_config_document(&content))
}

/// Parse raw file content into a configuration document.
pub fn parse_config_document(content: &[u8]) -> LoadedDocument {
    match serde_json::from_slice::<Value>(content) {
        Ok(Value::Object(document)) => LoadedDocument { document, status: LoadStatus::Parsed },
        Ok(other) => LoadedDocument::empty(LoadStatus::Malformed(format!(
            "expected a JSON object, found {}",
            json_kind(&other)
        ))),
        Err(e) => LoadedDocument::empty(LoadStatus::Malformed(e.to_string())),
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
