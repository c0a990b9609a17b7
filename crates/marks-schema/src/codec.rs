//! Reading and writing documents
//!
//! Reads go text -> JSON value -> schema check -> typed value. Read failures
//! stay `marks_fs` I/O errors; anything wrong with the content becomes
//! [`Error::Storage`] or [`Error::Config`] carrying every violation.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::validate::{self, Violation, config_schema, storage_schema};
use crate::{Error, MarkConfig, MarkStorage, Result};

/// Read and validate a mark storage document.
pub fn read_storage(path: &Path) -> Result<MarkStorage> {
    read_document(path, &storage_schema(), |path, violations| Error::Storage {
        path,
        violations,
    })
}

/// Write a mark storage document as pretty-printed JSON, replacing any existing file.
pub fn write_storage(path: &Path, storage: &MarkStorage) -> Result<()> {
    write_document(path, storage)
}

/// Read and validate a configuration sidecar.
pub fn read_config(path: &Path) -> Result<MarkConfig> {
    read_document(path, &config_schema(), |path, violations| Error::Config {
        path,
        violations,
    })
}

/// Write a configuration sidecar.
pub fn write_config(path: &Path, config: &MarkConfig) -> Result<()> {
    write_document(path, config)
}

fn read_document<T, F>(path: &Path, schema: &Value, invalid: F) -> Result<T>
where
    T: DeserializeOwned,
    F: Fn(PathBuf, Vec<Violation>) -> Error,
{
    let text = marks_fs::io::read_text(path)?;

    let value: Value = serde_json::from_str(&text).map_err(|e| {
        invalid(
            path.to_path_buf(),
            vec![Violation::new("", format!("invalid JSON: {}", e))],
        )
    })?;

    let violations = validate::validate(schema, &value)?;
    if !violations.is_empty() {
        tracing::debug!(path = %path.display(), count = violations.len(), "Document failed validation");
        return Err(invalid(path.to_path_buf(), violations));
    }

    serde_json::from_value(value)
        .map_err(|e| invalid(path.to_path_buf(), vec![Violation::new("", e.to_string())]))
}

fn write_document<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let mut content = serde_json::to_string_pretty(value).map_err(|source| Error::Serialize {
        path: path.to_path_buf(),
        source,
    })?;
    content.push('\n');
    marks_fs::io::write_text(path, &content)?;
    Ok(())
}
