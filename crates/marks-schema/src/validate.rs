//! Schema validation
//!
//! Documents are checked against a JSON Schema (draft 2020-12) before
//! deserialization, so a bad file produces one [`Violation`] per offending
//! field instead of stopping at the first. Every object is closed with
//! `additionalProperties: false`.

use std::fmt;

use jsonschema::Draft;
use serde_json::{Value, json};

use crate::{Error, Result};

/// One offending field, addressed by a dotted path such as `files.2.marklist.0`.
///
/// Missing and unexpected fields are reported at the object holding them;
/// the message names the field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub path: String,
    pub message: String,
}

impl Violation {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "<root>: {}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

fn count() -> Value {
    json!({"type": "integer", "minimum": 0})
}

fn mark_schema() -> Value {
    json!({
        "type": "object",
        "required": ["id", "pos"],
        "properties": {
            "id": count(),
            "pos": count(),
            "followingRangeState": {"type": "number"},
            "state": {"type": "number"},
            "tag": {"type": "string"},
            "type": {"type": "number"}
        },
        "additionalProperties": false
    })
}

/// Schema of a mark storage document.
pub fn storage_schema() -> Value {
    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "type": "object",
        "required": ["externalStorageDirectory", "files"],
        "properties": {
            "externalStorageDirectory": {"type": "string"},
            "files": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["fileSize", "filepath", "marklist"],
                    "properties": {
                        "fileSize": count(),
                        "filepath": {"type": "string"},
                        "marklist": {"type": "array", "items": mark_schema()}
                    },
                    "additionalProperties": false
                }
            }
        },
        "additionalProperties": false
    })
}

/// Schema of a configuration sidecar.
pub fn config_schema() -> Value {
    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "type": "object",
        "required": ["ffmpeg"],
        "properties": {
            "ffmpeg": {
                "type": "object",
                "required": ["duration", "noise"],
                "properties": {
                    "duration": {"type": "number"},
                    "noise": {"type": "number"}
                },
                "additionalProperties": false
            }
        },
        "additionalProperties": false
    })
}

/// Check `instance` against `schema`, returning every violation found. Empty means valid.
pub fn validate(schema: &Value, instance: &Value) -> Result<Vec<Violation>> {
    let validator = jsonschema::options()
        .with_draft(Draft::Draft202012)
        .build(schema)
        .map_err(|err| Error::SchemaCompile {
            message: err.to_string(),
        })?;
    Ok(validator
        .iter_errors(instance)
        .map(|err| Violation::new(dotted(&err.instance_path().to_string()), err.to_string()))
        .collect())
}

/// `/files/0/pos` -> `files.0.pos`; the root pointer is the empty path.
fn dotted(pointer: &str) -> String {
    pointer
        .split('/')
        .skip(1)
        .map(|token| token.replace("~1", "/").replace("~0", "~"))
        .collect::<Vec<_>>()
        .join(".")
}
