//! Error types for marks-schema

use std::path::PathBuf;

use crate::validate::Violation;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Fs(#[from] marks_fs::Error),

    /// A mark storage document that is not valid JSON or does not match its schema.
    #[error("Invalid mark storage {}:\n{}", .path.display(), render(.violations))]
    Storage {
        path: PathBuf,
        violations: Vec<Violation>,
    },

    /// A configuration sidecar that is not valid JSON or does not match its schema.
    #[error("Invalid configuration {}:\n{}", .path.display(), render(.violations))]
    Config {
        path: PathBuf,
        violations: Vec<Violation>,
    },

    /// A built-in schema that the validator refused to compile.
    #[error("Failed to compile document schema: {message}")]
    SchemaCompile { message: String },

    #[error("Failed to serialize {}: {source}", .path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    /// True for documents rejected by parsing or validation, as opposed to I/O failures.
    pub fn is_invalid_document(&self) -> bool {
        matches!(self, Self::Storage { .. } | Self::Config { .. })
    }

    /// The violations behind an invalid document, empty for other errors.
    pub fn violations(&self) -> &[Violation] {
        match self {
            Self::Storage { violations, .. } | Self::Config { violations, .. } => violations,
            _ => &[],
        }
    }
}

fn render(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
