//! Error types for marks-core

use std::path::PathBuf;

/// Result type for marks-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in marks-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Fs(#[from] marks_fs::Error),

    #[error(transparent)]
    Schema(#[from] marks_schema::Error),

    #[error(transparent)]
    Ffmpeg(#[from] marks_ffmpeg::Error),

    /// A directory an operation starts from does not exist or cannot be listed
    #[error("Directory not found: \"{}\"", .path.display())]
    DirectoryNotFound { path: PathBuf },

    /// The operator declined to continue past a discrepancy
    #[error("Aborted by operator")]
    Aborted,

    /// The operator could not be asked
    #[error("Interactive prompt error: {message}")]
    Prompt { message: String },
}
