//! Error types for marks-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from marks-core
    #[error(transparent)]
    Core(#[from] marks_core::Error),

    /// Error from marks-ffmpeg
    #[error(transparent)]
    Ffmpeg(#[from] marks_ffmpeg::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }

    /// True when the operator chose to stop at a discrepancy.
    pub fn is_abort(&self) -> bool {
        matches!(self, Self::Core(marks_core::Error::Aborted))
    }
}
