//! Error types for ffmpeg operations

use std::path::PathBuf;

/// Errors that can occur while locating or running ffmpeg
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No usable ffmpeg binary
    #[error("FFmpeg cannot be found on your system (tried {candidate}). Please install it.")]
    NotFound {
        /// The command or path that was tried
        candidate: String,
    },

    /// I/O error while spawning the subprocess
    #[error("Failed to run {}: {source}", .path.display())]
    Spawn {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Subprocess exited with non-zero status
    #[error("ffmpeg failed on {} (exit code {code}): {stderr}", .file.display())]
    CommandFailed {
        /// Audio file being analysed
        file: PathBuf,
        /// Exit code from the subprocess
        code: i32,
        /// Captured stderr output
        stderr: String,
    },
}

/// Result type alias for ffmpeg operations
pub type Result<T> = std::result::Result<T, Error>;
