//! ffmpeg discovery
//!
//! Resolves the binary once, before any audio file is processed, so a
//! missing installation is reported a single time up front.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::{Error, Result};

/// Command name searched on `PATH` when no explicit binary is given
const FFMPEG_COMMAND: &str = "ffmpeg";

/// Environment variable the CLI reads for an explicit binary path
pub const FFMPEG_ENV: &str = "AUDIPOMARKS_FFMPEG";

/// A located, runnable ffmpeg binary
#[derive(Debug, Clone)]
pub struct Ffmpeg {
    /// Path (or bare command name) used to spawn ffmpeg
    path: PathBuf,
    /// Version string reported by `-version`
    version: String,
}

impl Ffmpeg {
    /// Locate ffmpeg, preferring `explicit` over a `PATH` lookup.
    pub fn locate(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::at(path),
            None => {
                let version = probe(Path::new(FFMPEG_COMMAND)).ok_or_else(|| Error::NotFound {
                    candidate: FFMPEG_COMMAND.to_string(),
                })?;
                let path = resolve_path(FFMPEG_COMMAND).unwrap_or_else(|| PathBuf::from(FFMPEG_COMMAND));
                tracing::debug!(path = %path.display(), %version, "Located ffmpeg on PATH");
                Ok(Self { path, version })
            }
        }
    }

    /// Use the binary at `path`, checking that it answers `-version`.
    pub fn at(path: &Path) -> Result<Self> {
        let version = probe(path).ok_or_else(|| Error::NotFound {
            candidate: path.display().to_string(),
        })?;
        tracing::debug!(path = %path.display(), %version, "Using ffmpeg");
        Ok(Self {
            path: path.to_path_buf(),
            version,
        })
    }

    /// Path used to spawn ffmpeg
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Version string, e.g. `6.1.1`
    pub fn version(&self) -> &str {
        &self.version
    }
}

/// Run `<candidate> -version` and extract the version token.
///
/// Output starts with `ffmpeg version <version> Copyright ...`.
fn probe(candidate: &Path) -> Option<String> {
    let output = Command::new(candidate)
        .arg("-version")
        .stdin(Stdio::null())
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    parse_version(&stdout)
}

fn parse_version(output: &str) -> Option<String> {
    let first_line = output.lines().next()?;
    let rest = first_line.trim().strip_prefix("ffmpeg version ")?;
    rest.split_whitespace().next().map(str::to_string)
}

/// Resolve a command name to its full path
fn resolve_path(command: &str) -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    let which_cmd = "where";
    #[cfg(not(target_os = "windows"))]
    let which_cmd = "which";

    let output = Command::new(which_cmd).arg(command).output().ok()?;

    if output.status.success() {
        let path_str = String::from_utf8_lossy(&output.stdout);
        let first_line = path_str.lines().next()?.trim();
        if !first_line.is_empty() {
            return Some(PathBuf::from(first_line));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_version() {
        let out = "ffmpeg version 6.1.1-3ubuntu5 Copyright (c) 2000-2023 the FFmpeg developers\nbuilt with gcc";
        assert_eq!(parse_version(out).as_deref(), Some("6.1.1-3ubuntu5"));
    }

    #[test]
    fn test_parse_version_rejects_other_tools() {
        assert_eq!(parse_version("Python 3.12.1"), None);
        assert_eq!(parse_version(""), None);
    }

    #[test]
    fn test_explicit_missing_binary_is_not_found() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("ffmpeg-does-not-exist");

        match Ffmpeg::at(&missing) {
            Err(Error::NotFound { candidate }) => assert!(candidate.contains("ffmpeg-does-not-exist")),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }
}
