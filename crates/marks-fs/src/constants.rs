//! Fixed sidecar filenames.

use std::path::Path;

/// Files the tool reads and writes inside a directory tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarksFile {
    /// Per-directory storage, paths relative to its own directory
    Local,
    /// Flat export written at the root of a join
    Global,
    /// Per-directory detection configuration
    Config,
}

impl MarksFile {
    /// Get the file name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local.audipomark",
            Self::Global => "global.audipomark",
            Self::Config => ".audipomarks",
        }
    }

    /// Check whether `path` names this file.
    pub fn matches(&self, path: &Path) -> bool {
        path.file_name().is_some_and(|name| name == self.as_str())
    }
}

impl std::fmt::Display for MarksFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
