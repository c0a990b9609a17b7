//! [`TestTree`] scratch directory for engine and CLI tests.

use std::fs;
use std::path::{Path, PathBuf};

use marks_schema::{MarkStorage, read_storage, write_storage};
use tempfile::TempDir;

/// A temporary directory with helpers for laying out audio files and storages.
///
/// # Example
///
/// ```rust,no_run
/// use marks_test_utils::{TestTree, entry, marks_at, storage};
///
/// let tree = TestTree::new();
/// tree.write_audio("A/song.mp3", 1000);
/// tree.write_storage("sync.audipomark", &storage("/sdcard", vec![
///     entry("/sdcard/Sync/A/song.mp3", 1000, marks_at(&[500])),
/// ]));
/// ```
pub struct TestTree {
    temp_dir: TempDir,
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}

impl TestTree {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of `rel` under the root.
    pub fn path(&self, rel: &str) -> PathBuf {
        self.root().join(rel)
    }

    /// Create a directory (and its parents) under the root.
    pub fn mkdir(&self, rel: &str) -> PathBuf {
        let path = self.path(rel);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Write a stub audio file of exactly `size` bytes, creating parent directories.
    pub fn write_audio(&self, rel: &str, size: usize) -> PathBuf {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, vec![0u8; size]).unwrap();
        path
    }

    /// Write arbitrary text, creating parent directories.
    pub fn write_text(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    /// Write a storage document at `rel`.
    pub fn write_storage(&self, rel: &str, storage: &MarkStorage) -> PathBuf {
        let path = self.path(rel);
        write_storage(&path, storage).unwrap();
        path
    }

    /// Read and validate the storage document at `rel`.
    pub fn read_storage(&self, rel: &str) -> MarkStorage {
        let path = self.path(rel);
        read_storage(&path)
            .unwrap_or_else(|e| panic!("Could not read storage {}: {e}", path.display()))
    }

    /// Assert that `rel` exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_exists(&self, rel: &str) {
        let path = self.path(rel);
        assert!(path.exists(), "Expected file to exist: {}", path.display());
    }

    /// Assert that `rel` does **not** exist.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path exists.
    pub fn assert_not_exists(&self, rel: &str) {
        let path = self.path(rel);
        assert!(!path.exists(), "Expected file NOT to exist: {}", path.display());
    }
}
