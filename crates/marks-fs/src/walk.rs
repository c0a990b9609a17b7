//! Lazy depth-first tree walking
//!
//! Both walkers are single-pass, pre-order iterators over `walkdir`. Links
//! are not followed and siblings are visited in file-name order.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::{Error, Result};

/// Regular files under a root, at any depth.
pub struct Files {
    root: PathBuf,
    inner: walkdir::IntoIter,
}

/// Directories under a root, at any depth, excluding the root itself.
pub struct Dirs {
    root: PathBuf,
    inner: walkdir::IntoIter,
}

/// Walk every regular file beneath `root`.
pub fn files(root: &Path) -> Files {
    Files {
        root: root.to_path_buf(),
        inner: walker(root).into_iter(),
    }
}

/// Walk every directory beneath `root`, not including `root`.
pub fn dirs(root: &Path) -> Dirs {
    Dirs {
        root: root.to_path_buf(),
        inner: walker(root).min_depth(1).into_iter(),
    }
}

fn walker(root: &Path) -> WalkDir {
    WalkDir::new(root).follow_links(false).sort_by_file_name()
}

fn walk_error(root: &Path, err: walkdir::Error) -> Error {
    let path = err
        .path()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| root.to_path_buf());
    Error::io(path, err.into())
}

impl Iterator for Files {
    type Item = Result<PathBuf>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.inner.next()? {
                Ok(entry) if entry.file_type().is_file() => return Some(Ok(entry.into_path())),
                Ok(_) => continue,
                Err(err) => return Some(Err(walk_error(&self.root, err))),
            }
        }
    }
}

impl Iterator for Dirs {
    type Item = Result<PathBuf>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.inner.next()? {
                Ok(entry) if entry.file_type().is_dir() => return Some(Ok(entry.into_path())),
                Ok(_) => continue,
                Err(err) => return Some(Err(walk_error(&self.root, err))),
            }
        }
    }
}
