//! Lexical path arithmetic
//!
//! Storages describe files by path strings recorded on another machine, so
//! every computation here is purely lexical: `.` and `..` are folded, links
//! are never resolved and nothing touches the filesystem except
//! [`absolutize`], which reads the current directory.

use std::path::{Component, Path, PathBuf};

use crate::{Error, Result};

/// Fold `.` and `..` components.
///
/// Leading `..` of a relative path are kept; `..` above a root is dropped.
/// An empty result is `.`.
pub fn clean(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }

    if out.is_empty() {
        PathBuf::from(".")
    } else {
        out.iter().map(|c| c.as_os_str()).collect()
    }
}

/// True if the path starts at a root, including drive-less `/x` on Windows.
///
/// Exported storages carry device paths such as `/storage/emulated/0`,
/// which must count as absolute regardless of the host platform.
pub fn is_rooted(path: &Path) -> bool {
    path.has_root()
}

/// Resolve `path` against the current directory and clean it.
pub fn absolutize(path: &Path) -> Result<PathBuf> {
    if is_rooted(path) {
        return Ok(clean(path));
    }
    let cwd = std::env::current_dir().map_err(|source| Error::CurrentDir {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(clean(&cwd.join(path)))
}

/// Express `path` relative to `base`.
///
/// Both should be rooted (or both relative to the same directory). Returns
/// an empty path when they are equal and `..` segments when `path` lies
/// outside `base`.
pub fn relative_to(path: &Path, base: &Path) -> PathBuf {
    let path = clean(path);
    let base = clean(base);
    let path_parts: Vec<_> = path.components().filter(|c| *c != Component::CurDir).collect();
    let base_parts: Vec<_> = base.components().filter(|c| *c != Component::CurDir).collect();

    let common = path_parts
        .iter()
        .zip(base_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut out = PathBuf::new();
    for _ in common..base_parts.len() {
        out.push("..");
    }
    for part in &path_parts[common..] {
        out.push(part.as_os_str());
    }
    out
}

/// True if `path` is `root` or lies somewhere beneath it.
pub fn is_within(path: &Path, root: &Path) -> bool {
    clean(path).starts_with(clean(root))
}

/// True if `path` lies beneath `root`; `root` itself is not below itself.
pub fn is_below(path: &Path, root: &Path) -> bool {
    is_within(path, root) && clean(path) != clean(root)
}

/// Render a path with forward slashes, the form storages use on disk.
pub fn to_slash(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
