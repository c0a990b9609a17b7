//! Split a flat storage into per-directory local storages
//!
//! A flat storage exported from a device lists files by paths under a
//! foreign root. Splitting re-roots every entry under the directory holding
//! the input file, groups entries by the directory they land in, checks
//! each group against the real files and writes one local storage per
//! surviving group.
//!
//! Every check runs before the first write, so an abort leaves the tree
//! untouched.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use marks_fs::MarksFile;
use marks_fs::io::{directory_exists, file_exists, file_size};
use marks_fs::path::{absolutize, clean, is_below, is_rooted, relative_to, to_slash};
use marks_schema::{MarkStorage, MarkedFile, read_storage, write_storage};

use crate::Result;
use crate::algebra::{normalize, renumber};
use crate::resolve::{Discrepancy, Outcome, Resolver, YesToAll, settle};

/// Options for [`split`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SplitOptions {
    /// Drop marks too close to their predecessor before renumbering.
    pub normalize: bool,
}

/// What a split did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SplitReport {
    /// Local storages written, in group order.
    pub written: Vec<PathBuf>,
    /// Entries written across all groups.
    pub kept_files: usize,
    /// Entries left out, including those of skipped directories.
    pub skipped_files: usize,
    /// Group directories left out.
    pub skipped_dirs: usize,
    /// Marks written across all groups.
    pub marks: usize,
}

/// Entries that resolve into one directory.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub dir: PathBuf,
    /// Entries with `filepath` relative to `dir`.
    pub files: Vec<MarkedFile>,
}

/// Groups keyed by directory, iterated in the order directories were first seen.
#[derive(Debug, Clone, Default)]
pub struct DirGroups {
    groups: Vec<Group>,
    index: HashMap<PathBuf, usize>,
}

impl DirGroups {
    /// Append an entry to the group for `dir`, creating the group on first use.
    pub fn push(&mut self, dir: PathBuf, file: MarkedFile) {
        match self.index.get(&dir) {
            Some(&i) => self.groups[i].files.push(file),
            None => {
                self.index.insert(dir.clone(), self.groups.len());
                self.groups.push(Group {
                    dir,
                    files: vec![file],
                });
            }
        }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Group> {
        self.groups.iter()
    }
}

impl IntoIterator for DirGroups {
    type Item = Group;
    type IntoIter = std::vec::IntoIter<Group>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}

/// Split the flat storage at `input` into local storages beside the files it lists.
///
/// `root_hint` locates the foreign root the storage's absolute paths are
/// under; see [`resolve_foreign_root`].
pub fn split(
    input: &Path,
    root_hint: &Path,
    options: SplitOptions,
    resolver: &mut dyn Resolver,
) -> Result<SplitReport> {
    let storage = read_storage(input)?;
    tracing::info!(
        input = %input.display(),
        files = storage.files.len(),
        "Read flat storage"
    );

    let foreign_root = resolve_foreign_root(root_hint, &storage.external_storage_directory)?;
    let input = absolutize(input)?;
    let working_dir = input
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| input.clone());
    tracing::debug!(
        foreign_root = %foreign_root.display(),
        working_dir = %working_dir.display(),
        "Resolved roots"
    );

    let groups = build_groups(storage, &foreign_root, &working_dir);
    let (survivors, mut report) = validate_groups(groups, &working_dir, options, resolver)?;
    if survivors.is_empty() {
        tracing::warn!(working_dir = %working_dir.display(), "No entries survived, nothing to write");
    }
    report.written = write_groups(&survivors)?;
    Ok(report)
}

/// Absolute foreign root for a root hint.
///
/// An absolute hint is used as is. A relative hint is joined onto the
/// storage's recorded device root when that is absolute, and otherwise
/// resolved against the current directory.
pub fn resolve_foreign_root(hint: &Path, external_storage_directory: &str) -> Result<PathBuf> {
    let device_root = Path::new(external_storage_directory);
    if is_rooted(hint) {
        Ok(clean(hint))
    } else if is_rooted(device_root) {
        Ok(clean(&device_root.join(hint)))
    } else {
        Ok(absolutize(hint)?)
    }
}

/// Re-root every entry under `working_dir` and group by resulting directory.
pub fn build_groups(storage: MarkStorage, foreign_root: &Path, working_dir: &Path) -> DirGroups {
    let mut groups = DirGroups::default();
    for file in storage.files {
        let recorded = Path::new(&file.filepath);
        let relative = if is_rooted(recorded) {
            relative_to(recorded, foreign_root)
        } else {
            recorded.to_path_buf()
        };
        let full = clean(&working_dir.join(relative));
        let dir = full
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| full.clone());
        let filepath = to_slash(&relative_to(&full, &dir));

        tracing::debug!(entry = %file.filepath, dir = %dir.display(), "Grouped entry");
        groups.push(dir, MarkedFile { filepath, ..file });
    }
    groups
}

/// Check groups against the filesystem and keep what survives.
///
/// A group must lie below `working_dir`. The working directory itself is
/// rejected too: join never reads the root's own local storage, and the
/// input may be that very file.
///
/// Survivors carry their observed file size and marks renumbered from 1
/// across each group. Groups left with no entries are dropped.
pub fn validate_groups(
    groups: DirGroups,
    working_dir: &Path,
    options: SplitOptions,
    resolver: &mut dyn Resolver,
) -> Result<(DirGroups, SplitReport)> {
    tracing::info!(working_dir = %working_dir.display(), "Checking working dir for storage conformance");

    let mut yes_to_all = YesToAll::default();
    let mut survivors = DirGroups::default();
    let mut report = SplitReport::default();

    for group in groups {
        let unusable = if !is_below(&group.dir, working_dir) {
            Some(Discrepancy::DirectoryOutsideRoot {
                dir: group.dir.clone(),
                root: working_dir.to_path_buf(),
            })
        } else if !directory_exists(&group.dir) {
            Some(Discrepancy::DirectoryUnavailable {
                dir: group.dir.clone(),
            })
        } else {
            None
        };
        if let Some(discrepancy) = unusable {
            settle(resolver, &mut yes_to_all, &discrepancy)?;
            report.skipped_dirs += 1;
            report.skipped_files += group.files.len();
            continue;
        }

        let mut next_id = 1;
        for file in group.files {
            let path = group.dir.join(&file.filepath);
            if !file_exists(&path) {
                settle(
                    resolver,
                    &mut yes_to_all,
                    &Discrepancy::FileUnavailable { path },
                )?;
                report.skipped_files += 1;
                continue;
            }

            let actual = file_size(&path)?;
            if actual != file.file_size {
                let discrepancy = Discrepancy::SizeMismatch {
                    path,
                    expected: file.file_size,
                    actual,
                };
                if settle(resolver, &mut yes_to_all, &discrepancy)? == Outcome::LeaveOut {
                    report.skipped_files += 1;
                    continue;
                }
            }

            let marks = if options.normalize {
                normalize(file.marklist)
            } else {
                file.marklist
            };
            let marklist = renumber(marks, next_id);
            next_id += marklist.len() as u64;

            report.kept_files += 1;
            report.marks += marklist.len();
            survivors.push(
                group.dir.clone(),
                MarkedFile {
                    file_size: actual,
                    filepath: file.filepath,
                    marklist,
                },
            );
        }
    }

    Ok((survivors, report))
}

/// Write one local storage per group, returning the written paths.
pub fn write_groups(groups: &DirGroups) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(groups.len());
    for group in groups.iter() {
        let path = group.dir.join(MarksFile::Local.as_str());
        tracing::info!(path = %path.display(), entries = group.files.len(), "Writing file");
        write_storage(&path, &MarkStorage::portable(group.files.clone()))?;
        written.push(path);
    }
    Ok(written)
}
