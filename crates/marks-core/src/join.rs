//! Join local storages into one flat storage
//!
//! Walks a tree, reads every local storage below the root and writes a
//! single portable storage at the root whose entries are relative to it.
//! Mark ids are renumbered from 1 with one counter across the whole walk.

use std::path::{Path, PathBuf};

use marks_fs::MarksFile;
use marks_fs::io::directory_exists;
use marks_fs::path::{absolutize, clean, relative_to, to_slash};
use marks_fs::walk;
use marks_schema::{MarkStorage, MarkedFile, read_storage, write_storage};

use crate::algebra::renumber;
use crate::resolve::{Discrepancy, Resolver, YesToAll, settle};
use crate::{Error, Result};

/// What a join did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JoinReport {
    /// The flat storage written.
    pub output: PathBuf,
    /// Local storages merged, in walk order.
    pub sources: Vec<PathBuf>,
    /// Local storages left out because they could not be read.
    pub ignored: Vec<PathBuf>,
    /// Entries written.
    pub files: usize,
    /// Marks written.
    pub marks: usize,
}

/// Merge every local storage under `working_dir` into its global storage.
///
/// The root's own local storage is not part of the merge.
pub fn join(working_dir: &Path, resolver: &mut dyn Resolver) -> Result<JoinReport> {
    let root = absolutize(working_dir)?;
    if !directory_exists(&root) {
        return Err(Error::DirectoryNotFound { path: root });
    }

    let mut yes_to_all = YesToAll::default();
    let mut report = JoinReport::default();
    let mut files = Vec::new();
    let mut next_id = 1;

    for path in walk::files(&root) {
        let path = path?;
        if !MarksFile::Local.matches(&path) {
            continue;
        }
        let Some(dir) = path.parent() else {
            continue;
        };
        if dir == root.as_path() {
            tracing::debug!(path = %path.display(), "Skipping the root's own local storage");
            continue;
        }
        let rel_dir = relative_to(dir, &root);

        tracing::info!(path = %path.display(), "Reading file");
        let local = match read_storage(&path) {
            Ok(local) => local,
            Err(marks_schema::Error::Storage { violations, .. }) => {
                let discrepancy = Discrepancy::InvalidStorage {
                    path: path.clone(),
                    violations,
                };
                settle(resolver, &mut yes_to_all, &discrepancy)?;
                report.ignored.push(path);
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        let (entries, next) = rebase(local, &rel_dir, next_id);
        next_id = next;
        files.extend(entries);
        report.sources.push(path);
    }

    let storage = MarkStorage::portable(files);
    report.files = storage.files.len();
    report.marks = storage.mark_count();
    report.output = root.join(MarksFile::Global.as_str());

    tracing::info!(path = %report.output.display(), entries = report.files, "Writing file");
    write_storage(&report.output, &storage)?;
    Ok(report)
}

/// Re-express a local storage's entries relative to the join root.
///
/// `rel_dir` is the storage's directory relative to the root. Marks are
/// numbered from `next_id`; the returned id is the first one left unused.
pub fn rebase(local: MarkStorage, rel_dir: &Path, next_id: u64) -> (Vec<MarkedFile>, u64) {
    let mut next_id = next_id;
    let entries = local
        .files
        .into_iter()
        .map(|file| {
            let marklist = renumber(file.marklist, next_id);
            next_id += marklist.len() as u64;
            MarkedFile {
                file_size: file.file_size,
                filepath: to_slash(&clean(&rel_dir.join(&file.filepath))),
                marklist,
            }
        })
        .collect();
    (entries, next_id)
}
