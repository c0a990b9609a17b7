//! Terse constructors for test documents.

use marks_schema::{Mark, MarkStorage, MarkedFile};

/// A bare mark.
pub fn mark(id: u64, pos: u64) -> Mark {
    Mark::new(id, pos)
}

/// Bare marks at the given positions, numbered from 1.
pub fn marks_at(positions: &[u64]) -> Vec<Mark> {
    positions
        .iter()
        .zip(1..)
        .map(|(&pos, id)| Mark::new(id, pos))
        .collect()
}

/// A file entry.
pub fn entry(filepath: &str, file_size: u64, marklist: Vec<Mark>) -> MarkedFile {
    MarkedFile {
        file_size,
        filepath: filepath.to_string(),
        marklist,
    }
}

/// A storage with the given device root.
pub fn storage(external_storage_directory: &str, files: Vec<MarkedFile>) -> MarkStorage {
    MarkStorage {
        external_storage_directory: external_storage_directory.to_string(),
        files,
    }
}
