//! Document types
//!
//! Field names follow the JSON written by the Audipo player's mark export,
//! so `serde` renames everything to camelCase.

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Default minimum silence duration passed to detection, in milliseconds.
pub const DEFAULT_DURATION_MS: f64 = 1000.0;

/// Default silence threshold passed to detection, in dB below full scale.
pub const DEFAULT_NOISE_DB: f64 = 50.0;

/// A named position inside an audio file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Mark {
    /// Assigned by the engine; unique within its renumbering scope.
    pub id: u64,
    /// Milliseconds from the start of the file.
    pub pos: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub following_range_state: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<Number>,
}

impl Mark {
    /// A bare mark with no payload fields.
    pub fn new(id: u64, pos: u64) -> Self {
        Self {
            id,
            pos,
            following_range_state: None,
            state: None,
            tag: None,
            kind: None,
        }
    }
}

/// One audio file and its marks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MarkedFile {
    /// Byte size when the marks were recorded; a drift check, not a hash.
    pub file_size: u64,
    /// Relative to the storage's directory, or to a foreign root when exported.
    pub filepath: String,
    pub marklist: Vec<Mark>,
}

/// The unit of persistence: one document per directory, or one flat export.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MarkStorage {
    /// Device root recorded at export time; empty for portable storages.
    pub external_storage_directory: String,
    pub files: Vec<MarkedFile>,
}

impl MarkStorage {
    /// A storage with no device root, as written by split, join and mark.
    pub fn portable(files: Vec<MarkedFile>) -> Self {
        Self {
            external_storage_directory: String::new(),
            files,
        }
    }

    /// Total number of marks across all files.
    pub fn mark_count(&self) -> usize {
        self.files.iter().map(|f| f.marklist.len()).sum()
    }
}

/// Per-directory detection configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MarkConfig {
    pub ffmpeg: FfmpegParams,
}

/// Parameters for ffmpeg's `silencedetect` filter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FfmpegParams {
    /// Minimum silence duration, milliseconds.
    pub duration: f64,
    /// Noise threshold, dB below full scale.
    pub noise: f64,
}

impl Default for FfmpegParams {
    fn default() -> Self {
        Self {
            duration: DEFAULT_DURATION_MS,
            noise: DEFAULT_NOISE_DB,
        }
    }
}
