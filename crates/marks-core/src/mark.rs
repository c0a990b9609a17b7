//! Generate local storages from detected silences
//!
//! Each directory is processed on its own: its audio files get one mark per
//! detected silence, and the directory receives a local storage plus the
//! configuration the detection ran with.

use std::fs;
use std::path::{Path, PathBuf};

use marks_ffmpeg::SilenceDetector;
use marks_fs::MarksFile;
use marks_fs::io::{directory_exists, file_size};
use marks_fs::path::{absolutize, to_slash};
use marks_fs::walk;
use marks_schema::{
    FfmpegParams, MarkConfig, MarkStorage, MarkedFile, read_config, write_config, write_storage,
};

use crate::algebra::{marks_from_silences, normalize, renumber};
use crate::{Error, Result};

/// Extensions treated as audio, compared case-insensitively.
pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "ogg", "aac", "wav"];

/// Detection parameters given on the command line; they win over a directory's sidecar.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ParamOverrides {
    pub duration: Option<f64>,
    pub noise: Option<f64>,
}

impl ParamOverrides {
    pub fn apply(&self, params: FfmpegParams) -> FfmpegParams {
        FfmpegParams {
            duration: self.duration.unwrap_or(params.duration),
            noise: self.noise.unwrap_or(params.noise),
        }
    }
}

/// Options for [`mark`]
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkOptions {
    /// Also process every directory below the given one.
    pub recursive: bool,
    pub overrides: ParamOverrides,
}

/// Result for one processed directory
#[derive(Debug, Clone, PartialEq)]
pub struct DirectoryMarks {
    pub dir: PathBuf,
    pub files: usize,
    pub marks: usize,
    /// The local storage written, if the directory had audio files.
    pub storage: Option<PathBuf>,
}

/// What a mark run did, one item per processed directory
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkReport {
    pub directories: Vec<DirectoryMarks>,
}

impl MarkReport {
    pub fn files(&self) -> usize {
        self.directories.iter().map(|d| d.files).sum()
    }

    pub fn marks(&self) -> usize {
        self.directories.iter().map(|d| d.marks).sum()
    }
}

/// True if the path has one of the [`AUDIO_EXTENSIONS`].
pub fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| AUDIO_EXTENSIONS.iter().any(|a| a.eq_ignore_ascii_case(ext)))
}

/// Detect marks for the audio files in `dir`, and below it when recursive.
///
/// Subdirectories are processed first, then `dir` itself.
pub fn mark(
    dir: &Path,
    options: &MarkOptions,
    detector: &mut dyn SilenceDetector,
) -> Result<MarkReport> {
    let root = absolutize(dir)?;
    if !directory_exists(&root) {
        return Err(Error::DirectoryNotFound { path: root });
    }

    let mut report = MarkReport::default();
    if options.recursive {
        for sub in walk::dirs(&root) {
            let sub = sub?;
            report
                .directories
                .push(mark_directory(&sub, &options.overrides, detector)?);
        }
    }
    report
        .directories
        .push(mark_directory(&root, &options.overrides, detector)?);
    Ok(report)
}

/// Detect marks for the audio files directly inside `dir`.
///
/// Nothing is written when the directory holds no audio files.
pub fn mark_directory(
    dir: &Path,
    overrides: &ParamOverrides,
    detector: &mut dyn SilenceDetector,
) -> Result<DirectoryMarks> {
    tracing::info!(dir = %dir.display(), "Processing directory");

    let (audio_files, sidecar) = scan_directory(dir)?;
    let base = match sidecar {
        Some(path) => {
            tracing::info!(path = %path.display(), "Reading config");
            read_config(&path)?
        }
        None => MarkConfig::default(),
    };
    let config = MarkConfig {
        ffmpeg: overrides.apply(base.ffmpeg),
    };
    tracing::debug!(
        duration = config.ffmpeg.duration,
        noise = config.ffmpeg.noise,
        "Detection parameters"
    );

    let mut files = Vec::with_capacity(audio_files.len());
    let mut next_id = 1;
    for audio in &audio_files {
        let silences = detector.detect(audio, &config.ffmpeg)?;
        let marklist = renumber(normalize(marks_from_silences(&silences)), next_id);
        next_id += marklist.len() as u64;
        tracing::info!(file = %audio.display(), marks = marklist.len(), "Detected marks");

        let filepath = audio
            .file_name()
            .map(|name| to_slash(Path::new(name)))
            .unwrap_or_default();
        files.push(MarkedFile {
            file_size: file_size(audio)?,
            filepath,
            marklist,
        });
    }

    let mut result = DirectoryMarks {
        dir: dir.to_path_buf(),
        files: files.len(),
        marks: files.iter().map(|f| f.marklist.len()).sum(),
        storage: None,
    };
    if files.is_empty() {
        tracing::debug!(dir = %dir.display(), "No audio files");
        return Ok(result);
    }

    let storage_path = dir.join(MarksFile::Local.as_str());
    tracing::info!(path = %storage_path.display(), "Writing file");
    write_storage(&storage_path, &MarkStorage::portable(files))?;
    write_config(&dir.join(MarksFile::Config.as_str()), &config)?;
    result.storage = Some(storage_path);
    Ok(result)
}

/// Audio files directly inside `dir`, sorted by name, and its sidecar if present.
fn scan_directory(dir: &Path) -> Result<(Vec<PathBuf>, Option<PathBuf>)> {
    let entries = fs::read_dir(dir).map_err(|e| marks_fs::Error::io(dir, e))?;

    let mut audio_files = Vec::new();
    let mut sidecar = None;
    for entry in entries {
        let entry = entry.map_err(|e| marks_fs::Error::io(dir, e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if MarksFile::Config.matches(&path) {
            sidecar = Some(path);
        } else if is_audio_file(&path) {
            audio_files.push(path);
        }
    }
    audio_files.sort();
    Ok((audio_files, sidecar))
}
