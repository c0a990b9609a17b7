//! Running the `silencedetect` filter

use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, Stdio};

use marks_schema::FfmpegParams;

use crate::error::{Error, Result};

/// Filter graph for one run: detection followed by metadata printing to stdout.
pub fn filter_graph(params: &FfmpegParams) -> String {
    format!(
        "silencedetect=n=-{}dB:d={},ametadata=mode=print:file=-",
        params.noise,
        params.duration / 1000.0
    )
}

/// Full argument list for analysing `file`.
pub fn silencedetect_args(file: &Path, params: &FfmpegParams) -> Vec<OsString> {
    vec![
        "-i".into(),
        file.as_os_str().to_os_string(),
        "-af".into(),
        filter_graph(params).into(),
        "-f".into(),
        "null".into(),
        "-".into(),
    ]
}

/// Run ffmpeg over `file` and return its stdout.
///
/// Stdin is detached so ffmpeg never competes with operator prompts for
/// the terminal.
pub fn run_silencedetect(ffmpeg: &Path, file: &Path, params: &FfmpegParams) -> Result<String> {
    tracing::debug!(file = %file.display(), filter = %filter_graph(params), "Running ffmpeg");

    let output = Command::new(ffmpeg)
        .args(silencedetect_args(file, params))
        .stdin(Stdio::null())
        .output()
        .map_err(|source| Error::Spawn {
            path: ffmpeg.to_path_buf(),
            source,
        })?;

    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    } else {
        Err(Error::CommandFailed {
            file: file.to_path_buf(),
            code: output.status.code().unwrap_or(-1),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}
