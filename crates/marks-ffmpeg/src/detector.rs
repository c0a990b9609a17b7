//! The detection seam used by mark generation

use std::path::Path;

use marks_schema::FfmpegParams;

use crate::error::Result;
use crate::events::{SilenceInterval, parse_silence_events};
use crate::subprocess::run_silencedetect;
use crate::Ffmpeg;

/// Something that can find silences in an audio file.
pub trait SilenceDetector {
    fn detect(&mut self, file: &Path, params: &FfmpegParams) -> Result<Vec<SilenceInterval>>;
}

impl SilenceDetector for Ffmpeg {
    fn detect(&mut self, file: &Path, params: &FfmpegParams) -> Result<Vec<SilenceInterval>> {
        let stdout = run_silencedetect(self.path(), file, params)?;
        Ok(parse_silence_events(&stdout))
    }
}
