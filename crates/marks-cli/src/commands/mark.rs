//! Mark command implementation

use std::path::Path;

use colored::Colorize;
use marks_core::{MarkOptions, mark};
use marks_ffmpeg::Ffmpeg;

use crate::error::Result;

/// Run the mark command
///
/// ffmpeg is located before any directory is touched.
pub fn run_mark(dir: &Path, options: &MarkOptions, ffmpeg: Option<&Path>) -> Result<()> {
    let mut ffmpeg = Ffmpeg::locate(ffmpeg)?;
    println!(
        "{} Using ffmpeg {} ({})",
        "=>".blue().bold(),
        ffmpeg.version().cyan(),
        ffmpeg.path().display()
    );

    let report = mark(dir, options, &mut ffmpeg)?;

    for result in &report.directories {
        match &result.storage {
            Some(path) => println!(
                "   {} {} ({} file(s), {} mark(s))",
                "+".green(),
                path.display(),
                result.files,
                result.marks
            ),
            None => println!(
                "   {} {} (no audio files)",
                "-".dimmed(),
                result.dir.display()
            ),
        }
    }
    println!(
        "{} Marked {} file(s) with {} mark(s).",
        "OK".green().bold(),
        report.files(),
        report.marks()
    );
    Ok(())
}
