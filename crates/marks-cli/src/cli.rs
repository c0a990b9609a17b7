//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use marks_ffmpeg::discovery::FFMPEG_ENV;

/// audipomarks - Keep Audipo marks in sync with a folder of audio files
#[derive(Parser, Debug)]
#[command(name = "audipomarks")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Answer every discrepancy with yes-to-all instead of prompting
    #[arg(short, long, global = true)]
    pub yes: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Split a flat mark storage into per-directory local storages
    ///
    /// Local storages are written next to the audio files, under the
    /// directory that contains the input file.
    ///
    /// Examples:
    ///   audipomarks split Sync/export.audipomark -r Sync
    ///   audipomarks split export.audipomark -r /storage/emulated/0/Sync -n
    Split {
        /// Path to the flat storage exported from the device
        input_file: PathBuf,

        /// The synced folder on the device, absolute or relative to the
        /// storage's recorded device root
        #[arg(short, long)]
        root: PathBuf,

        /// Drop marks closer than a second to the previous kept mark
        #[arg(short, long)]
        normalize: bool,
    },

    /// Join the local storages under a directory into one flat storage
    Join {
        /// Directory to collect from; the result is written here
        dir: PathBuf,
    },

    /// Generate marks from silences detected by ffmpeg
    Mark {
        /// Directory holding the audio files
        dir: PathBuf,

        /// Also process every subdirectory
        #[arg(short, long)]
        recursive: bool,

        /// Minimum silence duration in milliseconds
        #[arg(long)]
        duration: Option<f64>,

        /// Silence threshold in dB below full scale
        #[arg(long)]
        noise: Option<f64>,

        /// Path to the ffmpeg binary
        #[arg(long, env = FFMPEG_ENV)]
        ffmpeg: Option<PathBuf>,
    },
}
