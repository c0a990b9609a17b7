//! ffmpeg silence detection for audipomarks
//!
//! This crate wraps the one external collaborator the tool has: ffmpeg's
//! `silencedetect` filter. It handles:
//!
//! - Locating an ffmpeg binary (explicit path or `PATH` lookup)
//! - Running the filter over one audio file at a time
//! - Turning the `key=value` event stream into silence intervals
//!
//! Callers depend on the [`SilenceDetector`] trait so that mark detection
//! can be exercised without ffmpeg installed.

pub mod detector;
pub mod discovery;
pub mod error;
pub mod events;
pub mod subprocess;

pub use detector::SilenceDetector;
pub use discovery::Ffmpeg;
pub use error::{Error, Result};
pub use events::{SilenceInterval, parse_silence_events};
