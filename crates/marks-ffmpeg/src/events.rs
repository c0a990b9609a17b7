//! Parsing of ffmpeg's metadata event stream
//!
//! With `ametadata=mode=print:file=-`, ffmpeg prints one `key=value` line
//! per event. A detected silence shows up as
//!
//! ```text
//! lavfi.silence_start=12.345
//! lavfi.silence_end=14.001
//! lavfi.silence_duration=1.656
//! ```
//!
//! Times are seconds; intervals are returned in milliseconds.

/// A detected silence, in milliseconds from the start of the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SilenceInterval {
    pub start_ms: i64,
    pub end_ms: i64,
}

impl SilenceInterval {
    pub fn duration_ms(&self) -> i64 {
        self.end_ms - self.start_ms
    }
}

/// Collect every complete start/end pair from ffmpeg's output.
///
/// An interval is emitted when the `silence_duration` line following a
/// start and an end is seen; incomplete pairs are dropped.
pub fn parse_silence_events(output: &str) -> Vec<SilenceInterval> {
    let mut start = None;
    let mut end = None;
    let mut intervals = Vec::new();

    for line in output.lines().filter(|l| l.starts_with("lavfi")) {
        let (key, value) = line.split_once('=').unwrap_or((line, ""));
        match key.trim() {
            "lavfi.silence_start" => start = seconds_to_ms(value),
            "lavfi.silence_end" => end = seconds_to_ms(value),
            "lavfi.silence_duration" => {
                if let (Some(start_ms), Some(end_ms)) = (start, end) {
                    intervals.push(SilenceInterval { start_ms, end_ms });
                    start = None;
                    end = None;
                }
            }
            _ => {}
        }
    }

    intervals
}

fn seconds_to_ms(value: &str) -> Option<i64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|secs| secs.is_finite())
        .map(|secs| (secs * 1000.0).round() as i64)
}
