//! Mark list algebra
//!
//! Pure functions over ordered mark lists. List order is the order marks
//! appear in their document; nothing here sorts by position.

use marks_ffmpeg::SilenceInterval;
use marks_schema::Mark;

/// Marks closer than this to the previously kept mark are dropped by [`normalize`].
pub const MIN_MARK_DISTANCE_MS: u64 = 1000;

/// Gap left between a generated mark and the audio that follows a silence.
pub const MARK_CLEARANCE_MS: i64 = 500;

/// Reassign ids `start_id, start_id + 1, ...` in list order.
pub fn renumber(marks: Vec<Mark>, start_id: u64) -> Vec<Mark> {
    marks
        .into_iter()
        .zip(start_id..)
        .map(|(mark, id)| Mark { id, ..mark })
        .collect()
}

/// Drop marks that do not lie more than [`MIN_MARK_DISTANCE_MS`] after the
/// last kept mark.
///
/// Single left-to-right pass; a dropped mark never becomes the reference
/// point. The first mark is always kept.
pub fn normalize(marks: Vec<Mark>) -> Vec<Mark> {
    let mut last_kept: Option<u64> = None;
    marks
        .into_iter()
        .filter(|mark| {
            let keep = match last_kept {
                None => true,
                Some(last) => mark.pos > last.saturating_add(MIN_MARK_DISTANCE_MS),
            };
            if keep {
                last_kept = Some(mark.pos);
            }
            keep
        })
        .collect()
}

/// Position of the mark generated for one detected silence.
///
/// Long silences get the mark [`MARK_CLEARANCE_MS`] before they end; short
/// ones get it at their midpoint.
pub fn place_mark(silence: &SilenceInterval) -> u64 {
    let duration = silence.duration_ms();
    let pos = if duration > MARK_CLEARANCE_MS {
        silence.end_ms - MARK_CLEARANCE_MS
    } else {
        silence.start_ms + (duration + 1).div_euclid(2)
    };
    pos.max(0) as u64
}

/// One mark per silence, numbered from 1 in detection order.
pub fn marks_from_silences(silences: &[SilenceInterval]) -> Vec<Mark> {
    silences
        .iter()
        .zip(1..)
        .map(|(silence, id)| Mark::new(id, place_mark(silence)))
        .collect()
}
