// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Playback position to verse text mapping.
//!
//! Converts the engine's position (a queue index plus the time elapsed within
//! that segment) into the verse being heard and the line of its text to
//! highlight. Lines are spread evenly across the segment's duration.

use crate::{model::Chant, playlist::Segment};

/// The verse being heard and the line of its text to emphasise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Highlight {
    pub(crate) verse_index: usize,
    pub(crate) line_index: usize,
}

/// Progress through a segment as a fraction in `[0, 1]`.
///
/// Elapsed times past the end of the clip (timing jitter) clamp to `1`, and a
/// zero length segment reports `0`.
pub(crate) fn progress_fraction(elapsed_ms: u64, segment_duration_ms: u64) -> f64 {
    if segment_duration_ms == 0 {
        return 0.0;
    }

    (elapsed_ms as f64 / segment_duration_ms as f64).clamp(0.0, 1.0)
}

/// The line to highlight for a verse of `line_count` lines.
///
/// `fraction` is clamped to `[0, 1]` and `line_count` is treated as at least
/// one, so the result is always a valid line index.
pub(crate) fn line_for_fraction(fraction: f64, line_count: usize) -> usize {
    let line_count = line_count.max(1);
    let fraction = if fraction.is_nan() { 0.0 } else { fraction.clamp(0.0, 1.0) };

    ((fraction * line_count as f64).floor() as usize).min(line_count - 1)
}

/// Resolves the highlight for the segment at `queue_position`.
///
/// Returns `None` when nothing is playing, the queue is empty, or the
/// position does not refer to a segment of this queue.
pub(crate) fn map_position(
    chant: &Chant,
    queue: &[Segment],
    queue_position: Option<usize>,
    elapsed_ms: u64,
    segment_duration_ms: u64,
) -> Option<Highlight> {
    let segment = queue.get(queue_position?)?;
    let verse = chant.verse(segment.verse_index)?;

    let fraction = progress_fraction(elapsed_ms, segment_duration_ms);

    Some(Highlight {
        verse_index: segment.verse_index,
        line_index: line_for_fraction(fraction, verse.lines().len()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::fixtures::{chant, verse},
        playlist::build_playlist,
    };

    fn four_line_chant() -> Chant {
        chant(vec![
            verse(0, 0.0, 4.0, "one\ntwo\nthree\nfour"),
            verse(1, 4.0, 6.0, "single"),
        ])
    }

    #[test]
    fn lines_are_spread_across_the_segment() {
        let chant = four_line_chant();
        let queue = build_playlist(&chant, [0, 1], None);

        let at = |elapsed| map_position(&chant, &queue, Some(0), elapsed, 4000).unwrap().line_index;

        assert_eq!(at(0), 0);
        assert_eq!(at(999), 0);
        assert_eq!(at(1000), 1);
        assert_eq!(at(2500), 2);
        assert_eq!(at(3999), 3);
        assert_eq!(at(4000), 3);
    }

    #[test]
    fn verse_index_comes_from_the_queue_entry() {
        let chant = four_line_chant();
        let queue = build_playlist(&chant, [1], None);

        let highlight = map_position(&chant, &queue, Some(0), 0, 2000).unwrap();

        assert_eq!(
            highlight,
            Highlight {
                verse_index: 1,
                line_index: 0
            }
        );
    }

    #[test]
    fn single_line_verse_is_always_highlighted() {
        assert_eq!(line_for_fraction(0.0, 1), 0);
        assert_eq!(line_for_fraction(1.0, 1), 0);
        assert_eq!(line_for_fraction(0.5, 0), 0);
    }

    #[test]
    fn out_of_range_fractions_stay_within_the_verse() {
        for fraction in [-3.0, -0.01, 1.0, 1.2, 50.0, f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
            for line_count in 1..6 {
                assert!(line_for_fraction(fraction, line_count) < line_count);
            }
        }
    }

    #[test]
    fn elapsed_past_the_clip_end_clamps_to_the_last_line() {
        let chant = four_line_chant();
        let queue = build_playlist(&chant, [0], None);

        let highlight = map_position(&chant, &queue, Some(0), 4250, 4000).unwrap();

        assert_eq!(highlight.line_index, 3);
        assert_eq!(progress_fraction(4250, 4000), 1.0);
    }

    #[test]
    fn zero_duration_reports_the_first_line() {
        assert_eq!(progress_fraction(10, 0), 0.0);
    }

    #[test]
    fn no_position_or_empty_queue_has_no_highlight() {
        let chant = four_line_chant();
        let queue = build_playlist(&chant, [0], None);

        assert_eq!(map_position(&chant, &queue, None, 0, 4000), None);
        assert_eq!(map_position(&chant, &[], Some(0), 0, 4000), None);
        assert_eq!(map_position(&chant, &queue, Some(3), 0, 4000), None);
    }
}
