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

//! Selection to playlist translation.
//!
//! Turns a chant and a verse selection into the ordered sequence of clipped
//! [`Segment`]s the playback engine plays gaplessly. Boundaries are corrected
//! here so that the engine is never handed an empty, inverted, or
//! past-the-end clip.
//!
//! Segments are never patched in place. Any change to the chant, the
//! selection, or the known asset duration produces a new sequence.

use crate::model::{Chant, Verse};

/// One clipped playback unit derived from a selected verse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Segment {
    pub(crate) verse_index: usize,
    pub(crate) start_ms: u64,
    pub(crate) end_ms: u64,
}

impl Segment {
    pub(crate) fn duration_ms(&self) -> u64 {
        self.end_ms - self.start_ms
    }
}

/// Builds the playback queue for `selection` within `chant`.
///
/// Indices that are not valid for the chant are dropped. Segments are emitted
/// in ascending verse order whatever order `selection` yields them in, and
/// duplicates collapse to one segment.
///
/// When `known_duration_ms` is `None` the clip ends are left unclamped and the
/// engine is expected to stop at end of media.
pub(crate) fn build_playlist<I>(chant: &Chant, selection: I, known_duration_ms: Option<u64>) -> Vec<Segment>
where
    I: IntoIterator<Item = usize>,
{
    let mut indices: Vec<usize> = selection
        .into_iter()
        .filter(|&index| index < chant.verses.len())
        .collect();
    indices.sort_unstable();
    indices.dedup();

    indices
        .into_iter()
        .map(|index| clip_verse(&chant.verses[index], known_duration_ms))
        .collect()
}

fn clip_verse(verse: &Verse, known_duration_ms: Option<u64>) -> Segment {
    let start_ms = seconds_to_ms(verse.start_time);
    let mut end_ms = seconds_to_ms(verse.end_time).max(start_ms + 1);

    if let Some(duration_ms) = known_duration_ms {
        // The last playable millisecond is one before the end of the asset.
        end_ms = end_ms.min(duration_ms.saturating_sub(1));
        if end_ms <= start_ms {
            end_ms = start_ms + 1;
        }
    }

    Segment {
        verse_index: verse.index,
        start_ms,
        end_ms,
    }
}

/// Rounds to the nearest millisecond, negative and NaN inputs become zero.
fn seconds_to_ms(seconds: f64) -> u64 {
    let ms = (seconds * 1000.0).round();
    if ms > 0.0 { ms as u64 } else { 0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        fixtures::{chant, two_verse_chant, verse},
        selection::Selection,
    };

    fn segment(verse_index: usize, start_ms: u64, end_ms: u64) -> Segment {
        Segment {
            verse_index,
            start_ms,
            end_ms,
        }
    }

    #[test]
    fn reverse_toggled_selection_plays_in_verse_order() {
        let chant = two_verse_chant();
        let mut selection = Selection::new(chant.verse_count());
        selection.toggle(1);
        selection.toggle(0);

        let segments = build_playlist(&chant, selection.ordered(), None);

        assert_eq!(segments, vec![segment(0, 0, 2000), segment(1, 2000, 4000)]);
    }

    #[test]
    fn unordered_input_is_sorted_and_deduplicated() {
        let chant = two_verse_chant();

        let segments = build_playlist(&chant, [1, 0, 1], None);

        assert_eq!(segments, vec![segment(0, 0, 2000), segment(1, 2000, 4000)]);
    }

    #[test]
    fn known_duration_clamps_the_last_millisecond() {
        let chant = two_verse_chant();

        let segments = build_playlist(&chant, [0, 1], Some(3500));

        assert_eq!(segments, vec![segment(0, 0, 2000), segment(1, 2000, 3499)]);
    }

    #[test]
    fn degenerate_verse_becomes_a_one_millisecond_clip() {
        let chant = chant(vec![verse(0, 5.0, 5.0, "x")]);

        let segments = build_playlist(&chant, [0], None);

        assert_eq!(segments, vec![segment(0, 5000, 5001)]);
    }

    #[test]
    fn reversed_verse_timing_is_corrected() {
        let chant = chant(vec![verse(0, 7.0, 3.0, "x")]);

        let segments = build_playlist(&chant, [0], None);

        assert_eq!(segments, vec![segment(0, 7000, 7001)]);
    }

    #[test]
    fn verse_starting_past_the_asset_end_stays_playable() {
        let chant = chant(vec![verse(0, 10.0, 12.0, "x")]);

        let segments = build_playlist(&chant, [0], Some(8000));

        assert_eq!(segments, vec![segment(0, 10000, 10001)]);
    }

    #[test]
    fn negative_start_is_clamped_to_zero() {
        let chant = chant(vec![verse(0, -1.25, 1.0, "x")]);

        let segments = build_playlist(&chant, [0], None);

        assert_eq!(segments, vec![segment(0, 0, 1000)]);
    }

    #[test]
    fn timestamps_round_to_the_nearest_millisecond() {
        let chant = chant(vec![verse(0, 1.0004, 2.0006, "x")]);

        let segments = build_playlist(&chant, [0], None);

        assert_eq!(segments, vec![segment(0, 1000, 2001)]);
    }

    #[test]
    fn indices_foreign_to_the_chant_produce_no_segment() {
        let chant = two_verse_chant();

        let segments = build_playlist(&chant, [0, 2, 7], None);

        assert_eq!(segments, vec![segment(0, 0, 2000)]);
    }

    #[test]
    fn empty_selection_builds_an_empty_queue() {
        let chant = two_verse_chant();

        assert!(build_playlist(&chant, [], Some(3500)).is_empty());
    }

    #[test]
    fn every_segment_is_ordered_positive_and_within_duration() {
        let verses = (0..12)
            .map(|i| {
                let start = i as f64 * 1.7 - 2.0;
                // Every third verse is reversed, every fourth is empty.
                let end = match i % 4 {
                    0 => start,
                    _ if i % 3 == 0 => start - 0.5,
                    _ => start + 1.9,
                };
                verse(i, start, end, "line")
            })
            .collect();
        let chant = chant(verses);
        let selection: Vec<usize> = (0..12).rev().chain([40, 12]).collect();

        for duration in [None, Some(20_000), Some(9_000)] {
            let first = build_playlist(&chant, selection.iter().copied(), duration);
            let second = build_playlist(&chant, selection.iter().copied(), duration);
            assert_eq!(first, second);

            assert_eq!(first.len(), 12);
            for pair in first.windows(2) {
                assert!(pair[0].verse_index < pair[1].verse_index);
            }
            for segment in &first {
                assert!(segment.end_ms > segment.start_ms);
                if let Some(d) = duration {
                    if segment.start_ms + 1 < d {
                        assert!(segment.end_ms < d);
                    }
                }
            }
        }
    }
}
