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

//! Verse selection state.
//!
//! The selection is the set of verse indices the listener has chosen to play.
//! It is always iterated in ascending index order, whatever order the verses
//! were toggled in, and it never holds an index outside the bound chant.
//!
//! The selection holds no playback state. Its owner must rebuild the playback
//! queue after every mutation.

use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Selection {
    verse_count: usize,
    indices: BTreeSet<usize>,
}

impl Selection {
    /// Creates an empty selection bound to a chant with `verse_count` verses.
    pub(crate) fn new(verse_count: usize) -> Self {
        Self {
            verse_count,
            indices: BTreeSet::new(),
        }
    }

    /// Binds the selection to a different chant, dropping every member.
    pub(crate) fn rebind(&mut self, verse_count: usize) {
        self.verse_count = verse_count;
        self.indices.clear();
    }

    /// Adds the verse if absent, removes it if present.
    ///
    /// Out-of-range indices are ignored.
    pub(crate) fn toggle(&mut self, verse_index: usize) {
        if verse_index >= self.verse_count {
            return;
        }

        if !self.indices.insert(verse_index) {
            self.indices.remove(&verse_index);
        }
    }

    /// Adds the verse, leaving the selection unchanged if already present.
    pub(crate) fn insert(&mut self, verse_index: usize) {
        if verse_index < self.verse_count {
            self.indices.insert(verse_index);
        }
    }

    pub(crate) fn select_all(&mut self) {
        self.indices = (0..self.verse_count).collect();
    }

    pub(crate) fn clear(&mut self) {
        self.indices.clear();
    }

    pub(crate) fn contains(&self, verse_index: usize) -> bool {
        self.indices.contains(&verse_index)
    }

    pub(crate) fn len(&self) -> usize {
        self.indices.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Whether every verse of a non-empty chant is selected, this drives the
    /// "Select All" / "Clear All" toggle.
    pub(crate) fn is_select_all_active(&self) -> bool {
        self.verse_count > 0 && self.indices.len() == self.verse_count
    }

    /// The selected indices in ascending order.
    ///
    /// Each call produces a fresh iterator over the current members.
    pub(crate) fn ordered(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices.iter().copied()
    }

    pub(crate) fn snapshot(&self) -> Vec<usize> {
        self.ordered().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_adds_then_removes() {
        let mut selection = Selection::new(3);

        selection.toggle(1);
        assert!(selection.contains(1));

        selection.toggle(1);
        assert!(!selection.contains(1));
        assert!(selection.is_empty());
    }

    #[test]
    fn toggle_out_of_range_is_ignored() {
        let mut selection = Selection::new(2);

        selection.toggle(2);
        selection.toggle(usize::MAX);

        assert!(selection.is_empty());
    }

    #[test]
    fn ordered_is_ascending_regardless_of_toggle_order() {
        let mut selection = Selection::new(5);

        for index in [4, 0, 3, 1] {
            selection.toggle(index);
        }

        assert_eq!(selection.snapshot(), vec![0, 1, 3, 4]);
        // Restartable, a second pass yields the same sequence.
        assert_eq!(selection.ordered().collect::<Vec<_>>(), vec![0, 1, 3, 4]);
    }

    #[test]
    fn select_all_and_clear() {
        let mut selection = Selection::new(3);

        selection.select_all();
        assert_eq!(selection.snapshot(), vec![0, 1, 2]);
        assert!(selection.is_select_all_active());

        selection.toggle(1);
        assert!(!selection.is_select_all_active());

        selection.clear();
        assert!(selection.is_empty());
        assert!(!selection.is_select_all_active());
    }

    #[test]
    fn select_all_is_never_active_for_an_empty_chant() {
        let mut selection = Selection::new(0);

        selection.select_all();

        assert!(!selection.is_select_all_active());
    }

    #[test]
    fn rebind_drops_members_of_the_previous_chant() {
        let mut selection = Selection::new(6);
        selection.select_all();

        selection.rebind(2);

        assert!(selection.is_empty());
        selection.toggle(5);
        assert!(selection.is_empty());
    }
}
