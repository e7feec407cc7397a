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

//! Verse checklist cursor state.
//!
//! Verses are laid out in two columns filled top to bottom, the first column
//! holding the first half (rounded up) of the chant. The cursor moves through
//! verses in order with up/down and jumps between the columns with
//! left/right.

mod render;

pub(crate) struct VerseList {
    verse_count: usize,
    cursor: usize,
}

impl VerseList {
    pub(crate) fn new() -> Self {
        Self {
            verse_count: 0,
            cursor: 0,
        }
    }

    /// Resets the cursor for a chant with `verse_count` verses.
    pub(crate) fn reset(&mut self, verse_count: usize) {
        self.verse_count = verse_count;
        self.cursor = 0;
    }

    /// The verse under the cursor, if the chant has any verses.
    pub(crate) fn cursor(&self) -> Option<usize> {
        (self.verse_count > 0).then_some(self.cursor)
    }

    /// Number of rows in the first column.
    pub(crate) fn column_height(&self) -> usize {
        self.verse_count.div_ceil(2)
    }

    pub(crate) fn next(&mut self) {
        if self.cursor + 1 < self.verse_count {
            self.cursor += 1;
        }
    }

    pub(crate) fn previous(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub(crate) fn first(&mut self) {
        self.cursor = 0;
    }

    pub(crate) fn last(&mut self) {
        self.cursor = self.verse_count.saturating_sub(1);
    }

    pub(crate) fn next_column(&mut self) {
        let height = self.column_height();
        if self.cursor < height && self.verse_count > height {
            self.cursor = (self.cursor + height).min(self.verse_count - 1);
        }
    }

    pub(crate) fn previous_column(&mut self) {
        let height = self.column_height();
        if self.cursor >= height {
            self.cursor -= height;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_has_no_cursor() {
        let mut list = VerseList::new();
        list.next();
        list.next_column();

        assert_eq!(list.cursor(), None);
    }

    #[test]
    fn cursor_stays_within_the_chant() {
        let mut list = VerseList::new();
        list.reset(3);

        list.previous();
        assert_eq!(list.cursor(), Some(0));

        list.next();
        list.next();
        list.next();
        assert_eq!(list.cursor(), Some(2));

        list.first();
        assert_eq!(list.cursor(), Some(0));
        list.last();
        assert_eq!(list.cursor(), Some(2));
    }

    #[test]
    fn columns_split_the_first_half_rounded_up() {
        let mut list = VerseList::new();
        list.reset(5);
        assert_eq!(list.column_height(), 3);

        list.next_column();
        assert_eq!(list.cursor(), Some(3));

        list.previous_column();
        assert_eq!(list.cursor(), Some(0));

        // The last row of the first column has no neighbour, clamp to the
        // last verse.
        list.next();
        list.next();
        list.next_column();
        assert_eq!(list.cursor(), Some(4));
    }

    #[test]
    fn single_verse_has_one_column() {
        let mut list = VerseList::new();
        list.reset(1);

        list.next_column();
        assert_eq!(list.cursor(), Some(0));
    }
}
