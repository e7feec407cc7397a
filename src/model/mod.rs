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

//! Domain models and core data structures.
//!
//! This module defines the central entities of the application, chants and
//! the verses they are divided into, along with the state containers built on
//! top of them (the verse selection and observable values).
//!
//! Chants and verses are loaded once from the catalog and are immutable from
//! then on; every other component only ever reads them.

pub(crate) mod catalog;
pub(crate) mod observable;
pub(crate) mod selection;

/// A titled, timestamped sub-range of a chant recording.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Verse {
    /// Position of the verse within its chant, stable for the chant's lifetime.
    pub(crate) index: usize,
    pub(crate) title: String,
    /// Start of the verse in the recording, in seconds.
    pub(crate) start_time: f64,
    /// End of the verse in the recording, in seconds.
    pub(crate) end_time: f64,
    pub(crate) text: String,
}

impl Verse {
    /// The display label used when the catalog provides no title.
    pub(crate) fn default_title(index: usize) -> String {
        format!("Verse {}", index + 1)
    }

    /// Splits the verse text into display lines.
    ///
    /// A verse always has at least one line, even when its text is empty.
    pub(crate) fn lines(&self) -> Vec<&str> {
        self.text.split('\n').collect()
    }
}

/// A named audio recording divided into verses.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Chant {
    pub(crate) id: String,
    pub(crate) title: String,
    /// Opaque locator for the audio asset, as understood by the playback
    /// engine.
    pub(crate) audio_reference: String,
    /// Verses in recording order, `verses[i].index == i`.
    pub(crate) verses: Vec<Verse>,
}

impl Chant {
    pub(crate) fn verse(&self, index: usize) -> Option<&Verse> {
        self.verses.get(index)
    }

    pub(crate) fn verse_count(&self) -> usize {
        self.verses.len()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::{Chant, Verse};

    pub(crate) fn verse(index: usize, start_time: f64, end_time: f64, text: &str) -> Verse {
        Verse {
            index,
            title: Verse::default_title(index),
            start_time,
            end_time,
            text: text.to_string(),
        }
    }

    pub(crate) fn chant(verses: Vec<Verse>) -> Chant {
        Chant {
            id: "test".to_string(),
            title: "Test Chant".to_string(),
            audio_reference: "/audio/test.ogg".to_string(),
            verses,
        }
    }

    /// Two adjacent two-second verses.
    pub(crate) fn two_verse_chant() -> Chant {
        chant(vec![verse(0, 0.0, 2.0, "a"), verse(1, 2.0, 4.0, "b")])
    }
}
