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

//! Unicode symbols for the TUI.
//!
//! These are selected for compatibility with most modern terminal emulators
//! and fonts.

// Standard Media Controls (Unicode)
pub(crate) const ICON_PLAY: &str = "\u{25B6}";
pub(crate) const ICON_PAUSE: &str = "\u{23F8}";
pub(crate) const ICON_STOP: &str = "\u{23F9}";

// Repeat, with Variation Selector-15 [\u{FE0E}] to force monochrome text
// rendering so the icon respects the TUI's color styling.
pub(crate) const ICON_LOOP: &str = "\u{1F501}\u{FE0E}";

// Ballot boxes for the verse checklist.
pub(crate) const ICON_CHECKED: &str = "\u{2612}";
pub(crate) const ICON_UNCHECKED: &str = "\u{2610}";

pub(crate) const ICON_WARNING: &str = "\u{26A0}\u{FE0E}";
