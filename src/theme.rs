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

//! Visual styling and color configuration for the TUI.
//!
//! This module defines the application's color palette and converts colors to
//! the hexadecimal form used for terminal emulator styling.

use ratatui::style::Color;

#[derive(Clone, Copy)]
pub(crate) struct Theme {
    pub(crate) background_colour: Color,
    pub(crate) accent_colour: Color,
    pub(crate) border_colour: Color,
    pub(crate) gauge_track_colour: Color,

    pub(crate) verse_title_fg: Color,
    pub(crate) checkbox_fg: Color,

    pub(crate) text_fg: Color,
    pub(crate) text_dim_fg: Color,
    pub(crate) highlight_fg: Color,

    pub(crate) status_error_fg: Color,
}

impl Default for Theme {
    // Returns the standard application theme.
    fn default() -> Self {
        Self::default_theme()
    }
}

impl Theme {
    // Constructs the default theme, saffron on a deep maroon.
    pub(crate) const fn default_theme() -> Self {
        Self {
            background_colour: Color::Rgb(38, 18, 22),
            accent_colour: Color::Rgb(244, 170, 60),
            border_colour: Color::Rgb(102, 92, 92),
            gauge_track_colour: Color::Rgb(58, 32, 36),

            verse_title_fg: Color::Rgb(230, 222, 210),
            checkbox_fg: Color::Rgb(190, 160, 120),

            text_fg: Color::Rgb(240, 234, 224),
            text_dim_fg: Color::Rgb(140, 128, 124),
            highlight_fg: Color::Rgb(255, 200, 90),

            status_error_fg: Color::Rgb(235, 110, 100),
        }
    }

    /// Converts a [`ratatui::style::Color`] into a CSS-style hexadecimal
    /// string.
    ///
    /// Colours other than [`Color::Rgb`] have no hexadecimal form and yield
    /// `None`.
    pub(crate) fn to_hex(colour: Color) -> Option<String> {
        match colour {
            Color::Rgb(r, g, b) => Some(format!("#{:02x}{:02x}{:02x}", r, g, b)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_colours_convert_to_hex() {
        assert_eq!(Theme::to_hex(Color::Rgb(38, 18, 22)).as_deref(), Some("#261216"));
        assert_eq!(Theme::to_hex(Color::Reset), None);
    }
}
