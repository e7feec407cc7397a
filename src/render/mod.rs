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

//! User interface rendering logic.
//!
//! This module handles the translation of the [`App`] state into visual
//! widgets using the `ratatui` framework. It is responsible for layout
//! management, widget styling, and terminal frame composition.
//!
//! # Rendering Pipeline
//!
//! The primary entry point is the [`draw`] function, which is called after
//! every processed event. Rendering only reads state: the highlighted verse
//! line is computed by the event loop before drawing.

mod header;
pub(crate) mod icons;
mod player;
mod status;
mod verse_text;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::Style,
    widgets::Paragraph,
};

use crate::{
    App,
    render::{header::draw_header, player::draw_player, status::draw_status, verse_text::draw_verse_text},
};

/// Renders the user interface to the terminal frame.
///
/// The screen is partitioned, top to bottom, into the chant header, the
/// verse checklist, the scrolling verse text, the player bar and a status
/// line.
pub(crate) fn draw(f: &mut Frame, app: &App) {
    let area = f.area();

    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Percentage(40),
            Constraint::Min(6),
            Constraint::Length(4),
            Constraint::Length(1),
        ])
        .split(area);

    match app.current_chant() {
        Some(chant) => {
            draw_header(f, outer[0], app, chant);

            let now_playing = app.orchestrator.current_segment().map(|s| s.verse_index);
            app.verse_list
                .draw(f, outer[1], chant, &app.selection, now_playing, &app.theme);

            draw_verse_text(f, outer[2], chant, *app.highlight.get(), &app.theme);
        }
        None => {
            let loading = Paragraph::new("Loading chants...")
                .alignment(Alignment::Center)
                .style(Style::default().fg(app.theme.text_dim_fg));
            f.render_widget(loading, outer[1]);
        }
    }

    draw_player(f, outer[3], app);

    draw_status(f, outer[4], app);
}
