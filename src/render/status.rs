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

//! Render the status line.
//!
//! The most recent error takes the line when there is one, otherwise a short
//! key reference is shown.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{App, render::icons::ICON_WARNING};

const KEY_HELP: &str =
    "space toggle  enter jump  a all  p play/pause  s stop  o loop  [ ] chant  q quit";

pub(crate) fn draw_status(f: &mut Frame, area: Rect, app: &App) {
    let container = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1)])
        .horizontal_margin(1)
        .split(area);

    let line = match &app.status_message {
        Some(message) => Line::from(vec![
            Span::styled(format!("{} ", ICON_WARNING), Style::default().fg(app.theme.status_error_fg)),
            Span::styled(message.as_str(), Style::default().fg(app.theme.status_error_fg)),
        ]),
        None => Line::styled(KEY_HELP, Style::default().fg(app.theme.text_dim_fg)),
    };

    f.render_widget(
        Paragraph::new(line).style(Style::default().bg(app.theme.gauge_track_colour)),
        container[0],
    );
}
