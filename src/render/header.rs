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

//! Render the chant header: title, chant counter, selection summary and the
//! loop switch.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::{App, model::Chant, render::icons::ICON_LOOP};

pub(crate) fn draw_header(f: &mut Frame, area: Rect, app: &App, chant: &Chant) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(app.theme.border_colour))
        .padding(Padding::horizontal(1));

    let inner_area = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(40)])
        .split(inner_area);

    let title = Line::from(vec![
        Span::styled(
            chant.title.as_str(),
            Style::default()
                .fg(app.theme.accent_colour)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {}/{}", app.chant_index + 1, app.chants.len()),
            Style::default().fg(app.theme.text_dim_fg),
        ),
    ]);
    f.render_widget(Paragraph::new(title), chunks[0]);

    // The button label offers the opposite of the current state.
    let select_label = if app.selection.is_select_all_active() {
        "Clear All"
    } else {
        "Select All"
    };

    let loop_style = if app.orchestrator.is_looping() {
        Style::default().fg(app.theme.accent_colour)
    } else {
        Style::default().fg(app.theme.text_dim_fg)
    };

    let summary = Line::from(vec![
        Span::styled(
            format!("{}/{} selected  ", app.selection.len(), chant.verse_count()),
            Style::default().fg(app.theme.text_fg),
        ),
        Span::styled(format!("[a] {}  ", select_label), Style::default().fg(app.theme.text_dim_fg)),
        Span::styled(format!("{} Loop", ICON_LOOP), loop_style),
    ]);
    f.render_widget(Paragraph::new(summary).alignment(Alignment::Right), chunks[1]);
}
