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

//! UI rendering logic for the verse checklist.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::{
    components::VerseList,
    model::{Chant, selection::Selection},
    render::icons::{ICON_CHECKED, ICON_PLAY, ICON_UNCHECKED},
    theme::Theme,
};

impl VerseList {
    pub(crate) fn draw(
        &self,
        f: &mut Frame,
        area: Rect,
        chant: &Chant,
        selection: &Selection,
        now_playing: Option<usize>,
        theme: &Theme,
    ) {
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(theme.border_colour))
            .padding(Padding::horizontal(1));

        let inner_area = block.inner(area);
        f.render_widget(block, area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(inner_area);

        let height = self.column_height();
        let visible_rows = inner_area.height as usize;

        // Keep the cursor row on screen when the chant is longer than the pane.
        let cursor_row = self.cursor().map_or(0, |c| if c < height { c } else { c - height });
        let scroll = (cursor_row + 1).saturating_sub(visible_rows);

        for (column, range) in [(0, 0..height), (1, height..chant.verse_count())] {
            let lines: Vec<Line> = chant.verses[range]
                .iter()
                .skip(scroll)
                .map(|verse| {
                    let is_cursor = self.cursor() == Some(verse.index);
                    let is_selected = selection.contains(verse.index);
                    let is_playing = now_playing == Some(verse.index);

                    let checkbox = if is_selected { ICON_CHECKED } else { ICON_UNCHECKED };
                    let marker = if is_playing { ICON_PLAY } else { " " };

                    let mut title_style = Style::default().fg(theme.verse_title_fg);
                    if is_playing {
                        title_style = title_style.fg(theme.accent_colour).add_modifier(Modifier::BOLD);
                    }
                    if is_cursor {
                        title_style = title_style.add_modifier(Modifier::REVERSED);
                    }

                    Line::from(vec![
                        Span::styled(format!("{} ", marker), Style::default().fg(theme.accent_colour)),
                        Span::styled(format!("{} ", checkbox), Style::default().fg(theme.checkbox_fg)),
                        Span::styled(verse.title.as_str(), title_style),
                    ])
                })
                .collect();

            f.render_widget(Paragraph::new(lines), columns[column]);
        }
    }
}
