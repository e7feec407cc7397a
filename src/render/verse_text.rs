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

//! Render the scrolling verse text.
//!
//! The verse being heard is shown between its neighbours in the chant, which
//! are dimmed. The highlighted line is kept vertically centred, so the text
//! scrolls as the verse progresses.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::Paragraph,
};

use crate::{mapper::Highlight, model::Chant, theme::Theme};

pub(crate) fn draw_verse_text(f: &mut Frame, area: Rect, chant: &Chant, highlight: Option<Highlight>, theme: &Theme) {
    let Some((lines, target_row)) = highlight.and_then(|h| layout_lines(chant, h, theme)) else {
        let placeholder = Paragraph::new("Select verses and press p to play")
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.text_dim_fg));
        f.render_widget(placeholder, area);
        return;
    };

    let offset = target_row.saturating_sub(area.height as usize / 2);

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .scroll((u16::try_from(offset).unwrap_or(u16::MAX), 0));

    f.render_widget(paragraph, area);
}

/// Builds the text lines and returns the row of the highlighted line.
fn layout_lines<'a>(chant: &'a Chant, highlight: Highlight, theme: &Theme) -> Option<(Vec<Line<'a>>, usize)> {
    let current = chant.verse(highlight.verse_index)?;
    let dim = Style::default().fg(theme.text_dim_fg);

    let mut lines: Vec<Line> = Vec::new();

    if let Some(previous) = highlight.verse_index.checked_sub(1).and_then(|i| chant.verse(i)) {
        lines.extend(previous.lines().into_iter().map(|l| Line::styled(l, dim)));
        lines.push(Line::default());
    }

    let target_row = lines.len() + highlight.line_index;

    for (i, line) in current.lines().into_iter().enumerate() {
        let style = if i == highlight.line_index {
            Style::default()
                .fg(theme.highlight_fg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text_fg)
        };
        lines.push(Line::styled(line, style));
    }

    if let Some(next) = chant.verse(highlight.verse_index + 1) {
        lines.push(Line::default());
        lines.extend(next.lines().into_iter().map(|l| Line::styled(l, dim)));
    }

    Some((lines, target_row))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::{chant, verse};

    #[test]
    fn highlighted_row_accounts_for_the_previous_verse() {
        let chant = chant(vec![
            verse(0, 0.0, 1.0, "a\nb"),
            verse(1, 1.0, 2.0, "c\nd\ne"),
            verse(2, 2.0, 3.0, "f"),
        ]);
        let theme = Theme::default();

        let (lines, row) = layout_lines(
            &chant,
            Highlight {
                verse_index: 1,
                line_index: 2,
            },
            &theme,
        )
        .unwrap();

        // a, b, blank, c, d, e, blank, f
        assert_eq!(lines.len(), 8);
        assert_eq!(row, 5);
    }

    #[test]
    fn first_verse_has_no_leading_context() {
        let chant = chant(vec![verse(0, 0.0, 1.0, "a\nb")]);
        let theme = Theme::default();

        let (lines, row) = layout_lines(
            &chant,
            Highlight {
                verse_index: 0,
                line_index: 1,
            },
            &theme,
        )
        .unwrap();

        assert_eq!(lines.len(), 2);
        assert_eq!(row, 1);
    }
}
