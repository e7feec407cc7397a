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

//! Render the player bar.
//!
//! Shows the transport state, the verse being heard, the time within its
//! clip and a progress gauge for the clip.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Padding, Paragraph},
};

use crate::{
    App, mapper,
    orchestrator::PlaybackStatus,
    player::PlayerState,
    render::icons::{ICON_PAUSE, ICON_PLAY, ICON_STOP, ICON_WARNING},
    util,
};

/// Renders the player bar with the current verse, clip time and progress.
pub(crate) fn draw_player(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::TOP | Borders::BOTTOM)
        .border_style(Style::default().fg(app.theme.border_colour))
        .padding(Padding::horizontal(1));

    let inner_area = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(inner_area);

    let info_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(16)])
        .split(chunks[0]);

    // The icon follows what the engine reports, not what was requested.
    let icon = match (app.orchestrator.status(), app.player_state) {
        (PlaybackStatus::Unavailable(_), _) => ICON_WARNING,
        (_, PlayerState::Playing) => ICON_PLAY,
        (_, PlayerState::Paused) => ICON_PAUSE,
        (_, PlayerState::Stopped) => ICON_STOP,
    };

    let bold = Style::default().add_modifier(Modifier::BOLD);

    let segment = app.orchestrator.current_segment();
    let verse = segment.and_then(|s| app.current_chant().and_then(|c| c.verse(s.verse_index)));

    let mut info = vec![Span::styled(format!(" {} ", icon), bold).fg(app.theme.text_fg)];
    match verse {
        Some(verse) => {
            info.push(Span::styled(format!("Verse {}: ", verse.index + 1), bold).fg(app.theme.text_fg));
            info.push(Span::styled(verse.title.as_str(), bold).fg(app.theme.accent_colour));
        }
        None => {
            let queued = app.orchestrator.queue().len();
            info.push(Span::styled(format!("{} verses queued", queued), Style::default().fg(app.theme.text_dim_fg)));
        }
    }
    f.render_widget(Paragraph::new(Line::from(info)), info_chunks[0]);

    let duration = segment.map_or(0, |s| s.duration_ms());
    let elapsed = app.orchestrator.elapsed_ms();

    if segment.is_some() {
        let time_line = Line::from(vec![
            Span::styled(util::format::format_time(elapsed), bold).fg(app.theme.accent_colour),
            Span::styled(" / ", bold).fg(app.theme.text_fg),
            Span::styled(util::format::format_time(duration), bold).fg(app.theme.accent_colour),
        ]);
        f.render_widget(Paragraph::new(time_line).alignment(Alignment::Right), info_chunks[1]);
    }

    let position_gauge = Gauge::default()
        .gauge_style(
            Style::default()
                .fg(app.theme.accent_colour)
                .bg(app.theme.gauge_track_colour),
        )
        .ratio(mapper::progress_fraction(elapsed, duration))
        .label("")
        .use_unicode(true);

    f.render_widget(position_gauge, chunks[1]);
}
