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

//! Application event distribution and orchestration.
//!
//! This module defines the central event-handling logic for the application,
//! bridging the gap between user input (keyboard), background worker updates
//! (catalog loading, audio player), and the UI rendering pipeline.
//!
//! # Architecture
//!
//! The system follows a reactive event-loop pattern:
//!
//! 1. **Capture**: Events are received via the [`AppEvent`] enum through an
//!    asynchronous channel.
//! 2. **Process**: The [`process_events`] function updates the [`App`] state,
//!    drives the playback orchestrator, and manages verse list navigation.
//! 3. **Render**: After each event is processed, the UI is re-drawn using the
//!    `ratatui` terminal.
//!
//! Engine notifications travel through the same channel, so they are only
//! ever applied to playback state on this thread.

mod handlers;
use handlers::*;

use std::io::Stdout;

use anyhow::{Result, anyhow};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, prelude::CrosstermBackend};

use crate::{App, model::Chant, player::PlayerEvent, render::draw};

#[derive(Debug)]
pub(crate) enum AppEvent {
    Key(KeyEvent),

    CatalogLoaded(Vec<Chant>),

    Player(PlayerEvent),

    /// Recompute the highlighted verse line from the playback position.
    Progress,

    Tick,

    ExitApplication,

    Error(String),
    FatalError(String),
}

/// Runs the main application loop, handling events and rendering the UI in the
/// terminal.
///
/// This function loops until a 'quit' event is received or the event channel
/// is closed.
///
/// # Errors
///
/// Returns an error if drawing fails or a worker reports a fatal error.
pub(crate) fn process_events(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> Result<()> {
    while let Ok(event) = app.event_rx.recv() {
        if matches!(event, AppEvent::ExitApplication) {
            break;
        }

        match event {
            AppEvent::Key(key) => process_key_event(app, key)?,
            AppEvent::CatalogLoaded(chants) => handle_catalog_loaded(app, chants),
            AppEvent::Player(player_event) => handle_player_event(app, player_event),
            AppEvent::Progress => handle_progress(app),
            AppEvent::Error(message) => handle_error(app, message),
            AppEvent::FatalError(message) => return Err(anyhow!(message)),
            AppEvent::Tick | AppEvent::ExitApplication => {}
        }

        app.sync_playback_display();

        terminal.draw(|f| draw(f, app))?;
    }

    Ok(())
}

/// Maps keyboard input to verse selection and transport operations.
///
/// * **Application Control**: exiting the program.
/// * **Navigation**: moving the cursor around the two-column verse list, and
///   switching between chants.
/// * **Selection**: toggling verses, select all / clear all.
/// * **Playback**: play, pause, stop, loop and jumping to a verse.
///
/// # Errors
///
/// Returns an error if an event cannot be sent back to the event loop.
fn process_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    if key.kind != KeyEventKind::Press {
        return Ok(());
    }

    match key.code {
        KeyCode::Char('q') => app.event_tx.send(AppEvent::ExitApplication)?,

        // Navigation
        KeyCode::Char('j') | KeyCode::Down => app.verse_list.next(),
        KeyCode::Char('k') | KeyCode::Up => app.verse_list.previous(),
        KeyCode::Char('h') | KeyCode::Left => app.verse_list.previous_column(),
        KeyCode::Char('l') | KeyCode::Right => app.verse_list.next_column(),
        KeyCode::Home => app.verse_list.first(),
        KeyCode::End => app.verse_list.last(),

        KeyCode::Char('[') => handle_previous_chant(app),
        KeyCode::Char(']') => handle_next_chant(app),

        // Selection
        KeyCode::Char(' ') => handle_toggle_verse(app),
        KeyCode::Char('a') => handle_toggle_select_all(app),
        KeyCode::Enter => handle_activate_verse(app),

        // Playback controls
        KeyCode::Char('p') => handle_play_pause(app),
        KeyCode::Char('s') => handle_stop(app),
        KeyCode::Char('o') => handle_toggle_loop(app),

        _ => {}
    }

    Ok(())
}
