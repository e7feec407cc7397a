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

use std::sync::Arc;

use log::{error, info, warn};

use crate::{
    App,
    config,
    model::Chant,
    orchestrator::PlaybackStatus,
    player::PlayerEvent,
};

pub(super) fn handle_catalog_loaded(app: &mut App, chants: Vec<Chant>) {
    info!("Catalog loaded with {} chants", chants.len());
    app.chants = chants.into_iter().map(Arc::new).collect();
    app.select_chant(0);
}

pub(super) fn handle_player_event(app: &mut App, event: PlayerEvent) {
    if let PlayerEvent::StateChanged(state) = event {
        app.player_state = state;
    }

    app.orchestrator.on_engine_event(event);

    if let PlaybackStatus::Unavailable(message) = app.orchestrator.status() {
        app.status_message = Some(format!("Playback unavailable: {}", message));
    }
}

pub(super) fn handle_progress(app: &mut App) {
    if let Some(ticker) = &app.ticker {
        ticker.ack();
    }
}

pub(super) fn handle_error(app: &mut App, message: String) {
    error!("{}", message);
    app.status_message = Some(message);
}

pub(super) fn handle_previous_chant(app: &mut App) {
    if app.chants.len() > 1 {
        let index = app.chant_index.checked_sub(1).unwrap_or(app.chants.len() - 1);
        app.select_chant(index);
    }
}

pub(super) fn handle_next_chant(app: &mut App) {
    if app.chants.len() > 1 {
        app.select_chant((app.chant_index + 1) % app.chants.len());
    }
}

pub(super) fn handle_toggle_verse(app: &mut App) {
    if let Some(index) = app.verse_list.cursor() {
        app.selection.toggle(index);
        app.apply_selection();
    }
}

pub(super) fn handle_toggle_select_all(app: &mut App) {
    if app.selection.is_select_all_active() {
        app.selection.clear();
    } else {
        app.selection.select_all();
    }
    app.apply_selection();
}

/// Selects the verse under the cursor if needed and starts playing from it.
pub(super) fn handle_activate_verse(app: &mut App) {
    if let Some(index) = app.verse_list.cursor() {
        if !app.selection.contains(index) {
            app.selection.insert(index);
            app.apply_selection();
        }
        app.orchestrator.jump_to_verse(index);
    }
}

/// Pauses if playing, otherwise starts playback. With nothing selected every
/// verse is selected first.
pub(super) fn handle_play_pause(app: &mut App) {
    if app.orchestrator.is_playing() {
        app.orchestrator.pause();
        return;
    }

    if app.selection.is_empty() {
        app.selection.select_all();
        app.apply_selection();
    }

    app.status_message = None;
    app.orchestrator.play();
}

pub(super) fn handle_stop(app: &mut App) {
    app.orchestrator.stop();
}

pub(super) fn handle_toggle_loop(app: &mut App) {
    let looping = !app.orchestrator.is_looping();
    app.orchestrator.set_loop(looping);

    app.config.start_looped = looping;
    if let Err(e) = config::save_config(&app.config) {
        warn!("Failed to save configuration: {}", e);
    }
}
