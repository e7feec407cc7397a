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

//! MPV-backed audio playback engine and event processing.
//!
//! This module provides the core audio playback logic, leveraging `libmpv`
//! for decoding and gapless playback of clipped queue entries. It manages a
//! background worker thread that bridges the gap between the command-based
//! [`PlaybackEngine`](super::PlaybackEngine) interface and the low-level MPV
//! property observation system.
//!
//! # Architecture
//!
//! The engine operates using a dual-channel communication pattern:
//! 1. **Command Channel**: Receives [`AudioPlayerCommand`]s from the
//!    orchestrator (load, play, pause, seek, and so on).
//! 2. **Event Channel**: Broadcasts [`AppEvent::Player`] notifications such as
//!    queue transitions, end of queue, and load failures.
//!
//! Each queue entry is appended to the MPV playlist with per-file `start` and
//! `end` options, so the whole selection plays from a single asset without
//! gaps. Every event is tagged with the generation of the most recent
//! [`AudioPlayerCommand::Load`] the worker has processed, events MPV queued
//! before a load are drained under the outgoing generation.

use anyhow::{Context, Result};
use log::{debug, warn};
use mpv::Format;
use std::{
    sync::{
        Arc,
        mpsc::{Receiver, Sender},
    },
    thread,
};

use crate::{
    events::AppEvent,
    player::{AudioPlayer, PlaybackClock, PlayerEvent, PlayerState, QueueItem},
};

#[derive(Debug)]
pub(crate) enum AudioPlayerCommand {
    Load { generation: u64, items: Vec<QueueItem> },
    Play,
    Pause,
    Stop,
    Seek { queue_index: usize, offset_ms: u64 },
    SetRepeat(bool),
}

/// Worker-side view of what has been handed to MPV.
struct EngineState {
    generation: u64,
    items: Vec<QueueItem>,
    current: Option<usize>,
    repeat: bool,
    /// Set after a stop, MPV drops its playlist so the queue is appended
    /// again on the next play or seek.
    needs_reload: bool,
    pending_offset_ms: Option<u64>,
    is_paused: bool,
    is_idle: bool,
    player_state: PlayerState,
}

impl EngineState {
    fn begin_generation(&mut self, generation: u64, items: Vec<QueueItem>) {
        self.generation = generation;
        self.items = items;
        self.current = None;
        self.pending_offset_ms = None;
    }

    /// The current entry played to its end. Reaching the end of the last
    /// entry without repeat finishes the queue, MPV then drops to idle and
    /// the queue has to be appended again before it can play.
    fn end_of_file(&mut self) -> Option<PlayerEvent> {
        let last = self.items.len().checked_sub(1);
        if self.repeat || self.current.is_none() || self.current != last {
            return None;
        }

        self.current = None;
        self.needs_reload = true;
        Some(PlayerEvent::Finished {
            generation: self.generation,
        })
    }

    fn failure(&self, message: String) -> PlayerEvent {
        PlayerEvent::Failed {
            generation: self.generation,
            message,
        }
    }

    fn new() -> Self {
        Self {
            generation: 0,
            items: Vec::new(),
            current: None,
            repeat: false,
            needs_reload: false,
            pending_offset_ms: None,
            is_paused: true,
            is_idle: true,
            player_state: PlayerState::Stopped,
        }
    }
}

/// Spawns the audio worker thread to process playback commands.
///
/// This function takes ownership of the command receiver and the event sender,
/// moving them into a dedicated background thread.
///
/// If the worker fails to initialise MPV, the error is caught here and
/// broadcast as a fatal application event.
pub(crate) fn spawn_player_worker(
    command_rx: Receiver<AudioPlayerCommand>,
    event_tx: Sender<AppEvent>,
    clock: Arc<PlaybackClock>,
) {
    let error_tx = event_tx.clone();

    thread::spawn(move || {
        if let Err(e) = audio_player_worker(command_rx, event_tx, clock) {
            let _ = error_tx.send(AppEvent::FatalError(format!("MPV worker failure: {:?}", e)));
        }
    });
}

/// The primary execution loop for the audio player backend.
///
/// Initialises a local `libmpv` context and alternates between draining
/// pending commands and waiting briefly for MPV events.
///
/// # Errors
///
/// Returns an error if the MPV context fails to initialise or the event
/// channel is closed. Failures of individual commands are reported as
/// [`PlayerEvent::Failed`] and do not stop the worker.
fn audio_player_worker(
    command_rx: Receiver<AudioPlayerCommand>,
    event_tx: Sender<AppEvent>,
    clock: Arc<PlaybackClock>,
) -> Result<()> {
    let mut handler = (|| {
        let mut builder = mpv::MpvHandlerBuilder::new().context("Failed to create MPV builder")?;
        builder
            .set_option("vo", "null")
            .context("Failed to set no video output")?;
        builder
            .set_option("gapless-audio", "yes")
            .context("Failed to enable gapless audio")?;
        builder.build().context("Failed to build MPV handler")
    })()?;

    handler
        .observe_property::<i64>("playlist-pos", 0)
        .context("Failed to observe playlist-pos")?;
    handler
        .observe_property::<bool>("pause", 0)
        .context("Failed to observe pause")?;
    handler
        .observe_property::<f64>("time-pos", 0)
        .context("Failed to observe time-pos")?;
    handler
        .observe_property::<bool>("idle-active", 0)
        .context("Failed to observe idle-active")?;

    let mut state = EngineState::new();

    loop {
        process_commands(&mut handler, &command_rx, &mut state, &clock, &event_tx)?;
        process_mpv_event(&mut handler, 0.05, &mut state, &clock, &event_tx)?;
    }
}

/// Drains and executes all pending commands from the orchestrator.
fn process_commands(
    handler: &mut mpv::MpvHandler,
    command_rx: &Receiver<AudioPlayerCommand>,
    state: &mut EngineState,
    clock: &PlaybackClock,
    event_tx: &Sender<AppEvent>,
) -> Result<()> {
    while let Ok(command) = command_rx.try_recv() {
        debug!("Audio player command: {:?}", command);

        if let Err(e) = execute_command(handler, command, state, clock, event_tx) {
            warn!("Audio player command failed: {:?}", e);
            event_tx
                .send(AppEvent::Player(PlayerEvent::Failed {
                    generation: state.generation,
                    message: format!("{:#}", e),
                }))
                .context("Failed to send player failure event")?;
        }
    }

    Ok(())
}

fn execute_command(
    handler: &mut mpv::MpvHandler,
    command: AudioPlayerCommand,
    state: &mut EngineState,
    clock: &PlaybackClock,
    event_tx: &Sender<AppEvent>,
) -> Result<()> {
    match command {
        AudioPlayerCommand::Load { generation, items } => {
            handler.set_property("pause", true)?;
            handler.command(&["stop"]).context("Failed to clear MPV playlist")?;

            // Events MPV already queued belong to the outgoing queue.
            while process_mpv_event(handler, 0.0, state, clock, event_tx)? {}

            state.begin_generation(generation, items);
            clock.reset();

            append_items(handler, &state.items)?;
            state.needs_reload = false;
        }
        AudioPlayerCommand::Play => {
            if state.needs_reload {
                append_items(handler, &state.items)?;
                state.needs_reload = false;
            }
            handler.set_property("pause", false)?;
        }
        AudioPlayerCommand::Pause => {
            handler.set_property("pause", true)?;
        }
        AudioPlayerCommand::Stop => {
            handler.set_property("pause", true)?;
            handler.command(&["stop"])?;
            state.current = None;
            state.pending_offset_ms = None;
            state.needs_reload = true;
            clock.reset();
        }
        AudioPlayerCommand::Seek {
            queue_index,
            offset_ms,
        } => {
            if state.needs_reload {
                append_items(handler, &state.items)?;
                state.needs_reload = false;
            }
            // Unlike writing playlist-pos, this also restarts the current entry.
            handler
                .command(&["playlist-play-index", &queue_index.to_string()])
                .context(format!("Failed to seek to queue entry {}", queue_index))?;
            state.pending_offset_ms = (offset_ms > 0).then_some(offset_ms);
        }
        AudioPlayerCommand::SetRepeat(enabled) => {
            state.repeat = enabled;
            handler.set_property("loop-playlist", if enabled { "inf" } else { "no" })?;
        }
    }

    Ok(())
}

/// Appends every queue entry to the MPV playlist as a clip of the asset.
fn append_items(handler: &mut mpv::MpvHandler, items: &[QueueItem]) -> Result<()> {
    for (i, item) in items.iter().enumerate() {
        let flag = if i == 0 { "append-play" } else { "append" };
        let options = clip_options(item);
        // "-1" is the insertion index argument, ignored by append modes.
        handler
            .command(&["loadfile", &item.uri, flag, "-1", &options])
            .context(format!("Failed to queue file: {}", &item.uri))?;
    }

    Ok(())
}

/// Per-file MPV options clipping the asset to a queue entry.
///
/// The title uses MPV's `%len%` quoting so it may contain commas.
fn clip_options(item: &QueueItem) -> String {
    format!(
        "start={:.3},end={:.3},force-media-title=%{}%{}",
        item.start_ms as f64 / 1000.0,
        item.end_ms as f64 / 1000.0,
        item.title.len(),
        item.title
    )
}

/// Polls for an MPV event and synchronizes the worker state.
///
/// Waits for up to `timeout` seconds for an event from the MPV context and
/// returns whether one arrived.
fn process_mpv_event(
    handler: &mut mpv::MpvHandler,
    timeout: f64,
    state: &mut EngineState,
    clock: &PlaybackClock,
    event_tx: &Sender<AppEvent>,
) -> Result<bool> {
    let Some(mpv_event) = handler.wait_event(timeout) else {
        return Ok(false);
    };

    let player_event = match mpv_event {
        mpv::Event::PropertyChange { name, change, .. } => match (name, change) {
            ("playlist-pos", Format::Int(pos)) if pos >= 0 => {
                let index = pos as usize;
                state.current = Some(index);
                clock.set_position(Some(0));
                clock.set_duration(state.items.get(index).map(QueueItem::duration_ms));
                Some(PlayerEvent::QueueIndexChanged {
                    generation: state.generation,
                    index,
                })
            }
            ("pause", Format::Flag(pause)) => {
                state.is_paused = pause;
                None
            }
            ("time-pos", Format::Double(seconds)) if seconds >= 0.0 => {
                let start_ms = state
                    .current
                    .and_then(|index| state.items.get(index))
                    .map_or(0, |item| item.start_ms);
                clock.set_position(Some(((seconds * 1000.0) as u64).saturating_sub(start_ms)));
                None
            }
            ("idle-active", Format::Flag(idle_active)) => {
                state.is_idle = idle_active;
                None
            }
            _ => None,
        },
        mpv::Event::FileLoaded => {
            if let Some(offset_ms) = state.pending_offset_ms.take() {
                let start_ms = state
                    .current
                    .and_then(|index| state.items.get(index))
                    .map_or(0, |item| item.start_ms);
                let target = (start_ms + offset_ms) as f64 / 1000.0;
                handler.command(&["seek", &format!("{:.3}", target), "absolute"])?;
            }
            None
        }
        mpv::Event::EndFile(result) => match result {
            Ok(mpv::EndFileReason::MPV_END_FILE_REASON_EOF) => state.end_of_file(),
            Ok(mpv::EndFileReason::MPV_END_FILE_REASON_ERROR) => {
                Some(state.failure("Failed to play audio file".to_string()))
            }
            Ok(_) => None,
            Err(e) => Some(state.failure(format!("{:?}", e))),
        },
        _ => None,
    };

    let new_player_state = AudioPlayer::player_state(state.is_paused, state.is_idle);

    if new_player_state != state.player_state {
        state.player_state = new_player_state;
        event_tx
            .send(AppEvent::Player(PlayerEvent::StateChanged(new_player_state)))
            .context("Failed to send player state event")?;
    }

    if let Some(event) = player_event {
        event_tx
            .send(AppEvent::Player(event))
            .context("Failed to send player event")?;
    }

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_options_quote_the_title() {
        let item = QueueItem {
            uri: "/audio/tiratna.ogg".to_string(),
            start_ms: 2000,
            end_ms: 3499,
            title: "Verse 2: Buddha, Dhamma".to_string(),
        };

        assert_eq!(
            clip_options(&item),
            "start=2.000,end=3.499,force-media-title=%23%Verse 2: Buddha, Dhamma"
        );
    }

    fn item(start_ms: u64) -> QueueItem {
        QueueItem {
            uri: "/audio/tiratna.ogg".to_string(),
            start_ms,
            end_ms: start_ms + 1000,
            title: "Verse".to_string(),
        }
    }

    #[test]
    fn end_of_the_last_entry_finishes_and_forces_a_reload() {
        let mut state = EngineState::new();
        state.begin_generation(3, vec![item(0), item(1000)]);

        state.current = Some(0);
        assert_eq!(state.end_of_file(), None);
        assert!(!state.needs_reload);

        state.current = Some(1);
        assert_eq!(state.end_of_file(), Some(PlayerEvent::Finished { generation: 3 }));
        assert!(state.needs_reload);
        assert_eq!(state.current, None);
    }

    #[test]
    fn end_of_the_last_entry_with_repeat_keeps_playing() {
        let mut state = EngineState::new();
        state.begin_generation(1, vec![item(0)]);
        state.repeat = true;
        state.current = Some(0);

        assert_eq!(state.end_of_file(), None);
        assert!(!state.needs_reload);
    }

    #[test]
    fn failures_carry_the_generation_they_were_read_under() {
        let mut state = EngineState::new();
        state.begin_generation(1, vec![item(0)]);
        let outgoing = state.failure("decode error".to_string());

        state.begin_generation(2, vec![item(0)]);

        assert_eq!(
            outgoing,
            PlayerEvent::Failed {
                generation: 1,
                message: "decode error".to_string()
            }
        );
        assert!(matches!(state.failure(String::new()), PlayerEvent::Failed { generation: 2, .. }));
    }
}
