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

//! Audio playback control and state management.
//!
//! This module defines the [`PlaybackEngine`] seam the orchestrator drives,
//! and provides [`AudioPlayer`], the MPV-backed implementation. The player
//! manages a background worker thread that interfaces with libmpv, ensuring
//! that heavy audio operations do not block the main application thread.
//!
//! Notifications from the engine are delivered as [`PlayerEvent`]s through the
//! application event channel, each tagged with the generation of the queue
//! that was loaded when the engine produced it.

mod commands;
pub(crate) mod duration;

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
    mpsc,
};

use anyhow::{Context, Result};

use crate::{events::AppEvent, player::commands::AudioPlayerCommand};

/// Represents the current playback status of the audio engine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum PlayerState {
    Playing,
    Paused,
    Stopped,
}

/// A clipped entry handed to the playback engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct QueueItem {
    pub(crate) uri: String,
    pub(crate) start_ms: u64,
    pub(crate) end_ms: u64,
    pub(crate) title: String,
}

impl QueueItem {
    pub(crate) fn duration_ms(&self) -> u64 {
        self.end_ms.saturating_sub(self.start_ms)
    }
}

/// Asynchronous notifications produced by a playback engine.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PlayerEvent {
    /// The engine moved to a different entry of the queue.
    QueueIndexChanged { generation: u64, index: usize },

    /// The last entry finished and the queue is not repeating.
    Finished { generation: u64 },

    /// The engine could not load or play an entry.
    Failed { generation: u64, message: String },

    StateChanged(PlayerState),
}

/// The operations the orchestrator needs from an audio backend.
///
/// Positions and durations are relative to the current queue entry, not to
/// the underlying audio asset.
pub(crate) trait PlaybackEngine {
    /// Replaces the queue. Events produced for this queue carry `generation`.
    fn load(&mut self, generation: u64, items: Vec<QueueItem>) -> Result<()>;

    fn play(&mut self) -> Result<()>;

    fn pause(&mut self) -> Result<()>;

    /// Halts playback, the queue is kept and restarts from its first entry.
    fn stop(&mut self) -> Result<()>;

    fn seek(&mut self, queue_index: usize, offset_ms: u64) -> Result<()>;

    fn set_repeat(&mut self, enabled: bool) -> Result<()>;

    fn position_ms(&self) -> Option<u64>;

    fn duration_ms(&self) -> Option<u64>;
}

const UNKNOWN: u64 = u64::MAX;

/// Clip-relative position published by the worker thread.
#[derive(Debug)]
pub(crate) struct PlaybackClock {
    position_ms: AtomicU64,
    duration_ms: AtomicU64,
}

impl PlaybackClock {
    fn new() -> Self {
        Self {
            position_ms: AtomicU64::new(UNKNOWN),
            duration_ms: AtomicU64::new(UNKNOWN),
        }
    }

    fn load(value: &AtomicU64) -> Option<u64> {
        match value.load(Ordering::Acquire) {
            UNKNOWN => None,
            ms => Some(ms),
        }
    }

    fn set_position(&self, position_ms: Option<u64>) {
        self.position_ms.store(position_ms.unwrap_or(UNKNOWN), Ordering::Release);
    }

    fn set_duration(&self, duration_ms: Option<u64>) {
        self.duration_ms.store(duration_ms.unwrap_or(UNKNOWN), Ordering::Release);
    }

    fn reset(&self) {
        self.set_position(None);
        self.set_duration(None);
    }
}

/// A handle to the audio playback engine.
///
/// This struct acts as a command proxy; it does not perform audio processing
/// itself but instead sends instructions to a background worker thread.
pub(crate) struct AudioPlayer {
    /// Channel for sending commands to the background worker thread.
    command_tx: mpsc::Sender<AudioPlayerCommand>,
    clock: Arc<PlaybackClock>,
}

impl AudioPlayer {
    /// Spawns the audio worker thread and returns a new player handle.
    ///
    /// # Arguments
    ///
    /// * `event_tx` - A channel to send application-level events (like queue
    ///   transitions or errors) back to the main event loop.
    pub(crate) fn new(event_tx: mpsc::Sender<AppEvent>) -> Result<Self> {
        let (command_tx, command_rx) = mpsc::channel::<AudioPlayerCommand>();
        let clock = Arc::new(PlaybackClock::new());

        commands::spawn_player_worker(command_rx, event_tx, Arc::clone(&clock));

        Ok(Self { command_tx, clock })
    }

    // Maps internal audio backend flags to a simplified [`PlayerState`].
    fn player_state(is_paused: bool, is_idle: bool) -> PlayerState {
        if is_idle {
            PlayerState::Stopped
        } else if is_paused {
            PlayerState::Paused
        } else {
            PlayerState::Playing
        }
    }

    fn send(&self, command: AudioPlayerCommand) -> Result<()> {
        self.command_tx
            .send(command)
            .context("Audio player worker is not running")
    }
}

impl PlaybackEngine for AudioPlayer {
    fn load(&mut self, generation: u64, items: Vec<QueueItem>) -> Result<()> {
        self.clock.reset();
        self.send(AudioPlayerCommand::Load { generation, items })
    }

    fn play(&mut self) -> Result<()> {
        self.send(AudioPlayerCommand::Play)
    }

    fn pause(&mut self) -> Result<()> {
        self.send(AudioPlayerCommand::Pause)
    }

    fn stop(&mut self) -> Result<()> {
        self.clock.reset();
        self.send(AudioPlayerCommand::Stop)
    }

    fn seek(&mut self, queue_index: usize, offset_ms: u64) -> Result<()> {
        self.send(AudioPlayerCommand::Seek {
            queue_index,
            offset_ms,
        })
    }

    fn set_repeat(&mut self, enabled: bool) -> Result<()> {
        self.send(AudioPlayerCommand::SetRepeat(enabled))
    }

    fn position_ms(&self) -> Option<u64> {
        PlaybackClock::load(&self.clock.position_ms)
    }

    fn duration_ms(&self) -> Option<u64> {
        PlaybackClock::load(&self.clock.duration_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_state_prefers_idle_over_paused() {
        assert_eq!(AudioPlayer::player_state(true, true), PlayerState::Stopped);
        assert_eq!(AudioPlayer::player_state(true, false), PlayerState::Paused);
        assert_eq!(AudioPlayer::player_state(false, false), PlayerState::Playing);
    }

    #[test]
    fn clock_reports_unknown_until_published() {
        let clock = PlaybackClock::new();
        assert_eq!(PlaybackClock::load(&clock.position_ms), None);

        clock.set_position(Some(1250));
        clock.set_duration(Some(4000));
        assert_eq!(PlaybackClock::load(&clock.position_ms), Some(1250));
        assert_eq!(PlaybackClock::load(&clock.duration_ms), Some(4000));

        clock.reset();
        assert_eq!(PlaybackClock::load(&clock.duration_ms), None);
    }
}
