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

//! Playback orchestration.
//!
//! The [`Orchestrator`] owns the authoritative playback queue and transport
//! state. It rebuilds the queue whenever the chant or the selection changes,
//! translates transport intents into [`PlaybackEngine`] operations, and
//! applies the engine's asynchronous notifications.
//!
//! # Generations
//!
//! Every queue handed to the engine is tagged with a generation number that
//! increases on each rebuild. Engine notifications carrying any other
//! generation refer to a queue that no longer exists and are discarded.
//!
//! All mutation happens on the control thread; engine notifications are
//! marshalled onto it through the application event channel before they
//! reach [`Orchestrator::on_engine_event`].

use std::sync::Arc;

use anyhow::Error;
use log::{debug, info, warn};

use crate::{
    mapper::{self, Highlight},
    model::{
        Chant,
        observable::{Observable, SubscriptionId},
    },
    player::{PlaybackEngine, PlayerEvent, QueueItem, duration::DurationResolver},
    playlist::{self, Segment},
};

/// Transport state as intended by the listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PlaybackStatus {
    Stopped,
    Playing,
    Paused,
    /// The engine failed to load or play the queue, `play()` retries.
    Unavailable(String),
}

pub(crate) struct Orchestrator<E, R> {
    engine: E,
    resolver: R,
    chant: Option<Arc<Chant>>,
    /// Ascending, deduplicated verse indices valid for `chant`.
    selection: Vec<usize>,
    queue: Vec<Segment>,
    generation: u64,
    queue_position: Observable<Option<usize>>,
    status: PlaybackStatus,
    looping: bool,
    /// Target of a `jump_to_verse` the engine has not yet confirmed.
    pending_seek: Option<usize>,
    /// The engine played through the queue, it must be rewound before it
    /// plays again.
    finished: bool,
}

impl<E: PlaybackEngine, R: DurationResolver> Orchestrator<E, R> {
    pub(crate) fn new(engine: E, resolver: R) -> Self {
        Self {
            engine,
            resolver,
            chant: None,
            selection: Vec::new(),
            queue: Vec::new(),
            generation: 0,
            queue_position: Observable::new(None),
            status: PlaybackStatus::Stopped,
            looping: false,
            pending_seek: None,
            finished: false,
        }
    }

    /// Replaces the active chant and rebuilds the queue from the current
    /// selection, filtered to the verses of the new chant.
    pub(crate) fn set_chant(&mut self, chant: Arc<Chant>) {
        self.pending_seek = None;

        let verse_count = chant.verse_count();
        self.selection.retain(|&index| index < verse_count);
        self.chant = Some(chant);

        self.rebuild();
    }

    /// Replaces the selection and rebuilds the queue.
    ///
    /// If playback was active and the new queue is not empty, playback
    /// continues from the first entry of the new queue.
    pub(crate) fn set_selection<I>(&mut self, indices: I)
    where
        I: IntoIterator<Item = usize>,
    {
        let verse_count = self.chant.as_ref().map_or(0, |c| c.verse_count());

        let mut selection: Vec<usize> = indices
            .into_iter()
            .filter(|&index| index < verse_count)
            .collect();
        selection.sort_unstable();
        selection.dedup();

        self.selection = selection;
        self.rebuild();
    }

    pub(crate) fn set_loop(&mut self, enabled: bool) {
        self.looping = enabled;
        if let Err(e) = self.engine.set_repeat(enabled) {
            self.fail(e);
        }
    }

    /// Starts or resumes playback, retrying a failed queue.
    pub(crate) fn play(&mut self) {
        if self.queue.is_empty() {
            return;
        }

        if matches!(self.status, PlaybackStatus::Unavailable(_)) {
            info!("Retrying playback of generation {}", self.generation + 1);
            if !self.load_queue() {
                return;
            }
        }

        if self.finished {
            debug!("Restarting finished queue generation {}", self.generation);
            if let Err(e) = self.engine.seek(0, 0) {
                self.fail(e);
                return;
            }
            self.finished = false;
        }

        if let Err(e) = self.engine.play() {
            self.fail(e);
            return;
        }

        self.status = PlaybackStatus::Playing;
        if self.queue_position.get().is_none() {
            self.queue_position.set(Some(0));
        }
    }

    pub(crate) fn pause(&mut self) {
        if self.queue.is_empty() || self.status != PlaybackStatus::Playing {
            return;
        }

        if let Err(e) = self.engine.pause() {
            self.fail(e);
            return;
        }

        self.status = PlaybackStatus::Paused;
    }

    /// Halts playback and clears the queue position, cancelling any seek the
    /// engine has not confirmed yet.
    pub(crate) fn stop(&mut self) {
        self.pending_seek = None;

        if let Err(e) = self.engine.stop() {
            warn!("Failed to stop playback: {:#}", e);
        }

        self.status = PlaybackStatus::Stopped;
        self.queue_position.set(None);
    }

    /// Seeks to the queue entry for `verse_index` and plays it.
    ///
    /// Verses that are not in the current queue are ignored.
    pub(crate) fn jump_to_verse(&mut self, verse_index: usize) {
        let Some(queue_index) = self.queue.iter().position(|s| s.verse_index == verse_index) else {
            debug!("Ignoring jump to verse {} which is not queued", verse_index);
            return;
        };

        if matches!(self.status, PlaybackStatus::Unavailable(_)) && !self.load_queue() {
            return;
        }

        if let Err(e) = self.engine.seek(queue_index, 0).and_then(|_| self.engine.play()) {
            self.fail(e);
            return;
        }

        self.finished = false;

        // Restarting the current entry produces no transition to wait for.
        self.pending_seek = (self.current_queue_position() != Some(queue_index)).then_some(queue_index);
        self.status = PlaybackStatus::Playing;
        self.queue_position.set(Some(queue_index));
    }

    /// Applies a notification from the playback engine.
    pub(crate) fn on_engine_event(&mut self, event: PlayerEvent) {
        match event {
            PlayerEvent::QueueIndexChanged { generation, index } => {
                if !self.is_current(generation) {
                    return;
                }

                if matches!(self.status, PlaybackStatus::Stopped | PlaybackStatus::Unavailable(_)) {
                    return;
                }

                if index >= self.queue.len() {
                    warn!("Engine reported queue index {} beyond queue of {}", index, self.queue.len());
                    return;
                }

                if let Some(target) = self.pending_seek {
                    if target != index {
                        debug!("Discarding transition to {} while seeking to {}", index, target);
                        return;
                    }
                    self.pending_seek = None;
                }

                self.queue_position.set(Some(index));
            }
            PlayerEvent::Finished { generation } => {
                if !self.is_current(generation) || self.looping {
                    return;
                }

                debug!("Queue generation {} finished", generation);
                self.pending_seek = None;
                self.finished = true;
                self.status = PlaybackStatus::Stopped;
                self.queue_position.set(None);
            }
            PlayerEvent::Failed { generation, message } => {
                if !self.is_current(generation) {
                    return;
                }

                warn!("Playback unavailable: {}", message);
                self.pending_seek = None;
                self.status = PlaybackStatus::Unavailable(message);
                self.queue_position.set(None);
            }
            PlayerEvent::StateChanged(_) => {}
        }
    }

    /// The verse and line to highlight for the engine's current position.
    pub(crate) fn highlight(&self) -> Option<Highlight> {
        let chant = self.chant.as_ref()?;
        let segment = self.current_segment()?;

        mapper::map_position(
            chant,
            &self.queue,
            self.current_queue_position(),
            self.elapsed_ms(),
            self.engine.duration_ms().unwrap_or(segment.duration_ms()),
        )
    }

    pub(crate) fn current_queue_position(&self) -> Option<usize> {
        self.queue_position.value()
    }

    pub(crate) fn subscribe_queue_position<F>(&mut self, subscriber: F) -> SubscriptionId
    where
        F: FnMut(&Option<usize>) + Send + 'static,
    {
        self.queue_position.subscribe(subscriber)
    }

    pub(crate) fn unsubscribe_queue_position(&mut self, id: SubscriptionId) {
        self.queue_position.unsubscribe(id);
    }

    pub(crate) fn current_segment(&self) -> Option<&Segment> {
        self.queue.get(self.current_queue_position()?)
    }

    /// Time elapsed within the current segment.
    pub(crate) fn elapsed_ms(&self) -> u64 {
        match self.current_segment() {
            Some(segment) => self
                .engine
                .position_ms()
                .unwrap_or(0)
                .min(segment.duration_ms()),
            None => 0,
        }
    }

    pub(crate) fn current_selection_snapshot(&self) -> Vec<usize> {
        self.selection.clone()
    }

    pub(crate) fn queue(&self) -> &[Segment] {
        &self.queue
    }

    pub(crate) fn current_chant(&self) -> Option<&Arc<Chant>> {
        self.chant.as_ref()
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn status(&self) -> &PlaybackStatus {
        &self.status
    }

    pub(crate) fn is_playing(&self) -> bool {
        self.status == PlaybackStatus::Playing
    }

    pub(crate) fn is_looping(&self) -> bool {
        self.looping
    }

    #[cfg(test)]
    pub(crate) fn engine(&self) -> &E {
        &self.engine
    }

    #[cfg(test)]
    pub(crate) fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    fn is_current(&self, generation: u64) -> bool {
        if generation != self.generation {
            debug!(
                "Discarding engine event for generation {} (current {})",
                generation, self.generation
            );
            return false;
        }

        true
    }

    /// Regenerates the queue from the chant and selection and hands it to the
    /// engine, preserving the intent to play.
    fn rebuild(&mut self) {
        let was_playing = self.is_playing();
        self.pending_seek = None;

        self.queue = match &self.chant {
            Some(chant) => {
                let known_duration_ms = self.resolver.duration_ms(&chant.audio_reference);
                playlist::build_playlist(chant, self.selection.iter().copied(), known_duration_ms)
            }
            None => Vec::new(),
        };

        if !self.load_queue() {
            return;
        }

        if was_playing && !self.queue.is_empty() {
            if let Err(e) = self.engine.play() {
                self.fail(e);
                return;
            }
            self.status = PlaybackStatus::Playing;
            self.queue_position.set(Some(0));
        } else {
            self.status = PlaybackStatus::Stopped;
            self.queue_position.set(None);
        }
    }

    /// Hands the queue to the engine under a new generation.
    ///
    /// Returns `false` if the engine rejected it.
    fn load_queue(&mut self) -> bool {
        self.generation += 1;
        self.finished = false;
        self.queue_position.set(None);

        let items = self.queue_items();
        info!(
            "Loading queue generation {} with {} segments",
            self.generation,
            items.len()
        );

        match self.engine.load(self.generation, items) {
            Ok(()) => {
                if matches!(self.status, PlaybackStatus::Unavailable(_)) {
                    self.status = PlaybackStatus::Stopped;
                }
                true
            }
            Err(e) => {
                self.fail(e);
                false
            }
        }
    }

    fn queue_items(&self) -> Vec<QueueItem> {
        let Some(chant) = &self.chant else {
            return Vec::new();
        };

        self.queue
            .iter()
            .map(|segment| QueueItem {
                uri: chant.audio_reference.clone(),
                start_ms: segment.start_ms,
                end_ms: segment.end_ms,
                title: format!("Verse {}: {}", segment.verse_index + 1, chant.title),
            })
            .collect()
    }

    fn fail(&mut self, error: Error) {
        warn!("Playback unavailable: {:#}", error);
        self.pending_seek = None;
        self.status = PlaybackStatus::Unavailable(format!("{:#}", error));
        self.queue_position.set(None);
    }
}
