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

//! # Chant Player TUI.
//!
//! A terminal-based player for chanting practice: pick verses of a chant and
//! hear exactly those verses, in order, with the line being chanted
//! highlighted as it plays.
//!
//! It uses an event-driven architecture where:
//!
//! * The **Main Thread** owns all application state, drives the playback
//!   [`orchestrator`] and renders the UI.
//! * **Background Workers** load the chant catalog and run the audio engine,
//!   reporting back through the application event channel.
//! * **Event Loops** capture user input, periodic ticks and progress ticks to
//!   drive the UI state.
//!
//! ## Architecture
//!
//! The application follows a strict setup-run-teardown pattern to ensure the
//! terminal state is preserved even in the event of a crash. Communication
//! between the UI and background workers is handled via `std::sync::mpsc`
//! channels.

mod components;
mod config;
mod events;
mod mapper;
mod model;
mod orchestrator;
mod player;
mod playlist;
mod render;
mod tasks;
mod theme;
mod ticker;
mod util;

use anyhow::{Context, Result};
use crossterm::event;
use log::{debug, info};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    env, io,
    path::PathBuf,
    sync::{
        Arc,
        mpsc::{self, Receiver, Sender},
    },
    thread,
    time::Duration,
};

use crate::{
    components::VerseList,
    config::AppConfig,
    events::{AppEvent, process_events},
    mapper::Highlight,
    model::{Chant, observable::Observable, selection::Selection},
    orchestrator::Orchestrator,
    player::{AudioPlayer, PlayerState, duration::LoftyDurationResolver},
    tasks::AppTask,
    theme::Theme,
    ticker::ProgressTicker,
};

/// Application state.
struct App {
    pub config: AppConfig,

    pub theme: Theme,

    pub event_tx: Sender<AppEvent>,
    pub event_rx: Receiver<AppEvent>,

    pub task_tx: Sender<AppTask>,

    pub orchestrator: Orchestrator<AudioPlayer, LoftyDurationResolver>,

    pub chants: Vec<Arc<Chant>>,
    pub chant_index: usize,

    pub selection: Selection,
    pub verse_list: VerseList,

    pub highlight: Observable<Option<Highlight>>,
    pub ticker: Option<ProgressTicker>,

    pub player_state: PlayerState,
    pub status_message: Option<String>,
}

impl App {
    /// Create a new instance of application state.
    pub fn new(config: AppConfig, task_tx: Sender<AppTask>) -> Result<Self> {
        let (event_tx, event_rx) = mpsc::channel();

        let audio_player = AudioPlayer::new(event_tx.clone())?;

        let mut orchestrator = Orchestrator::new(audio_player, LoftyDurationResolver::new());
        orchestrator.set_loop(config.start_looped);

        Ok(Self {
            config,
            theme: Theme::default(),
            event_tx,
            event_rx,
            task_tx,
            orchestrator,
            chants: Vec::new(),
            chant_index: 0,
            selection: Selection::new(0),
            verse_list: VerseList::new(),
            highlight: Observable::new(None),
            ticker: None,
            player_state: PlayerState::Stopped,
            status_message: None,
        })
    }

    pub fn current_chant(&self) -> Option<&Chant> {
        self.orchestrator.current_chant().map(Arc::as_ref)
    }

    /// Makes the chant at `index` current, with nothing selected.
    pub fn select_chant(&mut self, index: usize) {
        let Some(chant) = self.chants.get(index).cloned() else {
            return;
        };

        info!("Selected chant {} ({})", chant.id, chant.title);

        self.chant_index = index;
        self.selection.rebind(chant.verse_count());
        self.verse_list.reset(chant.verse_count());

        // Indices valid for both chants survive `set_chant`, the listener
        // expects a fresh chant to start empty.
        self.orchestrator.set_chant(chant);
        if !self.orchestrator.current_selection_snapshot().is_empty() {
            self.orchestrator.set_selection(Vec::new());
        }

        debug!("Chant switch left queue generation {}", self.orchestrator.generation());
    }

    pub fn apply_selection(&mut self) {
        self.orchestrator.set_selection(self.selection.snapshot());
    }

    /// Runs the progress ticker only while audio is playing and refreshes the
    /// highlighted verse line.
    pub fn sync_playback_display(&mut self) {
        if self.orchestrator.is_playing() {
            if self.ticker.is_none() {
                self.ticker = Some(ProgressTicker::start(
                    self.config.progress_interval(),
                    self.event_tx.clone(),
                ));
            }
        } else {
            self.ticker = None;
        }

        self.highlight.set(self.orchestrator.highlight());
    }
}

/// The entry point of the application.
///
/// Sets up the communication channels, initializes the application state,
/// manages the terminal lifecycle, and returns an error if any part of the
/// execution fails.
///
/// The first command line argument, when present, names the catalog file in
/// place of the configured one.
fn main() -> Result<()> {
    let config = config::load_config();
    config::init_logging(&config)?;

    let catalog_file = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(&config.catalog_file));
    let audio_root = config.audio_root.as_ref().map(PathBuf::from);

    let (task_tx, task_rx) = mpsc::channel();

    let mut app = App::new(config, task_tx).context("Failed to initialise application")?;

    let position_subscription = app
        .orchestrator
        .subscribe_queue_position(|position| debug!("Queue position {:?}", position));
    let highlight_subscription = app
        .highlight
        .subscribe(|highlight| debug!("Highlight {:?}", highlight));

    let mut terminal = util::term::setup_terminal(Theme::to_hex(app.theme.background_colour).as_deref())?;
    let res = run(&mut terminal, &mut app, task_rx, catalog_file, audio_root);
    util::term::restore_terminal(&mut terminal);

    app.orchestrator.unsubscribe_queue_position(position_subscription);
    app.highlight.unsubscribe(highlight_subscription);
    app.ticker = None;
    app.orchestrator.stop();

    res.context("Application error occurred")
}

/// Starts the application's background workers and enters the main event loop.
///
/// This function spawns several long-running background threads:
/// * A task worker to process asynchronous [`AppTask`]s.
/// * An input thread to poll for system keyboard events.
/// * A tick thread to trigger periodic UI refreshes.
///
/// After spawning the workers, it requests the chant catalog and hands
/// control to [`process_events`] to manage the UI and state updates.
///
/// # Errors
///
/// Returns an error if the event processing loop encounters an unrecoverable
/// application error.
fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    task_rx: Receiver<AppTask>,
    catalog_file: PathBuf,
    audio_root: Option<PathBuf>,
) -> Result<()> {
    tasks::spawn_task_worker(task_rx, app.event_tx.clone());

    // Spawn a thread to translate raw key events to application events.
    let tx_keys = app.event_tx.clone();
    thread::spawn(move || {
        loop {
            if let Ok(event::Event::Key(key)) = event::read() {
                tx_keys.send(AppEvent::Key(key)).ok();
            }
        }
    });

    // Spawn a thread to send a periodic tick application event, this is
    // effectively the minimum "frame rate" for rendering the TUI application.
    let tx_tick = app.event_tx.clone();
    thread::spawn(move || {
        loop {
            let _ = tx_tick.send(AppEvent::Tick);
            thread::sleep(Duration::from_millis(250));
        }
    });

    app.task_tx
        .send(AppTask::LoadCatalog {
            path: catalog_file,
            audio_root,
        })
        .context("Failed to request the chant catalog")?;

    // Application event loop, process events until the user quits
    process_events(terminal, app)
}
