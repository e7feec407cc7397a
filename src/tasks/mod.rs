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

//! Asynchronous application task processing.
//!
//! This module implements the command pattern used to offload tasks such as
//! reading the chant catalog from the main UI thread. It provides a dedicated
//! worker loop that translates [`AppTask`] requests into file operations and
//! broadcasts the results back to the application via [`AppEvent`]s.
//!
//! Only actions that may block should be implemented as tasks. Playback
//! control is handled by events on the control thread.

use anyhow::Result;
use log::error;
use std::{
    path::PathBuf,
    sync::mpsc::{Receiver, Sender},
    thread,
};

use crate::{events::AppEvent, model::catalog};

#[derive(Debug)]
pub(crate) enum AppTask {
    LoadCatalog {
        path: PathBuf,
        audio_root: Option<PathBuf>,
    },
}

/// Spawns a background thread to process application tasks.
///
/// # Arguments
///
/// * `task_rx` - The receiving end of the task channel.
/// * `event_tx` - The sending end of the channel for broadcasting results.
pub(crate) fn spawn_task_worker(task_rx: Receiver<AppTask>, event_tx: Sender<AppEvent>) {
    thread::spawn(move || {
        while let Ok(task) = task_rx.recv() {
            if let Err(e) = handle_task(task, &event_tx) {
                error!("Task failed: {:#}", e);
                let _ = event_tx.send(AppEvent::Error(format!("{:#}", e)));
            }
        }
    });
}

/// Executes a single task and sends the result back through the application
/// event channel.
fn handle_task(task: AppTask, event_tx: &Sender<AppEvent>) -> Result<()> {
    match task {
        AppTask::LoadCatalog { path, audio_root } => {
            let chants = catalog::load_catalog(&path, audio_root.as_deref())?;
            event_tx.send(AppEvent::CatalogLoaded(chants))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{fs, sync::mpsc, time::Duration};

    use super::*;

    #[test]
    fn load_catalog_reports_chants() {
        let dir = std::env::temp_dir().join(format!("vandana-task-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("chants.json");
        fs::write(
            &path,
            r#"{ "chants": [ { "id": "a", "title": "A", "audio_file": "a.ogg",
                "verses": [ { "id": 0, "start_time": 0.0, "end_time": 1.0, "text": "x" } ] } ] }"#,
        )
        .unwrap();

        let (task_tx, task_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        spawn_task_worker(task_rx, event_tx);
        task_tx
            .send(AppTask::LoadCatalog {
                path: path.clone(),
                audio_root: None,
            })
            .unwrap();

        match event_rx.recv_timeout(Duration::from_secs(5)).unwrap() {
            AppEvent::CatalogLoaded(chants) => {
                assert_eq!(chants.len(), 1);
                assert_eq!(chants[0].audio_reference, dir.join("a.ogg").to_string_lossy());
            }
            other => panic!("unexpected event {:?}", other),
        }

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn load_failure_is_reported_as_an_error_event() {
        let (task_tx, task_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        spawn_task_worker(task_rx, event_tx);

        task_tx
            .send(AppTask::LoadCatalog {
                path: PathBuf::from("/nonexistent/vandana/chants.json"),
                audio_root: None,
            })
            .unwrap();

        assert!(matches!(
            event_rx.recv_timeout(Duration::from_secs(5)).unwrap(),
            AppEvent::Error(message) if message.contains("Failed to read catalog")
        ));
    }
}
