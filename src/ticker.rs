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

//! Playback progress polling.
//!
//! While audio is playing, a [`ProgressTicker`] periodically asks the control
//! thread to recompute the highlighted verse line by sending
//! [`AppEvent::Progress`].
//!
//! At most one tick is in flight: a new tick is only sent once the control
//! thread has acknowledged the previous one. Cancelling wakes the polling
//! thread immediately rather than waiting for the interval to elapse.

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
        mpsc::{self, RecvTimeoutError, Sender},
    },
    thread::{self, JoinHandle},
    time::Duration,
};

use crate::events::AppEvent;

pub(crate) struct ProgressTicker {
    cancel_tx: Option<Sender<()>>,
    in_flight: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl ProgressTicker {
    pub(crate) fn start(interval: Duration, event_tx: Sender<AppEvent>) -> Self {
        let (cancel_tx, cancel_rx) = mpsc::channel::<()>();
        let in_flight = Arc::new(AtomicBool::new(false));

        let tick_in_flight = Arc::clone(&in_flight);
        let handle = thread::spawn(move || {
            // Either a cancel message or the sender being dropped ends the loop.
            while let Err(RecvTimeoutError::Timeout) = cancel_rx.recv_timeout(interval) {
                if tick_in_flight.swap(true, Ordering::AcqRel) {
                    continue;
                }

                if event_tx.send(AppEvent::Progress).is_err() {
                    break;
                }
            }
        });

        Self {
            cancel_tx: Some(cancel_tx),
            in_flight,
            handle: Some(handle),
        }
    }

    /// Marks the last tick as processed, allowing the next one to be sent.
    pub(crate) fn ack(&self) {
        self.in_flight.store(false, Ordering::Release);
    }

    /// Stops the polling thread and waits for it to exit.
    pub(crate) fn cancel(&mut self) {
        if let Some(cancel_tx) = self.cancel_tx.take() {
            let _ = cancel_tx.send(());
        }

        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for ProgressTicker {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;

    fn count_progress(rx: &mpsc::Receiver<AppEvent>) -> usize {
        rx.try_iter()
            .filter(|event| matches!(event, AppEvent::Progress))
            .count()
    }

    #[test]
    fn only_one_tick_is_in_flight() {
        let (event_tx, event_rx) = mpsc::channel();
        let mut ticker = ProgressTicker::start(Duration::from_millis(5), event_tx);

        thread::sleep(Duration::from_millis(60));
        assert_eq!(count_progress(&event_rx), 1);

        ticker.ack();
        thread::sleep(Duration::from_millis(60));
        assert_eq!(count_progress(&event_rx), 1);

        ticker.cancel();
    }

    #[test]
    fn cancel_is_immediate_and_final() {
        let (event_tx, event_rx) = mpsc::channel();
        let mut ticker = ProgressTicker::start(Duration::from_secs(60), event_tx);

        let started = Instant::now();
        ticker.cancel();
        assert!(started.elapsed() < Duration::from_secs(5));

        ticker.ack();
        thread::sleep(Duration::from_millis(20));
        assert_eq!(count_progress(&event_rx), 0);
    }

    #[test]
    fn drop_stops_the_ticker() {
        let (event_tx, event_rx) = mpsc::channel();
        let ticker = ProgressTicker::start(Duration::from_millis(5), event_tx);

        drop(ticker);
        let _ = count_progress(&event_rx);

        // The thread has exited and the sender it held is gone.
        assert!(matches!(
            event_rx.recv_timeout(Duration::from_millis(50)),
            Err(mpsc::RecvTimeoutError::Disconnected)
        ));
    }
}
