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

//! Terminal lifecycle and styling utilities.
//!
//! This module puts the terminal into the state the TUI needs (raw mode,
//! alternate screen, themed background) and restores it afterwards.
//!
//! # Compatibility
//!
//! The background colour relies on OSC 11/111 escape sequences, which most
//! modern terminals (XTerm, iTerm2, Alacritty, Kitty) support. Terminals that
//! do not simply ignore them.

use std::io::{self, Stdout, Write};

use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

/// Prepares the terminal for the TUI application.
///
/// Sets the terminal background (when `background` is given) so that the
/// whole window matches the theme, enables raw mode and switches to the
/// alternate screen buffer.
///
/// # Errors
///
/// Returns an error if raw mode cannot be enabled or if the alternate screen
/// cannot be entered.
pub(crate) fn setup_terminal(background: Option<&str>) -> Result<Terminal<CrosstermBackend<Stdout>>> {
    if let Some(hex_color) = background {
        write_osc(&format!("\x1b]11;{}\x07", hex_color));
    }

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).context("Failed to create terminal")
}

/// Restores the terminal to its original state.
///
/// This is best-effort and does not return a result, as it runs during
/// cleanup whatever the outcome of the application.
pub(crate) fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) {
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    write_osc("\x1b]111\x07");
    terminal.show_cursor().ok();
}

fn write_osc(sequence: &str) {
    let mut stdout = io::stdout();
    let _ = stdout.write_all(sequence.as_bytes());
    let _ = stdout.flush();
}
