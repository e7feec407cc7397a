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

//! Application configuration.
//!
//! This module manages the application configuration file, and the log file
//! set up from it.

use std::{fs::OpenOptions, time::Duration};

use anyhow::{Context, Result};
use log::LevelFilter;
use serde::{Deserialize, Serialize};

const CONFIG_NAME: &str = "vandana";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub version: u32,
    /// Path of the chant catalog JSON document.
    pub catalog_file: String,
    /// Directory audio references are resolved against, defaults to the
    /// catalog's directory.
    pub audio_root: Option<String>,
    /// How often the highlighted verse line is recomputed while playing.
    pub progress_interval_ms: u64,
    pub start_looped: bool,
    pub log_file: Option<String>,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            catalog_file: "Resources/chants.json".to_string(),
            audio_root: None,
            progress_interval_ms: 60,
            start_looped: false,
            log_file: None,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn progress_interval(&self) -> Duration {
        Duration::from_millis(self.progress_interval_ms.max(1))
    }

    fn level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }
}

pub fn load_config() -> AppConfig {
    confy::load(CONFIG_NAME, None).unwrap_or_default()
}

pub fn save_config(cfg: &AppConfig) -> Result<(), confy::ConfyError> {
    confy::store(CONFIG_NAME, None, cfg)
}

/// Routes log output to the configured log file, the terminal belongs to the
/// user interface. Without a log file, logging stays disabled.
///
/// `RUST_LOG` overrides the configured level.
pub fn init_logging(cfg: &AppConfig) -> Result<()> {
    let Some(path) = &cfg.log_file else {
        return Ok(());
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path))?;

    env_logger::Builder::new()
        .filter_level(cfg.level_filter())
        .parse_default_env()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .context("Failed to initialise logging")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_falls_back_to_defaults() {
        let cfg: AppConfig = serde_json::from_str(r#"{ "catalog_file": "/srv/chants.json" }"#).unwrap();

        assert_eq!(cfg.catalog_file, "/srv/chants.json");
        assert_eq!(cfg.progress_interval_ms, 60);
        assert_eq!(cfg.level_filter(), LevelFilter::Info);
    }

    #[test]
    fn progress_interval_is_never_zero() {
        let cfg = AppConfig {
            progress_interval_ms: 0,
            ..AppConfig::default()
        };

        assert_eq!(cfg.progress_interval(), Duration::from_millis(1));
    }

    #[test]
    fn unknown_log_level_defaults_to_info() {
        let cfg = AppConfig {
            log_level: "chatty".to_string(),
            ..AppConfig::default()
        };

        assert_eq!(cfg.level_filter(), LevelFilter::Info);
    }
}
