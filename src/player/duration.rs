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

//! Audio asset duration lookup.
//!
//! Durations are read from the file's audio properties using `Lofty`. The
//! lookup is best-effort: any failure yields `None` and the playlist is built
//! with unclamped clip ends.

use std::collections::HashMap;

use lofty::prelude::*;
use lofty::probe::Probe;
use log::{debug, warn};

pub(crate) trait DurationResolver {
    fn duration_ms(&mut self, audio_reference: &str) -> Option<u64>;
}

/// Resolves durations with `Lofty`, memoising the result for each reference.
#[derive(Default)]
pub(crate) struct LoftyDurationResolver {
    cache: HashMap<String, Option<u64>>,
}

impl LoftyDurationResolver {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn probe(audio_reference: &str) -> Option<u64> {
        let tagged_file = match Probe::open(audio_reference).and_then(|p| p.read()) {
            Ok(file) => file,
            Err(e) => {
                warn!("Unable to read duration of {}: {}", audio_reference, e);
                return None;
            }
        };

        let duration_ms = u64::try_from(tagged_file.properties().duration().as_millis()).ok()?;
        debug!("Duration of {} is {}ms", audio_reference, duration_ms);

        // A zero duration means the container did not say.
        (duration_ms > 0).then_some(duration_ms)
    }
}

impl DurationResolver for LoftyDurationResolver {
    fn duration_ms(&mut self, audio_reference: &str) -> Option<u64> {
        *self
            .cache
            .entry(audio_reference.to_string())
            .or_insert_with(|| Self::probe(audio_reference))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_has_unknown_duration() {
        let mut resolver = LoftyDurationResolver::new();

        assert_eq!(resolver.duration_ms("/nonexistent/vandana/tiratna.ogg"), None);
        // Cached, the second lookup does not probe again.
        assert_eq!(resolver.cache.len(), 1);
        assert_eq!(resolver.duration_ms("/nonexistent/vandana/tiratna.ogg"), None);
        assert_eq!(resolver.cache.len(), 1);
    }
}
