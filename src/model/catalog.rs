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

//! Chant catalog loading.
//!
//! The catalog is a JSON document listing every chant, the audio file it is
//! recorded in, and the timed verses it is divided into:
//!
//! ```json
//! { "chants": [ { "id": "tiratna", "title": "Tiratana Vandana",
//!     "audio_file": "res://Resources/Audio/tiratna.ogg",
//!     "verses": [ { "id": 0, "title": "Buddha", "start_time": 0.0,
//!                   "end_time": 21.5, "text": "Iti pi so..." } ] } ] }
//! ```
//!
//! The catalog is materialised once into immutable [`Chant`] values.

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{info, warn};
use serde::Deserialize;
use thiserror::Error;

use crate::model::{Chant, Verse};

const RESOURCE_PREFIX: &str = "res://";

#[derive(Error, Debug)]
pub(crate) enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Catalog contains no chants")]
    Empty,
}

#[derive(Deserialize)]
struct CatalogDocument {
    chants: Vec<ChantRecord>,
}

#[derive(Deserialize)]
struct ChantRecord {
    id: String,
    title: String,
    audio_file: String,
    #[serde(default)]
    verses: Vec<VerseRecord>,
}

#[derive(Deserialize)]
struct VerseRecord {
    #[serde(default)]
    title: Option<String>,
    start_time: f64,
    end_time: f64,
    #[serde(default)]
    text: String,
}

/// Reads and parses the catalog file.
///
/// Audio references are resolved against `audio_root`, or against the
/// directory containing the catalog when no root is given.
pub(crate) fn load_catalog(path: &Path, audio_root: Option<&Path>) -> Result<Vec<Chant>, CatalogError> {
    let json = fs::read_to_string(path).map_err(|source| CatalogError::Read {
        path: path.display().to_string(),
        source,
    })?;

    let root = audio_root
        .map(Path::to_path_buf)
        .or_else(|| path.parent().map(Path::to_path_buf))
        .unwrap_or_default();

    let chants = parse_catalog(&json, &root)?;
    info!("Loaded {} chants from {}", chants.len(), path.display());

    Ok(chants)
}

/// Parses a catalog document, the verse index of each verse is its position
/// in the chant.
pub(crate) fn parse_catalog(json: &str, audio_root: &Path) -> Result<Vec<Chant>, CatalogError> {
    let document: CatalogDocument = serde_json::from_str(json)?;

    if document.chants.is_empty() {
        return Err(CatalogError::Empty);
    }

    let chants = document
        .chants
        .into_iter()
        .map(|record| {
            let verses = record
                .verses
                .into_iter()
                .enumerate()
                .map(|(index, verse)| {
                    if verse.end_time <= verse.start_time {
                        warn!(
                            "Chant '{}' verse {} has degenerate timing {}..{}",
                            record.id, index, verse.start_time, verse.end_time
                        );
                    }

                    Verse {
                        index,
                        title: verse
                            .title
                            .filter(|t| !t.trim().is_empty())
                            .unwrap_or_else(|| Verse::default_title(index)),
                        start_time: verse.start_time,
                        end_time: verse.end_time,
                        text: verse.text,
                    }
                })
                .collect();

            Chant {
                audio_reference: resolve_audio_reference(audio_root, &record.audio_file),
                id: record.id,
                title: record.title,
                verses,
            }
        })
        .collect();

    Ok(chants)
}

/// Turns a catalog audio reference into a path the playback engine can open.
///
/// URLs with a scheme other than `res://` are passed through untouched. Local
/// `.ogg` files are replaced by an `.aac` encoding of the same recording when
/// one sits beside them.
pub(crate) fn resolve_audio_reference(audio_root: &Path, reference: &str) -> String {
    let path = match reference.strip_prefix(RESOURCE_PREFIX) {
        Some(relative) => audio_root.join(relative),
        None if reference.contains("://") => return reference.to_string(),
        None => audio_root.join(reference),
    };

    prefer_aac(path).to_string_lossy().into_owned()
}

fn prefer_aac(path: PathBuf) -> PathBuf {
    if path.extension().is_some_and(|ext| ext == "ogg") {
        let candidate = path.with_extension("aac");
        if candidate.is_file() {
            info!("Using {} in place of {}", candidate.display(), path.display());
            return candidate;
        }
    }

    path
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"{
        "chants": [
            {
                "id": "tiratna",
                "title": "Tiratana Vandana",
                "audio_file": "res://Resources/Audio/tiratna.ogg",
                "verses": [
                    { "id": 0, "title": "Buddha", "start_time": 0.0, "end_time": 2.5, "text": "one\ntwo" },
                    { "id": 1, "start_time": 2.5, "end_time": 5.0, "text": "three" },
                    { "id": 2, "title": "  ", "start_time": 6.0, "end_time": 6.0, "text": "" }
                ]
            }
        ]
    }"#;

    #[test]
    fn parses_verses_with_positional_indices() {
        let chants = parse_catalog(CATALOG, Path::new("/data")).unwrap();

        assert_eq!(chants.len(), 1);
        let chant = &chants[0];
        assert_eq!(chant.id, "tiratna");
        assert_eq!(chant.verse_count(), 3);
        for (position, verse) in chant.verses.iter().enumerate() {
            assert_eq!(verse.index, position);
        }
        assert_eq!(chant.verses[0].lines(), vec!["one", "two"]);
    }

    #[test]
    fn missing_or_blank_titles_default_to_verse_number() {
        let chants = parse_catalog(CATALOG, Path::new("/data")).unwrap();

        assert_eq!(chants[0].verses[0].title, "Buddha");
        assert_eq!(chants[0].verses[1].title, "Verse 2");
        assert_eq!(chants[0].verses[2].title, "Verse 3");
    }

    #[test]
    fn degenerate_timings_are_kept() {
        let chants = parse_catalog(CATALOG, Path::new("/data")).unwrap();

        let verse = &chants[0].verses[2];
        assert_eq!(verse.start_time, 6.0);
        assert_eq!(verse.end_time, 6.0);
    }

    #[test]
    fn resource_references_resolve_against_the_audio_root() {
        let chants = parse_catalog(CATALOG, Path::new("/data")).unwrap();

        assert_eq!(
            chants[0].audio_reference,
            Path::new("/data").join("Resources/Audio/tiratna.ogg").to_string_lossy()
        );
        assert_eq!(
            resolve_audio_reference(Path::new("/data"), "https://example.org/a.ogg"),
            "https://example.org/a.ogg"
        );
    }

    #[test]
    fn aac_beside_an_ogg_reference_is_preferred() {
        let dir = std::env::temp_dir().join(format!("vandana-catalog-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("tiratna.ogg"), b"").unwrap();
        fs::write(dir.join("tiratna.aac"), b"").unwrap();
        fs::write(dir.join("metta.ogg"), b"").unwrap();

        assert_eq!(
            resolve_audio_reference(&dir, "res://tiratna.ogg"),
            dir.join("tiratna.aac").to_string_lossy()
        );
        assert_eq!(
            resolve_audio_reference(&dir, "metta.ogg"),
            dir.join("metta.ogg").to_string_lossy()
        );

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn empty_catalog_is_rejected() {
        let result = parse_catalog(r#"{ "chants": [] }"#, Path::new("/"));

        assert!(matches!(result, Err(CatalogError::Empty)));
    }

    #[test]
    fn malformed_catalog_is_a_parse_error() {
        let result = parse_catalog(r#"{ "chants": [ { "id": 1 } ] }"#, Path::new("/"));

        assert!(matches!(result, Err(CatalogError::Parse(_))));
    }

    #[test]
    fn unreadable_file_is_a_read_error() {
        let result = load_catalog(Path::new("/nonexistent/vandana/chants.json"), None);

        assert!(matches!(result, Err(CatalogError::Read { .. })));
    }
}
