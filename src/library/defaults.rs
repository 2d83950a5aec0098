use std::collections::HashSet;
use std::path::Path;

use crate::config::LibrarySettings;

use super::model::{DEFAULT_ARTWORK, SourceRef, Track};
use super::scan::scan;

/// The built-in track set the playlist starts from: configured entries in
/// their declared order, then every audio file found under `dir` (or
/// `library.default_dir`). Later duplicates of an id are skipped.
pub fn default_tracks(settings: &LibrarySettings, dir: Option<&Path>) -> Vec<Track> {
    let mut tracks: Vec<Track> = settings
        .defaults
        .iter()
        .map(|d| Track {
            id: d.id.clone(),
            title: d.title.clone(),
            artist: d.artist.clone(),
            source: SourceRef::Durable(d.source.clone()),
            artwork: d
                .artwork
                .clone()
                .unwrap_or_else(|| DEFAULT_ARTWORK.to_string()),
            saved: false,
        })
        .collect();

    let dir = dir.or(settings.default_dir.as_deref());
    if let Some(dir) = dir {
        tracks.extend(scan(dir, settings));
    }

    let mut seen = HashSet::new();
    tracks.retain(|t| seen.insert(t.id.clone()));
    tracks
}
