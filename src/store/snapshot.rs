//! Playlist snapshot: what is written to the store and how it is merged
//! back with the default track set at startup.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::StoreError;
use crate::library::{SourceRef, Track};
use crate::playlist::PlaylistState;

use super::backend::PersistentStore;

pub const TRACKS_KEY: &str = "playlist.tracks";
pub const CURRENT_INDEX_KEY: &str = "playlist.current_index";

/// One persisted playlist entry. Transient sources are stored as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedTrack {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub artwork: String,
    #[serde(default)]
    pub saved: bool,
    pub source: Option<String>,
}

impl From<&Track> for PersistedTrack {
    fn from(track: &Track) -> Self {
        Self {
            id: track.id.clone(),
            title: track.title.clone(),
            artist: track.artist.clone(),
            artwork: track.artwork.clone(),
            saved: track.saved,
            source: track.source.durable().map(str::to_string),
        }
    }
}

impl PersistedTrack {
    /// The restorable track, or `None` when its source did not survive.
    fn into_track(self) -> Option<Track> {
        let source = self.source?;
        Some(Track {
            id: self.id,
            title: self.title,
            artist: self.artist,
            source: SourceRef::Durable(source),
            artwork: self.artwork,
            saved: self.saved,
        })
    }
}

/// Write the track list and current index.
pub fn save_playlist(
    store: &mut dyn PersistentStore,
    playlist: &PlaylistState,
) -> Result<(), StoreError> {
    let entries: Vec<PersistedTrack> = playlist.tracks().iter().map(PersistedTrack::from).collect();
    store.set(TRACKS_KEY, serde_json::to_string(&entries)?)?;
    store.set(CURRENT_INDEX_KEY, playlist.current().to_string())?;
    debug!(tracks = entries.len(), current = playlist.current(), "saved playlist");
    Ok(())
}

/// Build the startup playlist: `defaults` first, then every persisted entry
/// with a durable source whose id is not already present. The stored index
/// is adopted when it is in range, otherwise the first track is current.
///
/// Store failures are logged and the defaults are used as they are.
pub fn restore_playlist(store: &dyn PersistentStore, defaults: Vec<Track>) -> PlaylistState {
    let mut playlist = PlaylistState::new(defaults);

    match read_persisted(store) {
        Ok(entries) => {
            let mut dropped = 0usize;
            for entry in entries {
                if playlist.contains_id(&entry.id) {
                    continue;
                }
                match entry.into_track() {
                    Some(track) => {
                        playlist.add_track(track);
                    }
                    None => dropped += 1,
                }
            }
            if dropped > 0 {
                info!(dropped, "skipped persisted tracks with session-only sources");
            }
        }
        Err(e) => warn!("could not load saved playlist: {e}"),
    }

    let index = match store.get(CURRENT_INDEX_KEY) {
        Ok(value) => value.and_then(|v| v.trim().parse::<usize>().ok()),
        Err(e) => {
            warn!("could not load saved playlist index: {e}");
            None
        }
    };
    if let Some(i) = index {
        if let Err(e) = playlist.select(i) {
            warn!("ignoring saved playlist index: {e}");
        }
    }

    playlist
}

fn read_persisted(store: &dyn PersistentStore) -> Result<Vec<PersistedTrack>, StoreError> {
    match store.get(TRACKS_KEY)? {
        Some(body) => Ok(serde_json::from_str(&body)?),
        None => Ok(Vec::new()),
    }
}
