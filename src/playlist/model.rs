//! `PlaylistState`: the ordered track list and the current index.

use std::path::PathBuf;

use tracing::debug;

use crate::error::{PlayerError, Result};
use crate::library::{SessionHandles, SourceRef, Track};

/// What follows the current track.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Advance {
    To(usize),
    /// The current track is the last one and repeat is off.
    Stop,
}

/// Result of a successful removal.
#[derive(Debug, Clone, PartialEq)]
pub struct Removed {
    pub track: Track,
    /// True when the removed track was the current one, so the new current
    /// track has to be loaded.
    pub was_current: bool,
}

#[derive(Debug, Default)]
pub struct PlaylistState {
    tracks: Vec<Track>,
    current: usize,
    revision: u64,
    handles: SessionHandles,
}

impl PlaylistState {
    pub fn new(tracks: Vec<Track>) -> Self {
        Self {
            tracks,
            ..Self::default()
        }
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Current index; meaningless while the playlist is empty.
    pub fn current(&self) -> usize {
        self.current
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.tracks.get(self.current)
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.tracks.iter().any(|t| t.id == id)
    }

    /// Bumped on every mutation; unchanged revisions are not saved again.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn handles(&self) -> &SessionHandles {
        &self.handles
    }

    pub fn handles_mut(&mut self) -> &mut SessionHandles {
        &mut self.handles
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    /// Append `track` and return its index. When this is the first track the
    /// caller is expected to load index 0.
    pub fn add_track(&mut self, track: Track) -> usize {
        self.tracks.push(track);
        self.touch();
        self.tracks.len() - 1
    }

    pub fn remove_track(&mut self, index: usize) -> Result<Removed> {
        if self.tracks.len() <= 1 {
            return Err(PlayerError::LastTrack);
        }
        if index >= self.tracks.len() {
            return Err(PlayerError::InvalidIndex(index));
        }

        let track = self.tracks.remove(index);
        if let SourceRef::Transient(handle) = &track.source {
            self.handles.revoke(handle);
        }

        let was_current = index == self.current;
        if was_current {
            if self.current >= self.tracks.len() {
                self.current = self.tracks.len() - 1;
            }
        } else if index < self.current {
            self.current -= 1;
        }

        debug!(id = %track.id, index, current = self.current, "removed track");
        self.touch();
        Ok(Removed { track, was_current })
    }

    /// Flip the saved flag. Returns false when `index` is out of range.
    pub fn toggle_saved(&mut self, index: usize) -> bool {
        let Some(track) = self.tracks.get_mut(index) else {
            return false;
        };
        track.saved = !track.saved;
        self.touch();
        true
    }

    pub fn select(&mut self, index: usize) -> Result<()> {
        if index >= self.tracks.len() {
            return Err(PlayerError::InvalidIndex(index));
        }
        self.current = index;
        self.touch();
        Ok(())
    }

    pub fn next_index(&self, repeat_all: bool) -> Advance {
        let len = self.tracks.len();
        if len == 0 {
            return Advance::Stop;
        }
        if repeat_all {
            Advance::To((self.current + 1) % len)
        } else if self.current + 1 < len {
            Advance::To(self.current + 1)
        } else {
            Advance::Stop
        }
    }

    /// Always wraps, whatever the repeat mode.
    pub fn previous_index(&self) -> Option<usize> {
        let len = self.tracks.len();
        if len == 0 {
            return None;
        }
        Some((self.current + len - 1) % len)
    }

    /// Where the audio for `source` lives, if it can still be played.
    pub fn resolve_source(&self, source: &SourceRef) -> Option<PathBuf> {
        match source {
            SourceRef::Durable(s) if !s.trim().is_empty() => {
                let s = s.trim();
                Some(PathBuf::from(s.strip_prefix("file://").unwrap_or(s)))
            }
            SourceRef::Durable(_) => None,
            SourceRef::Transient(handle) => self.handles.resolve(handle).map(|p| p.to_path_buf()),
        }
    }
}
