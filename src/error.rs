//! Failure kinds reported by playlist, playback, ingestion and storage
//! operations.
//!
//! Operations return these instead of surfacing anything themselves; the
//! `App` decides whether a failure becomes a blocking notice, diagnostic
//! text in the now-playing panel, or only a log line.

use thiserror::Error;

use crate::library::Rejection;

pub type Result<T> = std::result::Result<T, PlayerError>;

#[derive(Debug, Error)]
pub enum PlayerError {
    /// A transport action was attempted with no tracks loaded.
    #[error("No songs in playlist. Please upload music files to get started.")]
    EmptyPlaylist,

    /// The track's source is missing, empty or was revoked.
    #[error("Invalid audio source for \"{title}\"")]
    InvalidSource { title: String },

    /// `play` was requested before any source was loaded.
    #[error("No song loaded")]
    NoSource,

    /// The backend could not start playback.
    #[error("Playback failed: {0}")]
    PlaybackFailed(String),

    /// The backend reported a runtime error mid-playback.
    #[error("Audio error: {0}")]
    Backend(String),

    #[error("{0}")]
    Upload(Rejection),

    #[error("Cannot remove the last track in the playlist")]
    LastTrack,

    #[error("No track at index {0}")]
    InvalidIndex(usize),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl PlayerError {
    /// Failures the user has to acknowledge before continuing.
    pub fn is_blocking(&self) -> bool {
        matches!(
            self,
            PlayerError::EmptyPlaylist | PlayerError::LastTrack | PlayerError::Upload(_)
        )
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("store data is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
