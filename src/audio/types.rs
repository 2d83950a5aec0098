//! Audio-related small types and handles.
//!
//! This module defines the commands sent to the audio thread, the events it
//! reports back, and the shared playback snapshot.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug)]
pub enum AudioCmd {
    /// Stop whatever is loaded and open this file, paused at the start.
    SetSource(PathBuf),
    /// Start or resume the loaded source.
    Play,
    /// Pause the loaded source.
    Pause,
    /// Jump to an absolute position in the loaded source.
    Seek(Duration),
    /// Output volume, 0.0 to 1.0.
    SetVolume(f32),
    /// Stop playback and end the audio thread.
    Quit,
}

/// What the backend reports back, drained by the main loop.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    /// A new source started loading.
    LoadStarted,
    /// The source is ready; `duration` is `None` when it cannot be known.
    MetadataReady { duration: Option<f64> },
    /// Playback position moved, in seconds.
    TimeAdvanced { position: f64 },
    /// The source played to its end.
    Ended,
    /// The source could not be opened or decoded, or the device failed.
    Errored(String),
    /// Outcome of a `play` request: playback started.
    PlayStarted,
    /// Outcome of a `play` request: playback could not start.
    PlayFailed(String),
}

/// Runtime playback information shared with the main thread.
#[derive(Debug, Clone, Default)]
pub struct PlaybackInfo {
    /// Position in the loaded source.
    pub position: Duration,
    /// Length of the loaded source, once known.
    pub duration: Option<Duration>,
    /// Whether the sink is currently producing sound.
    pub playing: bool,
}

pub type PlaybackHandle = Arc<Mutex<PlaybackInfo>>;
