//! The media backend contract and its `rodio` implementation.
//!
//! The backend plays one source at a time. Every call returns immediately;
//! outcomes (metadata, position, end of track, failures, and whether a
//! `play` request actually started) arrive later through `poll_events`.

use std::path::Path;

mod player;
mod sink;
mod thread;
mod types;

pub use player::RodioBackend;
pub use types::MediaEvent;

pub trait MediaBackend {
    /// Replace the loaded source. Prior playback stops.
    fn set_source(&mut self, path: &Path);
    /// Request playback; answered by `PlayStarted` or `PlayFailed`.
    fn play(&mut self);
    fn pause(&mut self);
    /// Position in seconds.
    fn current_time(&self) -> f64;
    fn set_current_time(&mut self, secs: f64);
    /// Length in seconds, `None` until metadata is known.
    fn duration(&self) -> Option<f64>;
    /// 0.0 to 1.0.
    fn set_volume(&mut self, volume: f32);
    /// Events reported since the last call, oldest first.
    fn poll_events(&mut self) -> Vec<MediaEvent>;
}

#[cfg(test)]
mod tests;
