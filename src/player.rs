//! Playback state machine sitting between the app and the media backend.

mod controller;
mod format;
mod throttle;

pub use controller::{Diagnostic, NowPlaying, PlaybackController, PlayerStatus};
pub use format::format_time;
pub use throttle::ProgressThrottle;
