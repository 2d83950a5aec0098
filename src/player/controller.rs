use std::path::Path;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::audio::{MediaBackend, MediaEvent};
use crate::config::PlaybackSettings;
use crate::error::{PlayerError, Result};
use crate::library::Track;

use super::throttle::ProgressThrottle;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PlayerStatus {
    /// Nothing loaded yet.
    Idle,
    /// A source was handed to the backend; waiting for its metadata.
    Loading,
    Playing,
    Paused,
    /// The loaded source failed. Controls behave as when paused.
    Error,
}

/// Two lines shown in place of the track info when something went wrong.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub headline: &'static str,
    pub detail: &'static str,
}

impl Diagnostic {
    pub const INVALID_SOURCE: Self = Self {
        headline: "Error loading track",
        detail: "Please try another file or upload new music",
    };
    pub const PLAY_FAILED: Self = Self {
        headline: "Error playing audio",
        detail: "File may be corrupted or unsupported",
    };
    pub const BACKEND_ERROR: Self = Self {
        headline: "Error playing audio",
        detail: "File may be corrupted or try uploading new music",
    };
    pub const NO_SOURCE: Self = Self {
        headline: "Please select a song",
        detail: "No song loaded",
    };
}

/// Track info shown in the now-playing panel, fallbacks already applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NowPlaying {
    pub title: String,
    pub artist: String,
    pub artwork: String,
}

impl NowPlaying {
    fn from_track(track: &Track) -> Self {
        Self {
            title: track.display_title().to_string(),
            artist: track.display_artist().to_string(),
            artwork: track.display_artwork().to_string(),
        }
    }
}

/// Owns the backend and everything the view needs to know about playback.
///
/// `Playing` is only entered when the backend confirms a `play` request with
/// `PlayStarted`; until then the request is pending.
#[derive(Debug)]
pub struct PlaybackController<B> {
    backend: B,
    status: PlayerStatus,
    has_source: bool,
    play_pending: bool,
    seeking: bool,
    repeat_all: bool,
    volume: u8,
    now_playing: Option<NowPlaying>,
    diagnostic: Option<Diagnostic>,
    position: f64,
    duration: Option<f64>,
    throttle: ProgressThrottle,
    resume_delay: Duration,
    resume_at: Option<Instant>,
    /// Sources handed to the backend whose `LoadStarted` has not arrived.
    /// Events queued before it belong to a replaced source.
    pending_loads: u32,
}

impl<B: MediaBackend> PlaybackController<B> {
    pub fn new(mut backend: B, settings: &PlaybackSettings) -> Self {
        let volume = settings.volume.clamp(0, 100) as u8;
        backend.set_volume(f32::from(volume) / 100.0);
        Self {
            backend,
            status: PlayerStatus::Idle,
            has_source: false,
            play_pending: false,
            seeking: false,
            repeat_all: settings.repeat_all,
            volume,
            now_playing: None,
            diagnostic: None,
            position: 0.0,
            duration: None,
            throttle: ProgressThrottle::new(Duration::from_millis(settings.progress_throttle_ms)),
            resume_delay: Duration::from_millis(settings.resume_delay_ms),
            resume_at: None,
            pending_loads: 0,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn status(&self) -> PlayerStatus {
        self.status
    }

    pub fn is_playing(&self) -> bool {
        self.status == PlayerStatus::Playing
    }

    /// Playing, or about to be: a play request is pending or a resume is
    /// scheduled.
    pub fn is_active(&self) -> bool {
        self.is_playing() || self.play_pending || self.resume_at.is_some()
    }

    pub fn has_source(&self) -> bool {
        self.has_source
    }

    pub fn is_seeking(&self) -> bool {
        self.seeking
    }

    pub fn repeat_all(&self) -> bool {
        self.repeat_all
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    pub fn now_playing(&self) -> Option<&NowPlaying> {
        self.now_playing.as_ref()
    }

    pub fn diagnostic(&self) -> Option<Diagnostic> {
        self.diagnostic
    }

    /// Displayed position in seconds.
    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn duration(&self) -> Option<f64> {
        self.duration
    }

    /// Displayed position as a fraction of the duration, 0.0 when unknown.
    pub fn progress(&self) -> f64 {
        match self.duration {
            Some(d) if d > 0.0 => (self.position / d).clamp(0.0, 1.0),
            _ => 0.0,
        }
    }

    pub fn resume_scheduled(&self) -> bool {
        self.resume_at.is_some()
    }

    /// Stop the current track and hand `path` to the backend, paused.
    ///
    /// `path` is the resolved source of `track`; `None` means it has none
    /// (empty, or a revoked upload) and the controller enters `Error`.
    pub fn load_track(&mut self, track: &Track, path: Option<&Path>) -> Result<()> {
        self.pause();
        self.position = 0.0;
        self.duration = None;
        self.seeking = false;

        let Some(path) = path else {
            warn!(id = %track.id, "track has no playable source");
            self.has_source = false;
            self.status = PlayerStatus::Error;
            self.now_playing = None;
            self.diagnostic = Some(Diagnostic::INVALID_SOURCE);
            return Err(PlayerError::InvalidSource {
                title: track.display_title().to_string(),
            });
        };

        debug!(id = %track.id, path = %path.display(), "loading track");
        self.backend.set_source(path);
        self.pending_loads = self.pending_loads.saturating_add(1);
        self.has_source = true;
        self.status = PlayerStatus::Loading;
        self.now_playing = Some(NowPlaying::from_track(track));
        self.diagnostic = None;
        Ok(())
    }

    /// Ask the backend to start. The outcome arrives as an event.
    pub fn play(&mut self) -> Result<()> {
        if !self.has_source {
            self.diagnostic = Some(Diagnostic::NO_SOURCE);
            return Err(PlayerError::NoSource);
        }
        self.backend.play();
        self.play_pending = true;
        Ok(())
    }

    pub fn pause(&mut self) {
        self.backend.pause();
        if self.status == PlayerStatus::Playing {
            self.status = PlayerStatus::Paused;
        }
        self.play_pending = false;
        self.resume_at = None;
    }

    pub fn toggle_play(&mut self) -> Result<()> {
        if self.is_active() {
            self.pause();
            Ok(())
        } else {
            self.play()
        }
    }

    /// Apply one backend event. Returns `Ok(true)` when the loaded track
    /// played to its end; failures are returned after the diagnostic is set.
    ///
    /// Events from a source that was replaced by `load_track` are dropped up
    /// to the new source's `LoadStarted`.
    pub fn on_event(&mut self, event: MediaEvent) -> Result<bool> {
        if self.pending_loads > 0 {
            if event == MediaEvent::LoadStarted {
                self.pending_loads -= 1;
            }
            if self.pending_loads > 0 || event != MediaEvent::LoadStarted {
                debug!(?event, "dropping event from a replaced source");
                return Ok(false);
            }
        }

        match event {
            MediaEvent::LoadStarted => {
                self.position = 0.0;
                self.duration = None;
                if self.has_source {
                    self.status = PlayerStatus::Loading;
                }
            }
            MediaEvent::MetadataReady { duration } => {
                self.duration = duration
                    .or_else(|| self.backend.duration())
                    .filter(|d| d.is_finite() && *d > 0.0);
                if self.status == PlayerStatus::Loading {
                    self.status = PlayerStatus::Paused;
                }
            }
            MediaEvent::TimeAdvanced { position } => {
                if !self.seeking && position.is_finite() && self.throttle.admit() {
                    self.position = position.max(0.0);
                }
            }
            MediaEvent::Ended => {
                self.play_pending = false;
                self.status = PlayerStatus::Paused;
                if let Some(d) = self.duration {
                    self.position = d;
                }
                return Ok(true);
            }
            MediaEvent::Errored(msg) => {
                warn!("audio backend error: {msg}");
                self.status = PlayerStatus::Error;
                self.play_pending = false;
                self.resume_at = None;
                self.diagnostic = Some(Diagnostic::BACKEND_ERROR);
                return Err(PlayerError::Backend(msg));
            }
            MediaEvent::PlayStarted => {
                if self.play_pending {
                    self.play_pending = false;
                    self.status = PlayerStatus::Playing;
                    self.diagnostic = None;
                } else {
                    // Paused again before the backend answered.
                    debug!("ignoring late play confirmation");
                    self.backend.pause();
                }
            }
            MediaEvent::PlayFailed(msg) => {
                warn!("playback failed: {msg}");
                self.play_pending = false;
                if self.status != PlayerStatus::Error {
                    self.status = PlayerStatus::Paused;
                }
                self.diagnostic = Some(Diagnostic::PLAY_FAILED);
                return Err(PlayerError::PlaybackFailed(msg));
            }
        }
        Ok(false)
    }

    /// Drain the backend's event queue.
    pub fn take_events(&mut self) -> Vec<MediaEvent> {
        self.backend.poll_events()
    }

    /// Seek to `fraction` of the track. Ignored while the duration is unknown.
    pub fn seek_to_fraction(&mut self, fraction: f64) {
        if let Some(d) = self.duration {
            self.seek_to_time(fraction.clamp(0.0, 1.0) * d);
        }
    }

    /// Seek to `secs`, clamped to the track. Ignored while the duration is
    /// unknown.
    pub fn seek_to_time(&mut self, secs: f64) {
        let Some(d) = self.duration else {
            return;
        };
        if secs.is_nan() {
            return;
        }
        let t = secs.clamp(0.0, d);
        self.backend.set_current_time(t);
        self.position = t;
    }

    /// Scrub relative to where the backend actually is, not the throttled
    /// display.
    pub fn seek_by(&mut self, delta_secs: i64) {
        let base = self.backend.current_time();
        self.seek_to_time(base + delta_secs as f64);
    }

    pub fn start_drag(&mut self, fraction: f64) {
        self.seeking = true;
        self.seek_to_fraction(fraction);
    }

    /// Every drag update is committed to the backend, unthrottled.
    pub fn drag_update(&mut self, fraction: f64) {
        if self.seeking {
            self.seek_to_fraction(fraction);
        }
    }

    pub fn stop_drag(&mut self) {
        self.seeking = false;
    }

    pub fn set_volume(&mut self, volume: i32) {
        self.volume = volume.clamp(0, 100) as u8;
        self.backend.set_volume(f32::from(self.volume) / 100.0);
    }

    pub fn adjust_volume(&mut self, delta: i32) {
        self.set_volume(i32::from(self.volume) + delta);
    }

    pub fn toggle_repeat(&mut self) -> bool {
        self.repeat_all = !self.repeat_all;
        self.repeat_all
    }

    /// Arm the one-shot resume that follows a track change.
    pub fn schedule_resume(&mut self, now: Instant) {
        self.resume_at = Some(now + self.resume_delay);
    }

    /// Fire the scheduled resume once it is due.
    pub fn tick(&mut self, now: Instant) -> Result<()> {
        match self.resume_at {
            Some(at) if now >= at => {
                self.resume_at = None;
                self.play()
            }
            _ => Ok(()),
        }
    }
}
