//! Application model: `App` owns the playlist, the playback controller and
//! the store, and turns `Command`s and backend events into state changes.

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::audio::{MediaBackend, MediaEvent};
use crate::config::ControlsSettings;
use crate::error::PlayerError;
use crate::library::{self, Track};
use crate::player::PlaybackController;
use crate::playlist::{Advance, PlaylistState};
use crate::store::{PersistentStore, save_playlist};

use super::command::{Command, InputMode};

/// A message the user has to dismiss, one line per problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub lines: Vec<String>,
}

impl Notice {
    fn from_error(err: &PlayerError) -> Self {
        Self {
            lines: vec![err.to_string()],
        }
    }
}

pub struct App<B> {
    playlist: PlaylistState,
    player: PlaybackController<B>,
    store: Box<dyn PersistentStore>,
    controls: ControlsSettings,

    notice: Option<Notice>,
    prompt: Option<String>,
    confirm_remove: Option<usize>,
    cursor: usize,
    quit: bool,
    /// Playlist revision last written to the store.
    saved_revision: Option<u64>,
}

impl<B: MediaBackend> App<B> {
    /// Build the app and load the current track, paused.
    pub fn new(
        playlist: PlaylistState,
        player: PlaybackController<B>,
        store: Box<dyn PersistentStore>,
        controls: ControlsSettings,
    ) -> Self {
        let cursor = playlist.current();
        let mut app = Self {
            playlist,
            player,
            store,
            controls,
            notice: None,
            prompt: None,
            confirm_remove: None,
            cursor,
            quit: false,
            saved_revision: None,
        };
        app.load_current();
        app
    }

    pub fn playlist(&self) -> &PlaylistState {
        &self.playlist
    }

    pub fn player(&self) -> &PlaybackController<B> {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut PlaybackController<B> {
        &mut self.player
    }

    pub fn controls(&self) -> &ControlsSettings {
        &self.controls
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn prompt(&self) -> Option<&str> {
        self.prompt.as_deref()
    }

    pub fn confirm_remove(&self) -> Option<usize> {
        self.confirm_remove
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Notices take the keyboard first, then a pending confirmation, then
    /// the prompt.
    pub fn input_mode(&self) -> InputMode<'_> {
        if self.notice.is_some() {
            InputMode::Notice
        } else if let Some(i) = self.confirm_remove {
            InputMode::Confirm(i)
        } else if let Some(p) = self.prompt.as_deref() {
            InputMode::Prompt(p)
        } else {
            InputMode::Normal
        }
    }

    pub fn dispatch(&mut self, cmd: Command, now: Instant) {
        debug!(?cmd, "dispatch");
        match cmd {
            Command::TogglePlay => {
                if self.require_tracks() {
                    let result = self.player.toggle_play();
                    self.absorb(result);
                }
            }
            Command::Previous => {
                if self.require_tracks() {
                    let was_active = self.player.is_active();
                    if let Some(i) = self.playlist.previous_index() {
                        self.go_to(i, was_active, now);
                    }
                }
            }
            Command::Next => {
                if self.require_tracks() {
                    let was_active = self.player.is_active();
                    self.advance(was_active, now);
                }
            }
            Command::ToggleRepeat => {
                let on = self.player.toggle_repeat();
                info!(repeat_all = on, "repeat toggled");
            }
            Command::SeekPress(f) => self.player.start_drag(f),
            Command::SeekMove(f) => self.player.drag_update(f),
            Command::SeekRelease => self.player.stop_drag(),
            Command::SeekBy(secs) => self.player.seek_by(secs),
            Command::SetVolume(v) => self.player.set_volume(v),
            Command::VolumeBy(d) => self.player.adjust_volume(d),
            Command::Upload(input) => {
                self.prompt = None;
                self.upload(&input);
            }
            Command::Select(i) => match self.playlist.select(i) {
                Ok(()) => {
                    self.cursor = i;
                    self.persist();
                    self.load_current();
                }
                Err(e) => self.surface(e),
            },
            Command::ToggleSaved(i) => {
                if self.playlist.toggle_saved(i) {
                    self.persist();
                }
            }
            Command::RequestRemove(i) => {
                if self.playlist.len() <= 1 {
                    self.surface(PlayerError::LastTrack);
                } else if i < self.playlist.len() {
                    self.confirm_remove = Some(i);
                }
            }
            Command::Remove(i) => {
                self.confirm_remove = None;
                self.remove(i);
            }
            Command::CancelRemove => self.confirm_remove = None,
            Command::CursorUp => self.cursor = self.cursor.saturating_sub(1),
            Command::CursorDown => {
                if self.cursor + 1 < self.playlist.len() {
                    self.cursor += 1;
                }
            }
            Command::OpenPrompt => self.prompt = Some(String::new()),
            Command::PromptInput(c) => {
                if let Some(p) = self.prompt.as_mut() {
                    p.push(c);
                }
            }
            Command::PromptBackspace => {
                if let Some(p) = self.prompt.as_mut() {
                    p.pop();
                }
            }
            Command::CancelPrompt => self.prompt = None,
            Command::DismissNotice => self.notice = None,
            Command::Quit => self.quit = true,
        }
    }

    /// Apply every pending backend event, then fire a due resume.
    pub fn pump(&mut self, now: Instant) {
        for event in self.player.take_events() {
            self.handle_media_event(event, now);
        }
        let result = self.player.tick(now);
        self.absorb(result);
    }

    pub fn handle_media_event(&mut self, event: MediaEvent, now: Instant) {
        // A finished track was playing, whatever the controller says after.
        let was_active = self.player.is_active();
        match self.player.on_event(event) {
            Ok(true) => self.advance(was_active, now),
            Ok(false) => {}
            Err(e) => self.surface(e),
        }
    }

    fn require_tracks(&mut self) -> bool {
        if self.playlist.is_empty() {
            self.surface(PlayerError::EmptyPlaylist);
            false
        } else {
            true
        }
    }

    fn advance(&mut self, was_active: bool, now: Instant) {
        match self.playlist.next_index(self.player.repeat_all()) {
            Advance::To(i) => self.go_to(i, was_active, now),
            Advance::Stop => self.player.pause(),
        }
    }

    /// Make `index` current and load it; resume shortly after when playback
    /// was active. The index moves even if the track turns out unplayable.
    fn go_to(&mut self, index: usize, resume: bool, now: Instant) {
        if let Err(e) = self.playlist.select(index) {
            self.surface(e);
            return;
        }
        self.cursor = index;
        self.persist();
        self.load_current();
        if resume && self.player.has_source() {
            self.player.schedule_resume(now);
        }
    }

    fn load_current(&mut self) {
        let Some(track) = self.playlist.current_track() else {
            return;
        };
        let path = self.playlist.resolve_source(&track.source);
        if let Err(e) = self.player.load_track(track, path.as_deref()) {
            self.surface(e);
        }
    }

    fn remove(&mut self, index: usize) {
        match self.playlist.remove_track(index) {
            Ok(removed) => {
                info!(
                    id = %removed.track.id,
                    upload = removed.track.source.is_transient(),
                    "removed track"
                );
                self.cursor = self.cursor.min(self.playlist.len().saturating_sub(1));
                if removed.was_current {
                    self.load_current();
                }
                self.persist();
            }
            Err(e) => self.surface(e),
        }
    }

    fn upload(&mut self, input: &str) {
        let candidates = library::candidates_from_input(input);
        if candidates.is_empty() {
            info!(input, "nothing to add");
            return;
        }

        let report = library::ingest(&mut self.playlist, candidates);
        if !report.rejected.is_empty() {
            let lines = report
                .rejected
                .into_iter()
                .map(|r| PlayerError::Upload(r).to_string())
                .collect();
            self.notice = Some(Notice { lines });
        }
        if let Some(i) = report.load_first {
            if self.playlist.select(i).is_ok() {
                self.cursor = i;
                self.load_current();
            }
        }
        self.persist();
    }

    fn persist(&mut self) {
        let revision = self.playlist.revision();
        if self.saved_revision == Some(revision) {
            return;
        }
        match save_playlist(self.store.as_mut(), &self.playlist) {
            Ok(()) => self.saved_revision = Some(revision),
            Err(e) => self.surface(e.into()),
        }
    }

    fn absorb(&mut self, result: crate::error::Result<()>) {
        if let Err(e) = result {
            self.surface(e);
        }
    }

    /// Decide where a failure shows up: blocking notice, the diagnostic
    /// already set by the controller, or the log.
    fn surface(&mut self, err: PlayerError) {
        match &err {
            e if e.is_blocking() => {
                info!("notice: {e}");
                self.notice = Some(Notice::from_error(e));
            }
            PlayerError::InvalidSource { .. }
            | PlayerError::NoSource
            | PlayerError::PlaybackFailed(_)
            | PlayerError::Backend(_) => debug!("shown as diagnostic: {err}"),
            PlayerError::Store(e) => warn!("could not save playlist: {e}"),
            _ => debug!("ignored: {err}"),
        }
    }

    /// Tracks in playlist order, for rendering.
    pub fn tracks(&self) -> &[Track] {
        self.playlist.tracks()
    }
}
