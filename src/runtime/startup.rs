use std::path::Path;

use tracing::{info, warn};

use crate::app::App;
use crate::audio::RodioBackend;
use crate::config;
use crate::library::default_tracks;
use crate::player::PlaybackController;
use crate::store::{JsonFileStore, MemoryStore, PersistentStore, restore_playlist};

/// Wire the default set, the saved playlist, the audio backend and the
/// store into an `App`. `dir` overrides `library.default_dir`.
pub fn build_app(settings: &config::Settings, dir: Option<&Path>) -> App<RodioBackend> {
    let defaults = default_tracks(&settings.library, dir);

    let store: Box<dyn PersistentStore> = match settings.storage_path() {
        Some(path) => Box::new(JsonFileStore::open(path)),
        None => {
            warn!("no storage location (HOME unset?), playlist will not be saved");
            Box::new(MemoryStore::new())
        }
    };

    let playlist = restore_playlist(store.as_ref(), defaults);
    info!(
        tracks = playlist.len(),
        current = playlist.current(),
        "playlist restored"
    );

    let volume = settings.playback.volume.clamp(0, 100) as f32 / 100.0;
    let player = PlaybackController::new(RodioBackend::new(volume), &settings.playback);

    App::new(playlist, player, store, settings.controls.clone())
}
