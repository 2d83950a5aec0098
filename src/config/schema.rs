use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/cantabile/config.toml` or `~/.config/cantabile/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `CANTABILE__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub playback: PlaybackSettings,
    pub controls: ControlsSettings,
    pub library: LibrarySettings,
    pub storage: StorageSettings,
    pub ui: UiSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Whether reaching the end of the list wraps to the start.
    pub repeat_all: bool,
    /// Initial volume, 0-100.
    pub volume: i32,
    /// Minimum interval between passive progress redraws (milliseconds).
    /// Set to 0 to redraw on every backend time update.
    pub progress_throttle_ms: u64,
    /// Delay before resuming playback after switching tracks (milliseconds).
    pub resume_delay_ms: u64,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            repeat_all: true,
            volume: 50,
            progress_throttle_ms: 100,
            resume_delay_ms: 100,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Number of seconds to scrub when pressing `H` / `L`.
    pub scrub_seconds: u64,
    /// Volume change for `+` / `-`.
    pub volume_step: i32,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            scrub_seconds: 5,
            volume_step: 5,
        }
    }
}

/// A built-in playlist entry declared in the config file.
#[derive(Debug, Clone, Deserialize)]
pub struct DefaultTrack {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub artist: String,
    pub source: String,
    #[serde(default)]
    pub artwork: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Directory scanned at startup for the default track set.
    pub default_dir: Option<PathBuf>,
    /// File extensions to treat as audio when scanning (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,
    /// Entries always present at the top of the playlist.
    pub defaults: Vec<DefaultTrack>,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            default_dir: None,
            extensions: vec!["mp3".into(), "flac".into(), "wav".into(), "ogg".into()],
            follow_links: true,
            include_hidden: false,
            recursive: true,
            max_depth: None,
            defaults: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Where the playlist snapshot is kept. Defaults to
    /// `$XDG_DATA_HOME/cantabile/playlist.json`.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// Glyph drawn in the artwork slot for tracks with built-in artwork.
    pub placeholder_artwork: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ cantabile ~ ".to_string(),
            placeholder_artwork: "♪".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Filter directive used when `RUST_LOG` is not set.
    pub level: String,
    /// Log file. Defaults to `$XDG_STATE_HOME/cantabile/cantabile.log`.
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}
