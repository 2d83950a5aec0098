use std::{env, path::PathBuf};

use super::schema::Settings;

const APP_DIR: &str = "cantabile";

/// Configuration loading helpers.
///
/// `Settings::load` reads an optional config file, then environment
/// variables (prefix `CANTABILE__`), over struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("CANTABILE")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if !(0..=100).contains(&self.playback.volume) {
            return Err("playback.volume must be between 0 and 100".to_string());
        }
        if self.controls.volume_step <= 0 {
            return Err("controls.volume_step must be >= 1".to_string());
        }
        let mut seen = std::collections::HashSet::new();
        for d in &self.library.defaults {
            if !seen.insert(d.id.as_str()) {
                return Err(format!("library.defaults has duplicate id {:?}", d.id));
            }
        }
        Ok(())
    }

    /// Playlist snapshot location: configured path or the XDG data default.
    pub fn storage_path(&self) -> Option<PathBuf> {
        self.storage
            .path
            .clone()
            .or_else(|| xdg_dir("XDG_DATA_HOME", &[".local", "share"]).map(|d| d.join("playlist.json")))
    }

    /// Log file location: configured path or the XDG state default.
    pub fn log_path(&self) -> Option<PathBuf> {
        self.logging
            .file
            .clone()
            .or_else(|| xdg_dir("XDG_STATE_HOME", &[".local", "state"]).map(|d| d.join("cantabile.log")))
    }
}

/// Resolve the config path from `CANTABILE_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("CANTABILE_CONFIG_PATH") {
        let p = PathBuf::from(p);
        return Some(p);
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/cantabile/config.toml`
/// or `~/.config/cantabile/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    xdg_dir("XDG_CONFIG_HOME", &[".config"]).map(|d| d.join("config.toml"))
}

/// `$<var>/cantabile`, or `$HOME/<fallback...>/cantabile`.
fn xdg_dir(var: &str, home_fallback: &[&str]) -> Option<PathBuf> {
    let base = if let Some(xdg) = env::var_os(var) {
        Some(PathBuf::from(xdg))
    } else if let Some(home) = env::var_os("HOME") {
        let mut p = PathBuf::from(home);
        p.extend(home_fallback);
        Some(p)
    } else {
        None
    };

    base.map(|d| d.join(APP_DIR))
}
