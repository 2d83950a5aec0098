use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|e| e.into_inner())
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_explicit_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("CANTABILE_CONFIG_PATH", "/tmp/cantabile-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/cantabile-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("cantabile")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("cantabile")
            .join("config.toml")
    );
}

#[test]
fn storage_path_defaults_under_xdg_data_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_DATA_HOME", "/tmp/xdg-data");

    let s = Settings::default();
    assert_eq!(
        s.storage_path().unwrap(),
        std::path::PathBuf::from("/tmp/xdg-data")
            .join("cantabile")
            .join("playlist.json")
    );
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[playback]
repeat_all = false
volume = 80
progress_throttle_ms = 250
resume_delay_ms = 40

[controls]
scrub_seconds = 9

[storage]
path = "/tmp/elsewhere.json"

[ui]
header_text = "hello"

[[library.defaults]]
id = "intro"
title = "Intro"
artist = "Someone"
source = "/music/intro.mp3"

[[library.defaults]]
id = "outro"
title = "Outro"
source = "/music/outro.mp3"
artwork = "file:///art/outro.png"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("CANTABILE_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("CANTABILE__PLAYBACK__VOLUME");

    let s = Settings::load().unwrap();
    assert!(!s.playback.repeat_all);
    assert_eq!(s.playback.volume, 80);
    assert_eq!(s.playback.progress_throttle_ms, 250);
    assert_eq!(s.playback.resume_delay_ms, 40);
    assert_eq!(s.controls.scrub_seconds, 9);
    assert_eq!(s.controls.volume_step, 5);
    assert_eq!(
        s.storage_path().unwrap(),
        std::path::PathBuf::from("/tmp/elsewhere.json")
    );
    assert_eq!(s.ui.header_text, "hello");
    assert_eq!(s.library.defaults.len(), 2);
    assert_eq!(s.library.defaults[0].artist, "Someone");
    assert_eq!(s.library.defaults[1].artist, "");
    assert_eq!(
        s.library.defaults[1].artwork.as_deref(),
        Some("file:///art/outro.png")
    );
    assert!(s.validate().is_ok());
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[playback]
volume = 30
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("CANTABILE_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("CANTABILE__PLAYBACK__VOLUME", "70");

    let s = Settings::load().unwrap();
    assert_eq!(s.playback.volume, 70);
}

#[test]
fn validate_rejects_out_of_range_volume_and_duplicate_defaults() {
    let mut s = Settings::default();
    s.playback.volume = 120;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    let entry = DefaultTrack {
        id: "dup".into(),
        title: "A".into(),
        artist: String::new(),
        source: "/a.mp3".into(),
        artwork: None,
    };
    s.library.defaults = vec![entry.clone(), entry];
    assert!(s.validate().is_err());
}

#[test]
fn partial_document_fills_missing_sections_with_defaults() {
    let s: Settings = toml::from_str(
        r#"
[ui]
placeholder_artwork = "*"

[library]
extensions = ["opus"]
"#,
    )
    .unwrap();
    assert_eq!(s.ui.placeholder_artwork, "*");
    assert_eq!(s.ui.header_text, " ~ cantabile ~ ");
    assert_eq!(s.library.extensions, vec!["opus".to_string()]);
    assert!(s.library.recursive);
    assert!(s.playback.repeat_all);
    assert_eq!(s.playback.volume, 50);
    assert_eq!(s.logging.level, "info");
}
