use std::time::{Duration, Instant};

use super::sink::{load_metadata, probe_duration};
use super::*;

fn wait_for(backend: &mut RodioBackend, pred: impl Fn(&MediaEvent) -> bool) -> Vec<MediaEvent> {
    let deadline = Instant::now() + Duration::from_secs(5);
    let mut seen = Vec::new();
    while Instant::now() < deadline {
        seen.extend(backend.poll_events());
        if seen.iter().any(&pred) {
            break;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    seen
}

#[test]
fn metadata_of_non_audio_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.mp3");
    std::fs::write(&path, b"definitely not mpeg frames").unwrap();

    assert_eq!(probe_duration(&path), None);
    assert!(load_metadata(&path).is_err());
    assert!(load_metadata(&dir.path().join("missing.mp3")).is_err());
}

#[test]
fn missing_source_is_reported_not_panicked() {
    let mut backend = RodioBackend::new(0.5);
    backend.set_source(std::path::Path::new("/nonexistent/cantabile/track.mp3"));

    let events = wait_for(&mut backend, |e| {
        matches!(e, MediaEvent::Errored(msg) if msg.contains("track.mp3"))
    });
    assert!(events.contains(&MediaEvent::LoadStarted));
    assert!(
        events
            .iter()
            .any(|e| matches!(e, MediaEvent::Errored(msg) if msg.contains("track.mp3")))
    );
    assert_eq!(backend.duration(), None);
}

#[test]
fn play_without_source_fails_asynchronously() {
    let mut backend = RodioBackend::new(0.5);
    backend.play();

    let events = wait_for(&mut backend, |e| matches!(e, MediaEvent::PlayFailed(_)));
    assert!(events.iter().any(|e| matches!(e, MediaEvent::PlayFailed(_))));
    assert!(!events.contains(&MediaEvent::PlayStarted));
    assert_eq!(backend.current_time(), 0.0);
}

#[test]
fn set_current_time_updates_snapshot_immediately() {
    let mut backend = RodioBackend::new(0.5);
    backend.set_current_time(12.5);
    assert!((backend.current_time() - 12.5).abs() < 1e-9);
    backend.set_current_time(f64::NAN);
    assert_eq!(backend.current_time(), 0.0);
}
