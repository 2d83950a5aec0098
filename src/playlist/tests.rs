use super::*;
use crate::error::PlayerError;
use crate::library::{SourceRef, Track};
use std::path::PathBuf;

fn t(id: &str) -> Track {
    Track::durable(id, id.to_uppercase(), "", format!("/music/{id}.mp3"))
}

fn playlist(ids: &[&str]) -> PlaylistState {
    PlaylistState::new(ids.iter().map(|id| t(id)).collect())
}

fn ids(p: &PlaylistState) -> Vec<&str> {
    p.tracks().iter().map(|t| t.id.as_str()).collect()
}

#[test]
fn add_track_appends_and_returns_index() {
    let mut p = PlaylistState::default();
    assert_eq!(p.add_track(t("a")), 0);
    assert_eq!(p.add_track(t("b")), 1);
    assert_eq!(ids(&p), vec!["a", "b"]);
    assert_eq!(p.current(), 0);
}

#[test]
fn removing_the_only_track_is_refused() {
    let mut p = playlist(&["a"]);
    let before = p.revision();
    assert!(matches!(p.remove_track(0), Err(PlayerError::LastTrack)));
    assert_eq!(ids(&p), vec!["a"]);
    assert_eq!(p.revision(), before);
}

#[test]
fn remove_out_of_range_is_invalid_index() {
    let mut p = playlist(&["a", "b"]);
    assert!(matches!(p.remove_track(5), Err(PlayerError::InvalidIndex(5))));
    assert_eq!(p.len(), 2);
}

#[test]
fn remove_before_current_shifts_current_down() {
    let mut p = playlist(&["a", "b", "c"]);
    p.select(2).unwrap();
    let removed = p.remove_track(0).unwrap();
    assert!(!removed.was_current);
    assert_eq!(p.current(), 1);
    assert_eq!(p.current_track().unwrap().id, "c");
}

#[test]
fn remove_after_current_leaves_current() {
    let mut p = playlist(&["a", "b", "c"]);
    p.select(0).unwrap();
    p.remove_track(2).unwrap();
    assert_eq!(p.current(), 0);
}

#[test]
fn remove_current_keeps_position_or_clamps_to_last() {
    let mut p = playlist(&["a", "b", "c"]);
    p.select(1).unwrap();
    let removed = p.remove_track(1).unwrap();
    assert!(removed.was_current);
    assert_eq!(p.current(), 1);
    assert_eq!(p.current_track().unwrap().id, "c");

    let removed = p.remove_track(1).unwrap();
    assert!(removed.was_current);
    assert_eq!(p.current(), 0);
    assert_eq!(p.current_track().unwrap().id, "a");
}

#[test]
fn removing_releases_transient_handle_once_and_only_if_transient() {
    let mut p = playlist(&["a", "b"]);
    let handle = p.handles_mut().create(PathBuf::from("/tmp/upload.mp3"));
    let mut uploaded = t("up");
    uploaded.source = SourceRef::Transient(handle.clone());
    p.add_track(uploaded);

    p.remove_track(0).unwrap();
    assert_eq!(p.handles().revoked_count(), 0);

    p.remove_track(1).unwrap();
    assert_eq!(p.handles().revoked_count(), 1);
    assert_eq!(p.handles().live_count(), 0);
    assert!(p.handles().resolve(&handle).is_none());
    assert!(!p.handles_mut().revoke(&handle));
    assert_eq!(p.handles().revoked_count(), 1);
}

#[test]
fn current_stays_in_bounds_after_mixed_operations() {
    let mut p = playlist(&["a", "b", "c", "d", "e"]);
    let steps: &[(char, usize)] = &[
        ('s', 4),
        ('r', 4),
        ('r', 0),
        ('a', 0),
        ('s', 3),
        ('r', 3),
        ('r', 1),
        ('r', 0),
        ('a', 0),
        ('r', 2),
        ('r', 1),
    ];
    for (n, &(op, i)) in steps.iter().enumerate() {
        match op {
            's' => {
                let _ = p.select(i);
            }
            'r' => {
                let _ = p.remove_track(i);
            }
            _ => {
                p.add_track(t(&format!("x{n}")));
            }
        }
        assert!(!p.is_empty());
        assert!(p.current() < p.len(), "step {n}: {} >= {}", p.current(), p.len());
    }
}

#[test]
fn toggle_saved_flips_and_ignores_bad_index() {
    let mut p = playlist(&["a"]);
    assert!(p.toggle_saved(0));
    assert!(p.get(0).unwrap().saved);
    assert!(p.toggle_saved(0));
    assert!(!p.get(0).unwrap().saved);

    let before = p.revision();
    assert!(!p.toggle_saved(3));
    assert_eq!(p.revision(), before);
}

#[test]
fn select_rejects_out_of_range() {
    let mut p = playlist(&["a", "b"]);
    assert!(p.select(1).is_ok());
    assert!(matches!(p.select(2), Err(PlayerError::InvalidIndex(2))));
    assert_eq!(p.current(), 1);
}

#[test]
fn next_index_wraps_only_with_repeat_all() {
    let mut p = playlist(&["a", "b", "c"]);
    assert_eq!(p.next_index(false), Advance::To(1));
    p.select(2).unwrap();
    assert_eq!(p.next_index(true), Advance::To(0));
    assert_eq!(p.next_index(false), Advance::Stop);

    assert_eq!(PlaylistState::default().next_index(true), Advance::Stop);
}

#[test]
fn previous_index_always_wraps() {
    let mut p = playlist(&["a", "b", "c"]);
    assert_eq!(p.previous_index(), Some(2));
    p.select(2).unwrap();
    assert_eq!(p.previous_index(), Some(1));

    assert_eq!(PlaylistState::default().previous_index(), None);
}

#[test]
fn resolve_source_handles_durable_empty_and_revoked() {
    let mut p = PlaylistState::default();
    assert_eq!(
        p.resolve_source(&SourceRef::Durable("file:///music/a.mp3".into())),
        Some(PathBuf::from("/music/a.mp3"))
    );
    assert_eq!(p.resolve_source(&SourceRef::Durable("  ".into())), None);

    let h = p.handles_mut().create(PathBuf::from("/tmp/x.ogg"));
    let src = SourceRef::Transient(h.clone());
    assert_eq!(p.resolve_source(&src), Some(PathBuf::from("/tmp/x.ogg")));
    p.handles_mut().revoke(&h);
    assert_eq!(p.resolve_source(&src), None);
}

#[test]
fn mutations_bump_revision() {
    let mut p = playlist(&["a", "b"]);
    let r0 = p.revision();
    p.select(1).unwrap();
    let r1 = p.revision();
    assert!(r1 > r0);
    p.toggle_saved(0);
    assert!(p.revision() > r1);
}
