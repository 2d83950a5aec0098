use super::*;
use crate::error::StoreError;
use crate::library::{SourceRef, Track};
use crate::playlist::PlaylistState;
use std::path::PathBuf;

fn durable(id: &str) -> Track {
    Track::durable(id, format!("Title {id}"), format!("Artist {id}"), format!("/music/{id}.mp3"))
}

struct BrokenStore;

impl PersistentStore for BrokenStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Io(std::io::Error::other("disk on fire")))
    }

    fn set(&mut self, _key: &str, _value: String) -> Result<(), StoreError> {
        Err(StoreError::Io(std::io::Error::other("disk on fire")))
    }
}

#[test]
fn transient_sources_serialize_as_null_and_are_dropped_on_reload() {
    let mut playlist = PlaylistState::new(vec![durable("a")]);
    let handle = playlist.handles_mut().create(PathBuf::from("/tmp/up.mp3"));
    let mut uploaded = durable("up");
    uploaded.source = SourceRef::Transient(handle);
    playlist.add_track(uploaded);

    let mut store = MemoryStore::new();
    save_playlist(&mut store, &playlist).unwrap();

    let raw = store.get(TRACKS_KEY).unwrap().unwrap();
    let entries: Vec<PersistedTrack> = serde_json::from_str(&raw).unwrap();
    assert_eq!(entries[1].source, None);

    let restored = restore_playlist(&store, Vec::new());
    assert_eq!(restored.len(), 1);
    assert_eq!(restored.get(0).unwrap().id, "a");
}

#[test]
fn durable_track_round_trips_with_identical_fields() {
    let mut track = durable("b");
    track.saved = true;
    track.artwork = "file:///art/b.png".into();
    let playlist = PlaylistState::new(vec![track.clone()]);

    let mut store = MemoryStore::new();
    save_playlist(&mut store, &playlist).unwrap();
    let restored = restore_playlist(&store, Vec::new());

    assert_eq!(restored.get(0), Some(&track));
}

#[test]
fn restore_merges_after_defaults_without_duplicates() {
    let mut store = MemoryStore::new();
    let mut saved_copy = durable("a");
    saved_copy.title = "stale title".into();
    let saved = PlaylistState::new(vec![saved_copy, durable("c")]);
    save_playlist(&mut store, &saved).unwrap();

    let restored = restore_playlist(&store, vec![durable("a"), durable("b")]);
    let ids: Vec<&str> = restored.tracks().iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
    assert_eq!(restored.get(0).unwrap().title, "Title a");
}

#[test]
fn current_index_round_trips_when_in_range() {
    let mut playlist = PlaylistState::new(vec![durable("a"), durable("b"), durable("c")]);
    playlist.select(2).unwrap();
    let mut store = MemoryStore::new();
    save_playlist(&mut store, &playlist).unwrap();

    let restored = restore_playlist(&store, Vec::new());
    assert_eq!(restored.current(), 2);
}

#[test]
fn out_of_range_or_garbage_index_falls_back_to_zero() {
    let mut store = MemoryStore::new();
    store.set(CURRENT_INDEX_KEY, "7".into()).unwrap();
    let restored = restore_playlist(&store, vec![durable("a"), durable("b")]);
    assert_eq!(restored.current(), 0);

    store.set(CURRENT_INDEX_KEY, "-1".into()).unwrap();
    let restored = restore_playlist(&store, vec![durable("a"), durable("b")]);
    assert_eq!(restored.current(), 0);

    store.set(CURRENT_INDEX_KEY, "banana".into()).unwrap();
    let restored = restore_playlist(&store, vec![durable("a"), durable("b")]);
    assert_eq!(restored.current(), 0);
}

#[test]
fn index_one_past_the_end_is_rejected_by_select() {
    let mut store = MemoryStore::new();
    store.set(CURRENT_INDEX_KEY, "2".into()).unwrap();
    let restored = restore_playlist(&store, vec![durable("a"), durable("b")]);
    assert_eq!(restored.current(), 0);

    store.set(CURRENT_INDEX_KEY, "1".into()).unwrap();
    let restored = restore_playlist(&store, vec![durable("a"), durable("b")]);
    assert_eq!(restored.current(), 1);
}

#[test]
fn unreadable_store_yields_defaults() {
    let restored = restore_playlist(&BrokenStore, vec![durable("a")]);
    assert_eq!(restored.len(), 1);
    assert!(save_playlist(&mut BrokenStore, &restored).is_err());
}

#[test]
fn corrupt_track_list_yields_defaults() {
    let mut store = MemoryStore::new();
    store.set(TRACKS_KEY, "{not json".into()).unwrap();
    let restored = restore_playlist(&store, vec![durable("a")]);
    assert_eq!(restored.len(), 1);
}

#[test]
fn json_file_store_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("playlist.json");

    let mut store = JsonFileStore::open(&path);
    assert_eq!(store.get("k").unwrap(), None);
    store.set("k", "v".into()).unwrap();
    assert!(path.exists());

    let reopened = JsonFileStore::open(&path);
    assert_eq!(reopened.get("k").unwrap().as_deref(), Some("v"));
    assert_eq!(reopened.path(), path.as_path());
}

#[test]
fn json_file_store_treats_corrupt_file_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("playlist.json");
    std::fs::write(&path, "][").unwrap();

    let mut store = JsonFileStore::open(&path);
    assert_eq!(store.get("k").unwrap(), None);
    store.set("k", "v".into()).unwrap();
    assert_eq!(JsonFileStore::open(&path).get("k").unwrap().as_deref(), Some("v"));
}
