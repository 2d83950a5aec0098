//! Persistence adapter: the key-value store contract, its JSON file and
//! in-memory implementations, and the playlist snapshot format.

mod backend;
mod snapshot;

pub use backend::{JsonFileStore, MemoryStore, PersistentStore};
pub use snapshot::{
    CURRENT_INDEX_KEY, PersistedTrack, TRACKS_KEY, restore_playlist, save_playlist,
};

#[cfg(test)]
mod tests;
