//! Playlist module: the ordered track collection and its current index.
//!
//! Index bookkeeping lives in `playlist::model`; persistence and reloading
//! of the current track are driven by the `App` after each mutation.

mod model;

pub use model::*;

#[cfg(test)]
mod tests;
