use std::fmt;

/// Title shown when a track has none.
pub const UNKNOWN_TITLE: &str = "Unknown Title";
/// Artist shown when a track has none.
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";
/// Artwork reference used when a track has none.
pub const DEFAULT_ARTWORK: &str = "builtin:note";
/// Artwork reference given to uploaded files.
pub const UPLOAD_ARTWORK: &str = "builtin:note-upload";

/// Session-scoped token standing in for an uploaded file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HandleId(pub(crate) String);

impl HandleId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HandleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where a track's audio comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceRef {
    /// A path or URI that survives a restart.
    Durable(String),
    /// A handle that is only valid for the current session.
    Transient(HandleId),
}

impl SourceRef {
    pub fn is_transient(&self) -> bool {
        matches!(self, SourceRef::Transient(_))
    }

    /// The persisted form: durable sources keep their location, transient
    /// ones have none.
    pub fn durable(&self) -> Option<&str> {
        match self {
            SourceRef::Durable(s) => Some(s.as_str()),
            SourceRef::Transient(_) => None,
        }
    }
}

/// One playable item in the playlist.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub source: SourceRef,
    pub artwork: String,
    pub saved: bool,
}

impl Track {
    pub fn durable(
        id: impl Into<String>,
        title: impl Into<String>,
        artist: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: artist.into(),
            source: SourceRef::Durable(source.into()),
            artwork: DEFAULT_ARTWORK.to_string(),
            saved: false,
        }
    }

    /// Title to render, falling back to [`UNKNOWN_TITLE`].
    pub fn display_title(&self) -> &str {
        non_empty(&self.title).unwrap_or(UNKNOWN_TITLE)
    }

    /// Artist to render, falling back to [`UNKNOWN_ARTIST`].
    pub fn display_artist(&self) -> &str {
        non_empty(&self.artist).unwrap_or(UNKNOWN_ARTIST)
    }

    pub fn display_artwork(&self) -> &str {
        non_empty(&self.artwork).unwrap_or(DEFAULT_ARTWORK)
    }
}

fn non_empty(s: &str) -> Option<&str> {
    let s = s.trim();
    if s.is_empty() { None } else { Some(s) }
}
