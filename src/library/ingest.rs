//! Upload boundary: turns candidate files into playlist tracks.
//!
//! Every candidate is judged on its own; a rejected file never aborts the
//! rest of the batch.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{info, warn};
use uuid::Uuid;
use walkdir::WalkDir;

use crate::playlist::PlaylistState;

use super::model::{SourceRef, Track, UNKNOWN_ARTIST, UPLOAD_ARTWORK};
use super::scan::is_hidden;

/// Files must be strictly smaller than this.
pub const MAX_UPLOAD_BYTES: u64 = 50 * 1024 * 1024;

/// A file offered for upload, with its declared media type and size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadCandidate {
    pub name: String,
    pub media_type: String,
    pub size: u64,
    pub path: PathBuf,
}

impl UploadCandidate {
    /// Describe the file at `path`; the media type is guessed from its name.
    pub fn from_path(path: &Path) -> Result<Self, Rejection> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let meta = std::fs::metadata(path).map_err(|e| Rejection {
            name: name.clone(),
            reason: RejectReason::Unreadable(e.to_string()),
        })?;

        let media_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();

        Ok(Self {
            name,
            media_type,
            size: meta.len(),
            path: path.to_path_buf(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    TooLarge { size: u64 },
    UnsupportedType { media_type: String },
    Unreadable(String),
}

/// A candidate that was turned away, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub name: String,
    pub reason: RejectReason,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            RejectReason::TooLarge { .. } => write!(
                f,
                "File \"{}\" is too large. Maximum size is 50MB.",
                self.name
            ),
            RejectReason::UnsupportedType { .. } => write!(
                f,
                "File \"{}\" is not a supported audio format.",
                self.name
            ),
            RejectReason::Unreadable(err) => {
                write!(f, "Failed to load {}: {}. Please try again.", self.name, err)
            }
        }
    }
}

/// Size is judged first, so an oversized file is reported as too large
/// whatever its type.
pub fn check(candidate: &UploadCandidate) -> Result<(), RejectReason> {
    if candidate.size >= MAX_UPLOAD_BYTES {
        return Err(RejectReason::TooLarge {
            size: candidate.size,
        });
    }
    if !candidate.media_type.starts_with("audio/") {
        return Err(RejectReason::UnsupportedType {
            media_type: candidate.media_type.clone(),
        });
    }
    Ok(())
}

/// Expand what the user typed into candidates: one file, or every
/// non-hidden file under a directory.
pub fn candidates_from_input(input: &str) -> Vec<Result<UploadCandidate, Rejection>> {
    let trimmed = input.trim().trim_matches(|c| c == '"' || c == '\'');
    if trimmed.is_empty() {
        return Vec::new();
    }

    let path = expand_home(trimmed);
    if path.is_dir() {
        WalkDir::new(&path)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e.path()))
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file())
            .map(|e| UploadCandidate::from_path(e.path()))
            .collect()
    } else {
        vec![UploadCandidate::from_path(&path)]
    }
}

fn expand_home(input: &str) -> PathBuf {
    if let Some(rest) = input.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(rest);
        }
    }
    PathBuf::from(input)
}

/// `"song.mp3"` -> `"song"`, `"a.b.flac"` -> `"a.b"`, `"noext"` -> `"noext"`.
pub fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) if idx + 1 < name.len() && !name[idx + 1..].contains('/') => &name[..idx],
        _ => name,
    }
}

/// Outcome of one upload batch.
#[derive(Debug, Default)]
pub struct IngestReport {
    /// Playlist indices of the accepted files, in batch order.
    pub accepted: Vec<usize>,
    pub rejected: Vec<Rejection>,
    /// Set when the playlist was empty before the batch: the index to load.
    pub load_first: Option<usize>,
}

/// Append every acceptable candidate to `playlist`, each with a fresh id and
/// a transient session handle as its source.
pub fn ingest<I>(playlist: &mut PlaylistState, candidates: I) -> IngestReport
where
    I: IntoIterator<Item = Result<UploadCandidate, Rejection>>,
{
    let was_empty = playlist.is_empty();
    let mut report = IngestReport::default();

    for candidate in candidates {
        let candidate = match candidate {
            Ok(c) => c,
            Err(rejection) => {
                warn!(file = %rejection.name, "upload rejected: {rejection}");
                report.rejected.push(rejection);
                continue;
            }
        };

        if let Err(reason) = check(&candidate) {
            let rejection = Rejection {
                name: candidate.name,
                reason,
            };
            warn!(file = %rejection.name, "upload rejected: {rejection}");
            report.rejected.push(rejection);
            continue;
        }

        let handle = playlist.handles_mut().create(candidate.path);
        let track = Track {
            id: format!("track-{}", Uuid::new_v4()),
            title: strip_extension(&candidate.name).to_string(),
            artist: UNKNOWN_ARTIST.to_string(),
            source: SourceRef::Transient(handle),
            artwork: UPLOAD_ARTWORK.to_string(),
            saved: false,
        };
        info!(id = %track.id, title = %track.title, "accepted upload");
        report.accepted.push(playlist.add_track(track));
    }

    if was_empty && !report.accepted.is_empty() {
        report.load_first = Some(report.accepted[0]);
    }
    report
}
