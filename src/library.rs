//! Track model and the ways tracks enter the playlist: the built-in default
//! set (configured entries plus a scanned directory) and uploads.

mod defaults;
mod handles;
mod ingest;
mod model;
mod scan;

pub use defaults::default_tracks;
pub use handles::SessionHandles;
pub use ingest::{
    IngestReport, MAX_UPLOAD_BYTES, RejectReason, Rejection, UploadCandidate,
    candidates_from_input, check, ingest, strip_extension,
};
pub use model::*;
pub use scan::{file_track_id, scan, track_from_file};
