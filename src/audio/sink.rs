//! Utilities for creating `rodio` sinks from files on disk.
//!
//! The helpers here encapsulate opening/decoding a file and preparing a
//! paused `Sink` at the requested start position.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use lofty::file::AudioFile;
use rodio::{Decoder, OutputStream, Sink, Source};

use crate::error::{PlayerError, Result};

/// Open and decode `path`, returning the decoder's own length estimate.
fn open_decoder(path: &Path) -> Result<Decoder<BufReader<File>>> {
    let file = File::open(path)
        .map_err(|e| PlayerError::Backend(format!("failed to open {}: {e}", path.display())))?;
    Decoder::new(BufReader::new(file))
        .map_err(|e| PlayerError::Backend(format!("failed to decode {}: {e}", path.display())))
}

/// Length of the file at `path`, read from its container properties.
pub(super) fn probe_duration(path: &Path) -> Option<Duration> {
    let tagged = lofty::read_from_path(path).ok()?;
    let duration = tagged.properties().duration();
    (!duration.is_zero()).then_some(duration)
}

/// Decode `path` far enough to learn its length without attaching it to an
/// output. Falls back to the decoder's estimate when the tags have none.
pub(super) fn load_metadata(path: &Path) -> Result<Option<Duration>> {
    let decoder = open_decoder(path)?;
    Ok(probe_duration(path).or_else(|| decoder.total_duration()))
}

/// Create a paused `Sink` for `path` that starts playback at `start_at`.
pub(super) fn create_sink_at(
    stream: &OutputStream,
    path: &Path,
    start_at: Duration,
    volume: f32,
) -> Result<Sink> {
    // `skip_duration` is the fallback seeking primitive; Duration::ZERO is fine.
    let source = open_decoder(path)?.skip_duration(start_at);

    let sink = Sink::connect_new(stream.mixer());
    sink.set_volume(volume);
    sink.append(source);
    sink.pause();
    Ok(sink)
}
