use std::path::PathBuf;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder, Sink};
use tracing::{debug, warn};

use super::sink::{create_sink_at, load_metadata};
use super::types::{AudioCmd, MediaEvent, PlaybackHandle};

/// How often the thread reports position and checks for the end of a track.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    events: Sender<MediaEvent>,
    playback_info: PlaybackHandle,
    volume: f32,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let stream = match OutputStreamBuilder::open_default_stream() {
            Ok(mut stream) => {
                // rodio logs to stderr when OutputStream is dropped. That's useful in
                // debugging, but noisy for a TUI app.
                stream.log_on_drop(false);
                Some(stream)
            }
            Err(e) => {
                warn!("no audio output device: {e}");
                let _ = events.send(MediaEvent::Errored(format!("no audio output device: {e}")));
                None
            }
        };

        let mut worker = Worker {
            stream,
            events,
            playback_info,
            sink: None,
            path: None,
            duration: None,
            playing: false,
            volume,
        };

        loop {
            match rx.recv_timeout(POLL_INTERVAL) {
                Ok(AudioCmd::Quit) => {
                    worker.stop();
                    break;
                }
                Ok(cmd) => worker.handle(cmd),
                Err(RecvTimeoutError::Timeout) => worker.poll(),
                Err(RecvTimeoutError::Disconnected) => {
                    worker.stop();
                    break;
                }
            }
        }
        debug!("audio thread finished");
    })
}

struct Worker {
    stream: Option<OutputStream>,
    events: Sender<MediaEvent>,
    playback_info: PlaybackHandle,
    sink: Option<Sink>,
    path: Option<PathBuf>,
    duration: Option<Duration>,
    playing: bool,
    volume: f32,
}

impl Worker {
    fn emit(&self, event: MediaEvent) {
        // The receiver only goes away during shutdown.
        let _ = self.events.send(event);
    }

    fn publish(&self, position: Duration) {
        if let Ok(mut info) = self.playback_info.lock() {
            info.position = position;
            info.duration = self.duration;
            info.playing = self.playing;
        }
    }

    fn handle(&mut self, cmd: AudioCmd) {
        match cmd {
            AudioCmd::SetSource(path) => self.set_source(path),
            AudioCmd::Play => self.play(),
            AudioCmd::Pause => {
                if let Some(s) = self.sink.as_ref() {
                    s.pause();
                }
                self.playing = false;
                self.publish(self.position());
            }
            AudioCmd::Seek(to) => self.seek(to),
            AudioCmd::SetVolume(v) => {
                self.volume = v.clamp(0.0, 1.0);
                if let Some(s) = self.sink.as_ref() {
                    s.set_volume(self.volume);
                }
            }
            AudioCmd::Quit => self.stop(),
        }
    }

    fn position(&self) -> Duration {
        self.sink.as_ref().map_or(Duration::ZERO, |s| s.get_pos())
    }

    fn stop(&mut self) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
        self.playing = false;
        self.publish(Duration::ZERO);
    }

    fn set_source(&mut self, path: PathBuf) {
        self.stop();
        self.path = None;
        self.duration = None;
        self.emit(MediaEvent::LoadStarted);

        let duration = match load_metadata(&path) {
            Ok(d) => d,
            Err(e) => {
                warn!(path = %path.display(), "could not load source: {e}");
                self.publish(Duration::ZERO);
                self.emit(MediaEvent::Errored(e.to_string()));
                return;
            }
        };

        if let Some(stream) = self.stream.as_ref() {
            match create_sink_at(stream, &path, Duration::ZERO, self.volume) {
                Ok(sink) => self.sink = Some(sink),
                Err(e) => {
                    warn!(path = %path.display(), "could not prepare sink: {e}");
                    self.emit(MediaEvent::Errored(e.to_string()));
                    return;
                }
            }
        }

        debug!(path = %path.display(), ?duration, "source loaded");
        self.path = Some(path);
        self.duration = duration;
        self.publish(Duration::ZERO);
        self.emit(MediaEvent::MetadataReady {
            duration: duration.map(|d| d.as_secs_f64()),
        });
    }

    fn play(&mut self) {
        let Some(stream) = self.stream.as_ref() else {
            self.emit(MediaEvent::PlayFailed("no audio output device".into()));
            return;
        };
        let Some(path) = self.path.clone() else {
            self.emit(MediaEvent::PlayFailed("no source loaded".into()));
            return;
        };

        // A finished sink has nothing left to play; start the file over.
        if self.sink.as_ref().is_none_or(|s| s.empty()) {
            match create_sink_at(stream, &path, Duration::ZERO, self.volume) {
                Ok(sink) => self.sink = Some(sink),
                Err(e) => {
                    self.emit(MediaEvent::PlayFailed(e.to_string()));
                    return;
                }
            }
        }

        if let Some(s) = self.sink.as_ref() {
            s.play();
        }
        self.playing = true;
        self.publish(self.position());
        self.emit(MediaEvent::PlayStarted);
    }

    fn seek(&mut self, to: Duration) {
        let to = match self.duration {
            Some(d) => to.min(d),
            None => to,
        };
        let Some(sink) = self.sink.as_ref() else {
            return;
        };

        if let Err(e) = sink.try_seek(to) {
            // Not every decoder can seek; rebuild the sink and skip into the file.
            debug!("seek unsupported ({e}), rebuilding sink");
            let (Some(stream), Some(path)) = (self.stream.as_ref(), self.path.as_ref()) else {
                return;
            };
            match create_sink_at(stream, path, to, self.volume) {
                Ok(new_sink) => {
                    sink.stop();
                    if self.playing {
                        new_sink.play();
                    }
                    self.sink = Some(new_sink);
                }
                Err(e) => {
                    warn!("seek failed: {e}");
                    return;
                }
            }
        }

        self.publish(to);
        self.emit(MediaEvent::TimeAdvanced {
            position: to.as_secs_f64(),
        });
    }

    fn poll(&mut self) {
        if !self.playing {
            return;
        }
        let Some(sink) = self.sink.as_ref() else {
            return;
        };

        if sink.empty() {
            self.playing = false;
            self.publish(self.duration.unwrap_or_default());
            self.emit(MediaEvent::Ended);
        } else {
            let position = sink.get_pos();
            self.publish(position);
            self.emit(MediaEvent::TimeAdvanced {
                position: position.as_secs_f64(),
            });
        }
    }
}
