use std::path::Path;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::warn;

use super::MediaBackend;
use super::thread::spawn_audio_thread;
use super::types::{AudioCmd, MediaEvent, PlaybackHandle, PlaybackInfo};

/// [`MediaBackend`] backed by a `rodio` output on its own thread.
pub struct RodioBackend {
    tx: Sender<AudioCmd>,
    events: Receiver<MediaEvent>,
    playback: PlaybackHandle,
    join: Option<JoinHandle<()>>,
}

impl RodioBackend {
    pub fn new(volume: f32) -> Self {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let (event_tx, event_rx) = mpsc::channel::<MediaEvent>();
        let playback_info: PlaybackHandle = Arc::new(Mutex::new(PlaybackInfo::default()));

        let audio_handle = spawn_audio_thread(rx, event_tx, playback_info.clone(), volume);

        Self {
            tx,
            events: event_rx,
            playback: playback_info,
            join: Some(audio_handle),
        }
    }

    fn send(&self, cmd: AudioCmd) {
        if let Err(e) = self.tx.send(cmd) {
            warn!("audio thread is gone, dropped {:?}", e.0);
        }
    }

    fn snapshot(&self) -> PlaybackInfo {
        self.playback
            .lock()
            .map(|info| info.clone())
            .unwrap_or_default()
    }
}

impl MediaBackend for RodioBackend {
    fn set_source(&mut self, path: &Path) {
        self.send(AudioCmd::SetSource(path.to_path_buf()));
    }

    fn play(&mut self) {
        self.send(AudioCmd::Play);
    }

    fn pause(&mut self) {
        self.send(AudioCmd::Pause);
    }

    fn current_time(&self) -> f64 {
        self.snapshot().position.as_secs_f64()
    }

    fn set_current_time(&mut self, secs: f64) {
        let to = Duration::try_from_secs_f64(secs).unwrap_or_default();
        if let Ok(mut info) = self.playback.lock() {
            info.position = to;
        }
        self.send(AudioCmd::Seek(to));
    }

    fn duration(&self) -> Option<f64> {
        self.snapshot().duration.map(|d| d.as_secs_f64())
    }

    fn set_volume(&mut self, volume: f32) {
        self.send(AudioCmd::SetVolume(volume));
    }

    fn poll_events(&mut self) -> Vec<MediaEvent> {
        self.events.try_iter().collect()
    }
}

impl Drop for RodioBackend {
    fn drop(&mut self) {
        let _ = self.tx.send(AudioCmd::Quit);
        if let Some(h) = self.join.take() {
            let _ = h.join();
        }
    }
}
