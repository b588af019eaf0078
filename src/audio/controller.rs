//! Player state over a single loaded track.
//!
//! The controller starts unloaded. A failed load leaves it unloaded and every
//! other operation becomes a no-op. Once loaded it flips between paused and
//! playing on user request, and drops back to paused by itself only when the
//! engine reports end-of-track.

use std::path::Path;
use std::sync::mpsc::{self, Receiver, Sender};

use tracing::{debug, error, info};

use super::engine::{AudioBackend, PlaybackEngine};
use super::types::{LoadError, PlaybackEvent, Track};

struct Loaded<E> {
    track: Track,
    engine: E,
    playing: bool,
}

pub struct PlaybackController<E: PlaybackEngine> {
    loaded: Option<Loaded<E>>,
    subscribers: Vec<Sender<PlaybackEvent>>,
}

impl<E: PlaybackEngine> Default for PlaybackController<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: PlaybackEngine> PlaybackController<E> {
    /// Create an unloaded controller.
    pub fn new() -> Self {
        Self {
            loaded: None,
            subscribers: Vec::new(),
        }
    }

    /// Open `path` through `backend` and make it the current track, paused at 0.
    ///
    /// On failure the error is logged and the controller keeps its previous
    /// state.
    pub fn load<B>(&mut self, backend: &B, path: &Path) -> Result<&Track, LoadError>
    where
        B: AudioBackend<Engine = E>,
    {
        let engine = match backend.open(path) {
            Ok(engine) => engine,
            Err(e) => {
                error!(path = %path.display(), error = %e, "failed to load audio");
                return Err(e);
            }
        };

        let title = engine
            .title()
            .map(str::to_string)
            .or_else(|| {
                path.file_stem()
                    .and_then(|s| s.to_str())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| "UNKNOWN".to_string());

        let track = Track {
            path: path.to_path_buf(),
            title,
            duration: sanitize_duration(engine.duration()),
        };
        info!(path = %path.display(), duration = track.duration, "loaded track");

        let loaded = self.loaded.insert(Loaded {
            track,
            engine,
            playing: false,
        });
        Ok(&loaded.track)
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    pub fn track(&self) -> Option<&Track> {
        self.loaded.as_ref().map(|l| &l.track)
    }

    pub fn is_playing(&self) -> bool {
        self.loaded.as_ref().is_some_and(|l| l.playing)
    }

    /// Total length in seconds, 0 when unloaded.
    pub fn duration(&self) -> f64 {
        self.loaded.as_ref().map_or(0.0, |l| l.track.duration)
    }

    /// Current position in seconds, always within `[0, duration]`.
    pub fn current_time(&self) -> f64 {
        match &self.loaded {
            Some(l) => clamp_time(l.engine.current_time(), l.track.duration),
            None => 0.0,
        }
    }

    /// Pause when playing, resume when paused.
    pub fn toggle_play_pause(&mut self) {
        let Some(l) = self.loaded.as_mut() else {
            return;
        };
        if l.playing {
            l.engine.pause();
        } else {
            l.engine.play();
        }
        l.playing = !l.playing;
        debug!(playing = l.playing, "toggled playback");
    }

    /// Jump to `fraction` of the track. Out-of-range input is clamped.
    pub fn seek_to_fraction(&mut self, fraction: f64) {
        let fraction = if fraction.is_finite() {
            fraction.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let duration = self.duration();
        self.seek_to_time(fraction * duration);
    }

    /// Jump to `seconds`, clamped to `[0, duration]`.
    pub fn seek_to_time(&mut self, seconds: f64) {
        let Some(l) = self.loaded.as_mut() else {
            return;
        };
        let target = clamp_time(seconds, l.track.duration);
        l.engine.set_current_time(target);
        debug!(requested = seconds, target, "seek");
    }

    /// Move the position by `delta` seconds (negative scrubs back).
    pub fn seek_by(&mut self, delta: f64) {
        if !self.is_loaded() {
            return;
        }
        let target = self.current_time() + delta;
        self.seek_to_time(target);
    }

    /// Register a new event subscriber.
    pub fn subscribe(&mut self) -> Receiver<PlaybackEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    /// Pick up the engine's end-of-track notification. When it fires while
    /// playing, playback is marked paused and `Finished` is broadcast.
    pub fn poll_engine(&mut self) {
        let Some(l) = self.loaded.as_mut() else {
            return;
        };
        if !l.engine.take_finished() || !l.playing {
            return;
        }
        l.playing = false;
        info!(title = %l.track.title, "playback finished");
        self.emit(PlaybackEvent::Finished);
    }

    fn emit(&mut self, event: PlaybackEvent) {
        // Drop subscribers whose receiver is gone.
        self.subscribers.retain(|tx| tx.send(event).is_ok());
    }
}

fn sanitize_duration(d: f64) -> f64 {
    if d.is_finite() && d > 0.0 { d } else { 0.0 }
}

fn clamp_time(seconds: f64, duration: f64) -> f64 {
    if !seconds.is_finite() {
        return 0.0;
    }
    seconds.clamp(0.0, duration.max(0.0))
}
