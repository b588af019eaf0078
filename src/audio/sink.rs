//! `rodio`-backed playback engine.
//!
//! Seeking rebuilds the sink and skips into the file, the same primitive
//! works for every format the decoder understands. Elapsed time is kept
//! with our own clock so a seek followed by a read returns the value written.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use lofty::prelude::{Accessor, AudioFile, TaggedFileExt};
use rodio::mixer::Mixer;
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};
use tracing::{debug, warn};

use super::clock::PlaybackClock;
use super::engine::{AudioBackend, PlaybackEngine};
use super::types::LoadError;

/// Owns the output stream. Engines opened from it play through its mixer,
/// so it must outlive them.
pub struct RodioBackend {
    stream: OutputStream,
}

impl RodioBackend {
    pub fn open_default() -> Result<Self, LoadError> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| LoadError::NoOutput(e.to_string()))?;
        // rodio logs to stderr when the stream is dropped, which tears the TUI.
        stream.log_on_drop(false);
        Ok(Self { stream })
    }
}

impl AudioBackend for RodioBackend {
    type Engine = RodioEngine;

    fn open(&self, path: &Path) -> Result<RodioEngine, LoadError> {
        let decoder = open_decoder(path)?;
        let decoded_len = decoder.total_duration();

        let sink = Sink::connect_new(self.stream.mixer());
        sink.pause();
        sink.append(decoder);

        let (tagged_len, title) = read_tags(path);
        let duration = tagged_len
            .or_else(|| decoded_len.map(|d| d.as_secs_f64()))
            .unwrap_or(0.0);

        debug!(path = %path.display(), duration, "opened rodio sink");

        Ok(RodioEngine {
            mixer: self.stream.mixer().clone(),
            path: path.to_path_buf(),
            title,
            sink,
            duration,
            clock: PlaybackClock::default(),
        })
    }
}

pub struct RodioEngine {
    mixer: Mixer,
    path: PathBuf,
    title: Option<String>,
    sink: Sink,
    duration: f64,
    clock: PlaybackClock,
}

impl RodioEngine {
    /// Replace the current sink with a fresh one positioned at `seconds`,
    /// keeping the play/pause state.
    fn rebuild_at(&mut self, seconds: f64) -> Result<(), LoadError> {
        let sink = create_sink_at(&self.mixer, &self.path, Duration::from_secs_f64(seconds))?;
        self.sink.stop();
        if self.clock.is_running() {
            sink.play();
        }
        self.sink = sink;
        Ok(())
    }
}

impl PlaybackEngine for RodioEngine {
    fn play(&mut self) {
        if self.clock.is_running() {
            return;
        }
        self.sink.play();
        self.clock.start(Instant::now());
    }

    fn pause(&mut self) {
        if !self.clock.is_running() {
            return;
        }
        self.sink.pause();
        self.clock.stop(Instant::now());
    }

    fn current_time(&self) -> f64 {
        let t = self.clock.elapsed(Instant::now());
        if self.duration > 0.0 {
            t.min(self.duration)
        } else {
            t
        }
    }

    fn set_current_time(&mut self, seconds: f64) {
        if let Err(e) = self.rebuild_at(seconds) {
            warn!(error = %e, seconds, "seek failed, keeping current position");
            return;
        }
        self.clock.set(seconds, Instant::now());
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn take_finished(&mut self) -> bool {
        if !self.clock.end_of_track(self.sink.empty()) {
            return false;
        }
        // The clock is at 0 and stopped, so the rebuilt sink stays paused.
        if let Err(e) = self.rebuild_at(0.0) {
            warn!(error = %e, "could not rewind after end of track");
        }
        true
    }

    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
}

fn open_decoder(path: &Path) -> Result<Decoder<BufReader<File>>, LoadError> {
    let file = File::open(path).map_err(|_| LoadError::Missing {
        path: path.to_path_buf(),
    })?;
    Decoder::new(BufReader::new(file)).map_err(|e| LoadError::Unsupported {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Create a paused `Sink` for `path` that starts playback at `start_at`.
fn create_sink_at(mixer: &Mixer, path: &Path, start_at: Duration) -> Result<Sink, LoadError> {
    let source = open_decoder(path)?.skip_duration(start_at);
    let sink = Sink::connect_new(mixer);
    sink.pause();
    sink.append(source);
    Ok(sink)
}

/// Duration (if non-zero) and title from the file's tags.
fn read_tags(path: &Path) -> (Option<f64>, Option<String>) {
    let Ok(tagged) = lofty::read_from_path(path) else {
        return (None, None);
    };

    let secs = tagged.properties().duration().as_secs_f64();
    let title = tagged
        .primary_tag()
        .or_else(|| tagged.first_tag())
        .and_then(|tag| tag.title().map(|t| t.trim().to_string()))
        .filter(|t| !t.is_empty());

    ((secs > 0.0).then_some(secs), title)
}
