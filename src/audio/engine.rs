//! Seams between the playback controller and the audio device.
//!
//! `PlaybackEngine` is one decoded, ready-to-play resource; `AudioBackend`
//! opens resources into engines. The controller only talks to these traits.

use std::path::Path;

use super::types::LoadError;

/// A decode-and-play handle over a single resource.
///
/// Positions are in seconds. Engines start paused at 0.
pub trait PlaybackEngine {
    fn play(&mut self);
    fn pause(&mut self);
    fn current_time(&self) -> f64;
    fn set_current_time(&mut self, seconds: f64);
    fn duration(&self) -> f64;

    /// Returns `true` exactly once after the engine ran off the end of the
    /// track while playing.
    fn take_finished(&mut self) -> bool;

    /// Title from the file's tags, if the engine read any.
    fn title(&self) -> Option<&str> {
        None
    }
}

/// Opens resources into playback engines.
pub trait AudioBackend {
    type Engine: PlaybackEngine;

    fn open(&self, path: &Path) -> Result<Self::Engine, LoadError>;
}
