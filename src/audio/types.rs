//! Audio-related small types.
//!
//! This module defines the loaded `Track`, the events the controller
//! broadcasts and the load error type.

use std::path::PathBuf;

use thiserror::Error;

/// A loaded audio resource. Immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub path: PathBuf,
    pub title: String,
    /// Total length in seconds. May be 0 when the decoder cannot tell.
    pub duration: f64,
}

/// Events emitted by the playback controller to its subscribers.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PlaybackEvent {
    /// Playback reached the end of the track and is now paused.
    Finished,
}

/// Why a resource could not be loaded.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("audio file not found: {}", path.display())]
    Missing { path: PathBuf },

    #[error("unsupported audio in {}: {reason}", path.display())]
    Unsupported { path: PathBuf, reason: String },

    #[error("no audio output device: {0}")]
    NoOutput(String),
}
