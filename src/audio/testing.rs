//! In-memory engine and backend for exercising the controller without an
//! audio device.

use std::cell::Cell;
use std::path::Path;
use std::rc::Rc;

use super::engine::{AudioBackend, PlaybackEngine};
use super::types::LoadError;

pub(crate) struct FakeEngine {
    duration: f64,
    position: f64,
    playing: bool,
    finish: Rc<Cell<bool>>,
}

impl PlaybackEngine for FakeEngine {
    fn play(&mut self) {
        self.playing = true;
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn current_time(&self) -> f64 {
        self.position
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.position = seconds;
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn take_finished(&mut self) -> bool {
        if self.finish.replace(false) {
            self.playing = false;
            self.position = 0.0;
            true
        } else {
            false
        }
    }
}

pub(crate) struct FakeBackend {
    duration: f64,
    fail: bool,
    finish: Rc<Cell<bool>>,
}

impl FakeBackend {
    pub(crate) fn with_duration(duration: f64) -> Self {
        Self {
            duration,
            fail: false,
            finish: Rc::new(Cell::new(false)),
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::with_duration(0.0)
        }
    }

    /// Make engines opened from this backend report end-of-track on their
    /// next poll.
    pub(crate) fn finish_track(&self) {
        self.finish.set(true);
    }
}

impl AudioBackend for FakeBackend {
    type Engine = FakeEngine;

    fn open(&self, path: &Path) -> Result<FakeEngine, LoadError> {
        if self.fail {
            return Err(LoadError::Missing {
                path: path.to_path_buf(),
            });
        }
        Ok(FakeEngine {
            duration: self.duration,
            position: 0.0,
            playing: false,
            finish: self.finish.clone(),
        })
    }
}
