//! Audio subsystem: the playback controller, the engine seam and the
//! `rodio` implementation behind it.

mod clock;
mod controller;
mod engine;
mod sink;
mod types;

pub use controller::PlaybackController;
pub use engine::{AudioBackend, PlaybackEngine};
pub use sink::{RodioBackend, RodioEngine};
pub use types::{LoadError, PlaybackEvent, Track};

#[cfg(test)]
pub(crate) mod testing;

#[cfg(test)]
mod tests;
