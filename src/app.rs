//! Application module: exposes the app model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds the playback controller,
//! the waveform and the latest progress readout.

mod model;

pub use model::*;
