//! Periodic progress readout.
//!
//! `ProgressSync` polls the playback controller on a fixed cadence and turns
//! its position into time labels and per-bar highlight flags. It only reads
//! the controller. The sync is started when the view activates and is
//! cancelled exactly once on teardown, either explicitly or on drop.

mod progress;
mod ticker;

use std::time::{Duration, Instant};

use tracing::debug;

use crate::audio::{PlaybackController, PlaybackEngine};

pub use progress::{ProgressUpdate, completed_bars, format_mmss, progress};
pub use ticker::Ticker;

pub struct ProgressSync {
    ticker: Ticker,
    bar_count: usize,
}

impl ProgressSync {
    /// Activate the sync. The first tick fires one `interval` after `now`.
    pub fn start(interval: Duration, bar_count: usize, now: Instant) -> Self {
        let ticker = Ticker::start(interval, now);
        debug!(
            interval_ms = ticker.interval().as_millis() as u64,
            bar_count,
            "progress sync started"
        );
        Self { ticker, bar_count }
    }

    /// Read the controller and compute a fresh update. `None` while nothing
    /// is loaded.
    pub fn tick<E: PlaybackEngine>(
        &self,
        controller: &PlaybackController<E>,
    ) -> Option<ProgressUpdate> {
        if !controller.is_loaded() {
            return None;
        }
        Some(ProgressUpdate::compute(
            controller.current_time(),
            controller.duration(),
            self.bar_count,
        ))
    }

    /// Like `tick`, but only when the cadence says a tick is due.
    pub fn poll<E: PlaybackEngine>(
        &mut self,
        now: Instant,
        controller: &PlaybackController<E>,
    ) -> Option<ProgressUpdate> {
        if self.ticker.is_due(now) {
            self.tick(controller)
        } else {
            None
        }
    }

    pub fn time_until_tick(&self, now: Instant) -> Option<Duration> {
        self.ticker.time_until_due(now)
    }

    /// Cancel the repeating tick. Returns `true` only the first time.
    pub fn stop(&mut self) -> bool {
        let stopped = self.ticker.cancel();
        if stopped {
            debug!("progress sync stopped");
        }
        stopped
    }
}

impl Drop for ProgressSync {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests;
