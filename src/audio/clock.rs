use std::time::Instant;

/// Elapsed-time bookkeeping for an engine whose device cannot report its
/// own position: time accumulated while paused plus the span since the last
/// start.
///
/// Every call takes `now` so the arithmetic is exact and testable.
#[derive(Debug, Default)]
pub(super) struct PlaybackClock {
    accumulated: f64,
    started_at: Option<Instant>,
}

impl PlaybackClock {
    pub(super) fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    pub(super) fn start(&mut self, now: Instant) {
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
    }

    pub(super) fn stop(&mut self, now: Instant) {
        if let Some(st) = self.started_at.take() {
            self.accumulated += now.saturating_duration_since(st).as_secs_f64();
        }
    }

    pub(super) fn elapsed(&self, now: Instant) -> f64 {
        let running = self
            .started_at
            .map_or(0.0, |st| now.saturating_duration_since(st).as_secs_f64());
        self.accumulated + running
    }

    /// Jump to `seconds`, keeping the running state.
    pub(super) fn set(&mut self, seconds: f64, now: Instant) {
        self.accumulated = seconds;
        if self.started_at.is_some() {
            self.started_at = Some(now);
        }
    }

    /// Report end-of-track once: when running and the output has `drained`,
    /// rewind to 0, stop, and return `true`.
    pub(super) fn end_of_track(&mut self, drained: bool) -> bool {
        if !drained || self.started_at.is_none() {
            return false;
        }
        self.started_at = None;
        self.accumulated = 0.0;
        true
    }
}
