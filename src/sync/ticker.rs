use std::time::{Duration, Instant};

/// A repeating deadline driven by the event loop.
///
/// Nothing runs in the background: the loop asks how long it may block
/// (`time_until_due`) and then whether the tick fired (`is_due`). Once
/// cancelled the ticker never fires again.
#[derive(Debug)]
pub struct Ticker {
    interval: Duration,
    next_due: Option<Instant>,
}

impl Ticker {
    pub fn start(interval: Duration, now: Instant) -> Self {
        let interval = interval.max(Duration::from_millis(1));
        Self {
            interval,
            next_due: Some(now + interval),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns `true` at most once per elapsed deadline and re-arms. Missed
    /// deadlines collapse into one tick.
    pub fn is_due(&mut self, now: Instant) -> bool {
        let Some(due) = self.next_due else {
            return false;
        };
        if now < due {
            return false;
        }
        let mut next = due + self.interval;
        if next <= now {
            next = now + self.interval;
        }
        self.next_due = Some(next);
        true
    }

    /// How long the caller may wait before the next tick. `None` once cancelled.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }

    /// Stop the ticker. Returns `true` only for the call that actually cancelled it.
    pub fn cancel(&mut self) -> bool {
        self.next_due.take().is_some()
    }
}
