//! Application model types: `App` and `Action`.
//!
//! The `App` struct ties the playback controller to the waveform and to the
//! latest progress readout the UI renders. Every user action is applied
//! synchronously, so the following tick always reads the new state.

use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::audio::{PlaybackController, PlaybackEngine, PlaybackEvent};
use crate::sync::{ProgressSync, ProgressUpdate};
use crate::waveform::{Waveform, container_fraction};

/// Poll timeout used when no sync is running.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// A user intent, already decoded from keys or mouse input.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Action {
    TogglePlayPause,
    /// Seek to a fraction of the track.
    SeekFraction(f64),
    /// A tap landed on the bar with this index.
    TapBar(usize),
    /// A tap landed inside the waveform container, `x` cells from its left edge.
    TapContainer { x: f64, width: f64 },
    /// Scrub by this many seconds.
    ScrubBy(f64),
    Quit,
}

/// The main application model.
pub struct App<E: PlaybackEngine> {
    pub controller: PlaybackController<E>,
    pub waveform: Waveform,
    /// Latest readout. Derived from the controller, never edited directly.
    pub view: ProgressUpdate,
    /// One-line message for the user, e.g. why nothing is loaded.
    pub status: Option<String>,
    pub should_quit: bool,
    events: Receiver<PlaybackEvent>,
    sync: Option<ProgressSync>,
}

impl<E: PlaybackEngine> App<E> {
    pub fn new(mut controller: PlaybackController<E>, waveform: Waveform) -> Self {
        let events = controller.subscribe();
        let view = ProgressUpdate::idle(waveform.len());
        let mut app = Self {
            controller,
            waveform,
            view,
            status: None,
            should_quit: false,
            events,
            sync: None,
        };
        app.refresh();
        app
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    /// Start the periodic progress sync. Does nothing if it is already running.
    pub fn activate(&mut self, interval: Duration, now: Instant) {
        if self.sync.is_none() {
            self.sync = Some(ProgressSync::start(interval, self.waveform.len(), now));
        }
        self.refresh();
    }

    /// Tear the sync down. Returns `true` only when a running sync was stopped.
    pub fn deactivate(&mut self) -> bool {
        self.sync.take().is_some_and(|mut sync| sync.stop())
    }

    /// How long the event loop may block waiting for input.
    pub fn time_until_tick(&self, now: Instant) -> Duration {
        self.sync
            .as_ref()
            .and_then(|s| s.time_until_tick(now))
            .unwrap_or(IDLE_POLL)
    }

    /// Apply a user action.
    pub fn dispatch(&mut self, action: Action) {
        debug!(?action, "dispatch");
        match action {
            Action::TogglePlayPause => self.controller.toggle_play_pause(),
            Action::SeekFraction(f) => self.controller.seek_to_fraction(f),
            Action::TapBar(index) => {
                let f = self.waveform.fraction_for_bar(index);
                self.controller.seek_to_fraction(f);
            }
            Action::TapContainer { x, width } => {
                self.controller.seek_to_fraction(container_fraction(x, width));
            }
            Action::ScrubBy(secs) => self.controller.seek_by(secs),
            Action::Quit => {
                self.should_quit = true;
                self.deactivate();
            }
        }
        self.refresh();
    }

    /// Run one pass of the loop's housekeeping: pick up end-of-track,
    /// handle controller events and take a readout when the sync is due.
    pub fn on_tick(&mut self, now: Instant) {
        self.controller.poll_engine();

        while let Ok(event) = self.events.try_recv() {
            match event {
                PlaybackEvent::Finished => {
                    debug!("finished event received");
                    self.refresh();
                }
            }
        }

        if let Some(sync) = self.sync.as_mut()
            && let Some(update) = sync.poll(now, &self.controller)
        {
            self.view = update;
        }
    }

    fn refresh(&mut self) {
        self.view = ProgressUpdate::compute(
            self.controller.current_time(),
            self.controller.duration(),
            self.waveform.len(),
        );
    }
}
