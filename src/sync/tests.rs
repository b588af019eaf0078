use std::path::Path;
use std::time::{Duration, Instant};

use super::*;
use crate::audio::PlaybackController;
use crate::audio::testing::{FakeBackend, FakeEngine};

#[test]
fn format_mmss_floors_and_pads() {
    assert_eq!(format_mmss(0.0), "00:00");
    assert_eq!(format_mmss(65.4), "01:05");
    assert_eq!(format_mmss(59.999), "00:59");
    assert_eq!(format_mmss(600.0), "10:00");
    assert_eq!(format_mmss(-3.0), "00:00");
    assert_eq!(format_mmss(f64::NAN), "00:00");
}

#[test]
fn format_mmss_has_no_hours_field() {
    assert_eq!(format_mmss(3725.0), "62:05");
}

#[test]
fn progress_guards_zero_duration() {
    assert_eq!(progress(10.0, 0.0), 0.0);
    assert_eq!(progress(10.0, -1.0), 0.0);
    assert_eq!(progress(10.0, f64::NAN), 0.0);
    assert_eq!(progress(25.0, 100.0), 0.25);
    assert_eq!(progress(150.0, 100.0), 1.0);
}

#[test]
fn halfway_highlights_first_half_of_bars() {
    let u = ProgressUpdate::compute(50.0, 100.0, 78);
    assert_eq!(u.completed, 39);
    assert!((0..39).all(|i| u.is_highlighted(i)));
    assert!((39..78).all(|i| !u.is_highlighted(i)));
    assert_eq!(u.highlighted.len(), 78);
}

#[test]
fn zero_duration_highlights_nothing() {
    let u = ProgressUpdate::compute(12.0, 0.0, 78);
    assert_eq!(u.progress, 0.0);
    assert_eq!(u.completed, 0);
    assert!(u.highlighted.iter().all(|h| !h));
    assert_eq!(u.total, "00:00");
}

#[test]
fn end_of_track_highlights_every_bar() {
    let u = ProgressUpdate::compute(100.0, 100.0, 78);
    assert_eq!(u.completed, 78);
    assert!(u.highlighted.iter().all(|h| *h));
    assert!(!u.is_highlighted(78));
}

#[test]
fn completed_bars_floors() {
    assert_eq!(completed_bars(0.0, 78), 0);
    assert_eq!(completed_bars(0.999, 78), 77);
    assert_eq!(completed_bars(0.02, 78), 1);
    assert_eq!(completed_bars(1.0, 0), 0);
}

#[test]
fn ticker_fires_once_per_interval_and_stops_after_cancel() {
    let t0 = Instant::now();
    let mut t = Ticker::start(Duration::from_millis(100), t0);
    assert!(!t.is_due(t0));
    assert_eq!(t.time_until_due(t0), Some(Duration::from_millis(100)));

    let t1 = t0 + Duration::from_millis(100);
    assert!(t.is_due(t1));
    assert!(!t.is_due(t1));

    // A long stall collapses into a single tick.
    let t2 = t0 + Duration::from_millis(750);
    assert!(t.is_due(t2));
    assert!(!t.is_due(t2 + Duration::from_millis(50)));

    assert!(t.cancel());
    assert!(!t.cancel());
    assert!(!t.is_due(t2 + Duration::from_secs(10)));
    assert_eq!(t.time_until_due(t2), None);
}

#[test]
fn sync_reads_controller_without_mutating_it() {
    let backend = FakeBackend::with_duration(100.0);
    let mut c: PlaybackController<FakeEngine> = PlaybackController::new();
    c.load(&backend, Path::new("Beat110.mp3")).unwrap();
    c.seek_to_time(50.0);

    let t0 = Instant::now();
    let mut sync = ProgressSync::start(Duration::from_millis(100), 78, t0);
    assert!(sync.poll(t0, &c).is_none());

    let u = sync.poll(t0 + Duration::from_millis(100), &c).unwrap();
    assert_eq!(u.completed, 39);
    assert_eq!(u.elapsed, "00:50");
    assert_eq!(u.total, "01:40");
    assert_eq!(c.current_time(), 50.0);
    assert!(!c.is_playing());
}

#[test]
fn sync_yields_nothing_while_unloaded() {
    let c: PlaybackController<FakeEngine> = PlaybackController::new();
    let t0 = Instant::now();
    let mut sync = ProgressSync::start(Duration::from_millis(100), 78, t0);
    assert!(sync.tick(&c).is_none());
    assert!(sync.poll(t0 + Duration::from_secs(1), &c).is_none());
}

#[test]
fn sync_stops_exactly_once() {
    let t0 = Instant::now();
    let mut sync = ProgressSync::start(Duration::from_millis(100), 78, t0);
    assert_eq!(sync.time_until_tick(t0), Some(Duration::from_millis(100)));
    assert!(sync.stop());
    assert!(!sync.stop());
    assert_eq!(sync.time_until_tick(t0), None);
}
