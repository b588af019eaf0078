use std::path::Path;
use std::sync::mpsc::TryRecvError;
use std::time::{Duration, Instant};

use super::clock::PlaybackClock;
use super::testing::{FakeBackend, FakeEngine};
use super::*;

fn loaded(duration: f64) -> (PlaybackController<FakeEngine>, FakeBackend) {
    let backend = FakeBackend::with_duration(duration);
    let mut c = PlaybackController::new();
    c.load(&backend, Path::new("/music/Beat110.mp3")).unwrap();
    (c, backend)
}

#[test]
fn load_builds_track_from_path_and_engine_duration() {
    let backend = FakeBackend::with_duration(187.5);
    let mut c: PlaybackController<FakeEngine> = PlaybackController::new();
    let track = c.load(&backend, Path::new("/music/Beat110.mp3")).unwrap();
    assert_eq!(track.title, "Beat110");
    assert_eq!(track.duration, 187.5);
    assert!(c.is_loaded());
    assert!(!c.is_playing());
    assert_eq!(c.current_time(), 0.0);
}

#[test]
fn failed_load_leaves_controller_unloaded_and_inert() {
    let backend = FakeBackend::failing();
    let mut c: PlaybackController<FakeEngine> = PlaybackController::new();
    let err = c.load(&backend, Path::new("/nope.mp3")).unwrap_err();
    assert!(matches!(err, LoadError::Missing { .. }));
    assert!(!c.is_loaded());

    c.toggle_play_pause();
    c.seek_to_fraction(0.5);
    c.seek_to_time(10.0);
    c.seek_by(3.0);
    c.poll_engine();
    assert!(!c.is_playing());
    assert_eq!(c.current_time(), 0.0);
    assert_eq!(c.duration(), 0.0);
    assert!(c.track().is_none());
}

#[test]
fn toggle_play_pause_twice_restores_state() {
    let (mut c, _b) = loaded(100.0);
    c.seek_to_time(12.0);
    c.toggle_play_pause();
    assert!(c.is_playing());
    c.toggle_play_pause();
    assert!(!c.is_playing());
    assert_eq!(c.current_time(), 12.0);
}

#[test]
fn seek_to_time_in_range_reads_back_exactly() {
    let (mut c, _b) = loaded(213.37);
    for t in [0.0, 0.1, 33.333, 106.685, 213.37] {
        c.seek_to_time(t);
        assert_eq!(c.current_time(), t);
        c.seek_to_time(t);
        assert_eq!(c.current_time(), t);
    }
}

#[test]
fn seek_to_time_clamps_out_of_range() {
    let (mut c, _b) = loaded(100.0);
    c.seek_to_time(-4.0);
    assert_eq!(c.current_time(), 0.0);
    c.seek_to_time(250.0);
    assert_eq!(c.current_time(), 100.0);
    c.seek_to_time(f64::NAN);
    assert_eq!(c.current_time(), 0.0);
}

#[test]
fn seek_to_fraction_scales_by_duration() {
    let (mut c, _b) = loaded(80.0);
    c.seek_to_fraction(0.0);
    assert_eq!(c.current_time(), 0.0);
    c.seek_to_fraction(0.25);
    assert_eq!(c.current_time(), 20.0);
    c.seek_to_fraction(1.0);
    assert_eq!(c.current_time(), 80.0);
    c.seek_to_fraction(1.7);
    assert_eq!(c.current_time(), 80.0);
    c.seek_to_fraction(-0.2);
    assert_eq!(c.current_time(), 0.0);
}

#[test]
fn seek_by_scrubs_relative_and_clamps() {
    let (mut c, _b) = loaded(30.0);
    c.seek_to_time(10.0);
    c.seek_by(5.0);
    assert_eq!(c.current_time(), 15.0);
    c.seek_by(-20.0);
    assert_eq!(c.current_time(), 0.0);
    c.seek_by(100.0);
    assert_eq!(c.current_time(), 30.0);
}

#[test]
fn finish_while_playing_pauses_and_notifies_once() {
    let (mut c, backend) = loaded(60.0);
    let events = c.subscribe();
    c.toggle_play_pause();

    backend.finish_track();
    c.poll_engine();
    assert!(!c.is_playing());
    assert_eq!(events.try_recv(), Ok(PlaybackEvent::Finished));

    // Nothing else changes until the user acts.
    c.poll_engine();
    c.poll_engine();
    assert!(!c.is_playing());
    assert_eq!(events.try_recv(), Err(TryRecvError::Empty));

    c.toggle_play_pause();
    assert!(c.is_playing());
}

#[test]
fn dropped_subscribers_are_pruned() {
    let (mut c, backend) = loaded(60.0);
    let kept = c.subscribe();
    drop(c.subscribe());
    c.toggle_play_pause();
    backend.finish_track();
    c.poll_engine();
    assert_eq!(kept.try_recv(), Ok(PlaybackEvent::Finished));
}

fn secs(s: f64) -> Duration {
    Duration::from_secs_f64(s)
}

#[test]
fn clock_counts_only_while_running() {
    let t0 = Instant::now();
    let mut clock = PlaybackClock::default();
    assert_eq!(clock.elapsed(t0 + secs(3.0)), 0.0);

    clock.start(t0);
    assert!(clock.is_running());
    assert_eq!(clock.elapsed(t0 + secs(1.5)), 1.5);

    clock.stop(t0 + secs(1.5));
    assert!(!clock.is_running());
    assert_eq!(clock.elapsed(t0 + secs(10.0)), 1.5);

    // A second start resumes from the paused position.
    clock.start(t0 + secs(10.0));
    assert_eq!(clock.elapsed(t0 + secs(12.0)), 3.5);
}

#[test]
fn clock_start_and_stop_are_idempotent() {
    let t0 = Instant::now();
    let mut clock = PlaybackClock::default();
    clock.start(t0);
    clock.start(t0 + secs(1.0));
    assert_eq!(clock.elapsed(t0 + secs(2.0)), 2.0);

    clock.stop(t0 + secs(2.0));
    clock.stop(t0 + secs(5.0));
    assert_eq!(clock.elapsed(t0 + secs(5.0)), 2.0);
}

#[test]
fn clock_set_while_paused_reads_back_exactly() {
    let t0 = Instant::now();
    let mut clock = PlaybackClock::default();
    clock.start(t0);
    clock.stop(t0 + secs(4.0));

    clock.set(61.3, t0 + secs(5.0));
    assert!(!clock.is_running());
    assert_eq!(clock.elapsed(t0 + secs(30.0)), 61.3);
}

#[test]
fn clock_set_while_running_advances_from_the_new_position() {
    let t0 = Instant::now();
    let mut clock = PlaybackClock::default();
    clock.start(t0);

    let at = t0 + secs(8.0);
    clock.set(42.0, at);
    assert!(clock.is_running());
    assert_eq!(clock.elapsed(at), 42.0);
    assert_eq!(clock.elapsed(at + secs(2.0)), 44.0);
}

#[test]
fn clock_end_of_track_rewinds_once_and_only_while_running() {
    let t0 = Instant::now();
    let mut clock = PlaybackClock::default();

    // Paused with an empty output is not a finish.
    assert!(!clock.end_of_track(true));

    clock.start(t0);
    assert!(!clock.end_of_track(false));
    assert_eq!(clock.elapsed(t0 + secs(3.0)), 3.0);

    assert!(clock.end_of_track(true));
    assert!(!clock.is_running());
    assert_eq!(clock.elapsed(t0 + secs(9.0)), 0.0);
    assert!(!clock.end_of_track(true));
}
