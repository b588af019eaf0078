use std::io::Stdout;
use std::time::Instant;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};

use crate::app::{Action, App};
use crate::audio::PlaybackEngine;
use crate::config;
use crate::ui;

/// Main terminal event loop: draws, waits for input until the next sync
/// tick is due, applies actions and runs the tick. Returns `Ok(())` when the
/// user quits.
pub fn run<E: PlaybackEngine>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    settings: &config::Settings,
    app: &mut App<E>,
) -> Result<(), Box<dyn std::error::Error>> {
    while !app.should_quit {
        terminal.draw(|f| ui::draw(f, app, &settings.ui, &settings.controls))?;

        let timeout = app.time_until_tick(Instant::now());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if let Some(action) = action_for_key(key, &settings.controls) {
                        app.dispatch(action);
                    }
                }
                Event::Mouse(mouse) => {
                    let size = terminal.size()?;
                    let area = Rect::new(0, 0, size.width, size.height);
                    if let Some(action) = action_for_mouse(mouse, area, app) {
                        app.dispatch(action);
                    }
                }
                _ => {}
            }
        }

        app.on_tick(Instant::now());
    }

    Ok(())
}

fn action_for_key(key: KeyEvent, controls: &config::ControlsSettings) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    let scrub = controls.scrub_seconds as f64;
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char(' ') | KeyCode::Char('p') => Some(Action::TogglePlayPause),
        KeyCode::Char('h') | KeyCode::Left => Some(Action::ScrubBy(-scrub)),
        KeyCode::Char('l') | KeyCode::Right => Some(Action::ScrubBy(scrub)),
        KeyCode::Char(c) => c
            .to_digit(10)
            .map(|d| Action::SeekFraction(d as f64 / 10.0)),
        _ => None,
    }
}

fn action_for_mouse<E: PlaybackEngine>(
    mouse: MouseEvent,
    screen: Rect,
    app: &App<E>,
) -> Option<Action> {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return None;
    }
    let regions = ui::layout(screen);
    ui::hit_test(regions.waveform, &app.waveform, mouse.column, mouse.row)
}
