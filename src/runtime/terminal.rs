use std::io::Write;

use crossterm::cursor::Show;
use crossterm::event::DisableMouseCapture;
use crossterm::execute;
use crossterm::terminal::{LeaveAlternateScreen, disable_raw_mode};

/// Puts the terminal back the way we found it when dropped.
///
/// Create it right after raw mode is enabled so every later exit path,
/// including a failed screen or mouse setup, restores the terminal.
pub struct TerminalGuard<W: Write> {
    out: W,
}

impl<W: Write> TerminalGuard<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> Drop for TerminalGuard<W> {
    fn drop(&mut self) {
        // Leaving a screen we never entered is harmless.
        let _ = disable_raw_mode();
        let _ = execute!(self.out, LeaveAlternateScreen, DisableMouseCapture, Show);
    }
}
