//! UI rendering helpers for the terminal user interface.
//!
//! This module renders the player with `ratatui` and maps mouse clicks on
//! the waveform back to actions. Drawing and hit testing share the same
//! geometry so a click always lands on the bar that is drawn there.

use std::ops::Range;

use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Padding, Paragraph, Widget, Wrap},
};

use crate::app::{Action, App};
use crate::audio::PlaybackEngine;
use crate::config::{ControlsSettings, UiSettings};
use crate::sync::ProgressUpdate;
use crate::waveform::{BarSide, Waveform, WaveformBar};

/// Columns per bar pair: one for the bar, one gap.
const BAR_STRIDE: u16 = 2;
const BAR_SYMBOL: &str = "█";

const LOWER_COLOR: Color = Color::Gray;
const UPPER_COLOR: Color = Color::DarkGray;
const PLAYED_COLOR: Color = Color::White;

/// Render the controls help text, incorporating scrub seconds.
fn controls_text(scrub_seconds: u64) -> String {
    [
        "[space/p] play/pause".to_string(),
        format!("[h/l] scrub -/+{}s", scrub_seconds),
        "[0-9] jump".to_string(),
        "[click] seek".to_string(),
        "[q] quit".to_string(),
    ]
    .join(" | ")
}

/// Screen regions, shared by drawing and hit testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub header: Rect,
    pub waveform_block: Rect,
    /// Inside of the waveform block's border.
    pub waveform: Rect,
    pub labels: Rect,
    pub status: Rect,
    pub controls: Rect,
}

pub fn layout(area: Rect) -> ScreenLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(area);

    ScreenLayout {
        header: chunks[0],
        waveform_block: chunks[1],
        waveform: Block::default().borders(Borders::ALL).inner(chunks[1]),
        labels: chunks[2],
        status: chunks[3],
        controls: chunks[4],
    }
}

/// Where the bars sit inside `container`: horizontally centred, full height.
fn bars_area(container: Rect, pairs: usize) -> Rect {
    let wanted = u32::try_from(pairs)
        .unwrap_or(u32::MAX)
        .saturating_mul(BAR_STRIDE as u32)
        .saturating_sub(1);
    let width = wanted.min(container.width as u32) as u16;
    Rect {
        x: container.x + (container.width - width) / 2,
        y: container.y,
        width,
        height: container.height,
    }
}

/// Vertical placement of bars around the centre line of an area.
struct BarGeometry {
    area: Rect,
    mid: u16,
    upper_half: u16,
    lower_half: u16,
}

impl BarGeometry {
    fn new(area: Rect) -> Self {
        let upper_half = area.height / 2;
        Self {
            area,
            mid: area.y + upper_half,
            upper_half,
            lower_half: area.height - upper_half,
        }
    }

    fn column(&self, pair: usize) -> Option<u16> {
        let dx = u32::try_from(pair)
            .unwrap_or(u32::MAX)
            .saturating_mul(BAR_STRIDE as u32);
        (dx < self.area.width as u32).then(|| self.area.x + dx as u16)
    }

    fn rows(&self, bar: &WaveformBar, max_height: f32) -> Range<u16> {
        let half = match bar.side {
            BarSide::Upper => self.upper_half,
            BarSide::Lower => self.lower_half,
        };
        if half == 0 || max_height <= 0.0 {
            return self.mid..self.mid;
        }
        let scaled = ((bar.height / max_height) * half as f32).ceil() as u16;
        let n = scaled.clamp(1, half);
        match bar.side {
            BarSide::Upper => (self.mid - n)..self.mid,
            BarSide::Lower => self.mid..(self.mid + n),
        }
    }
}

struct WaveformView<'a> {
    waveform: &'a Waveform,
    view: &'a ProgressUpdate,
}

impl Widget for WaveformView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let geo = BarGeometry::new(area);
        for bar in self.waveform.bars() {
            // Bars 2k and 2k+1 share pair k's column.
            let Some(x) = geo.column(bar.index / 2) else {
                break;
            };
            let style = bar_style(bar, self.view.is_highlighted(bar.index));
            for y in geo.rows(bar, self.waveform.max_height()) {
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_symbol(BAR_SYMBOL).set_style(style);
                }
            }
        }
    }
}

fn bar_style(bar: &WaveformBar, played: bool) -> Style {
    let color = match (played, bar.side) {
        (true, _) => PLAYED_COLOR,
        (false, BarSide::Lower) => LOWER_COLOR,
        (false, BarSide::Upper) => UPPER_COLOR,
    };
    Style::default().fg(color)
}

/// Map a click at (`column`, `row`) to an action. Clicks on a drawn bar seek
/// to that bar; anywhere else inside the waveform container seeks by
/// horizontal position. Clicks outside the container are ignored.
pub fn hit_test(container: Rect, waveform: &Waveform, column: u16, row: u16) -> Option<Action> {
    let inside = column >= container.x
        && column < container.right()
        && row >= container.y
        && row < container.bottom();
    if !inside {
        return None;
    }

    let area = bars_area(container, waveform.pairs());
    let geo = BarGeometry::new(area);

    if column >= area.x && column < area.right() {
        let dx = column - area.x;
        if dx % BAR_STRIDE == 0 {
            let pair = (dx / BAR_STRIDE) as usize;
            let side = if row < geo.mid {
                BarSide::Upper
            } else {
                BarSide::Lower
            };
            if let Some(bar) = waveform.bar(pair, side)
                && geo.rows(bar, waveform.max_height()).contains(&row)
            {
                return Some(Action::TapBar(bar.index));
            }
        }
    }

    Some(Action::TapContainer {
        x: column.saturating_sub(area.x) as f64,
        width: area.width as f64,
    })
}

/// Render the entire UI into the provided `frame` using `app` state and settings.
pub fn draw<E: PlaybackEngine>(
    frame: &mut Frame,
    app: &App<E>,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) {
    let regions = layout(frame.area());

    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" waveplay ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, regions.header);

    let mut waveform_block = Block::default().borders(Borders::ALL);
    match app.controller.track() {
        Some(track) => {
            waveform_block = waveform_block
                .title(format!(" {} ", track.title))
                .title_bottom(
                    Line::from(format!(" {} ", track.path.display())).right_aligned(),
                );
        }
        None => waveform_block = waveform_block.title(" no track "),
    }
    frame.render_widget(waveform_block, regions.waveform_block);
    frame.render_widget(
        WaveformView {
            waveform: &app.waveform,
            view: &app.view,
        },
        bars_area(regions.waveform, app.waveform.pairs()),
    );

    // Time labels with the play/pause state between them.
    let label_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(7),
            Constraint::Min(0),
            Constraint::Length(7),
        ])
        .split(regions.labels);
    let glyph = if app.controller.is_playing() {
        "⏸ playing"
    } else {
        "▶ paused"
    };
    let state = format!("{glyph} · {:.0}%", app.view.progress * 100.0);
    frame.render_widget(
        Paragraph::new(format!(" {}", app.view.elapsed)),
        label_chunks[0],
    );
    frame.render_widget(
        Paragraph::new(state)
            .alignment(Alignment::Center)
            .style(Style::default().add_modifier(Modifier::BOLD)),
        label_chunks[1],
    );
    frame.render_widget(
        Paragraph::new(format!("{} ", app.view.total)).alignment(Alignment::Right),
        label_chunks[2],
    );

    if let Some(status) = &app.status {
        frame.render_widget(
            Paragraph::new(format!(" {}", status)).style(Style::default().fg(Color::Red)),
            regions.status,
        );
    }

    let footer = Paragraph::new(controls_text(controls_settings.scrub_seconds))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, regions.controls);
}
