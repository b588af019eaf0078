//! Pure progress math: time labels, progress fraction and bar highlighting.

/// Format seconds as `MM:SS`, rounding down. There is no hours field, so
/// an hour or more renders as 60+ minutes.
pub fn format_mmss(seconds: f64) -> String {
    let secs = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Fraction of the track elapsed, in `[0, 1]`. A zero or unusable duration
/// yields 0.
pub fn progress(current: f64, duration: f64) -> f64 {
    if !duration.is_finite() || duration <= 0.0 || !current.is_finite() {
        return 0.0;
    }
    (current / duration).clamp(0.0, 1.0)
}

/// Number of leading bars that count as played.
pub fn completed_bars(progress: f64, bar_count: usize) -> usize {
    let scaled = (progress * bar_count as f64).floor();
    if scaled.is_nan() || scaled <= 0.0 {
        0
    } else {
        (scaled as usize).min(bar_count)
    }
}

/// One readout of the playback position, ready to render.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressUpdate {
    pub elapsed: String,
    pub total: String,
    pub progress: f64,
    pub completed: usize,
    /// `highlighted[i]` is true exactly when `i < completed`.
    pub highlighted: Vec<bool>,
}

impl ProgressUpdate {
    pub fn compute(current: f64, duration: f64, bar_count: usize) -> Self {
        let progress = progress(current, duration);
        let completed = completed_bars(progress, bar_count);
        Self {
            elapsed: format_mmss(current),
            total: format_mmss(duration),
            progress,
            completed,
            highlighted: (0..bar_count).map(|i| i < completed).collect(),
        }
    }

    /// Readout shown before anything is loaded.
    pub fn idle(bar_count: usize) -> Self {
        Self::compute(0.0, 0.0, bar_count)
    }

    pub fn is_highlighted(&self, index: usize) -> bool {
        self.highlighted.get(index).copied().unwrap_or(false)
    }
}
