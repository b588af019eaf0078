//! Decorative waveform: a fixed row of paired bars with random heights.
//!
//! Bars are laid out pair by pair. Bar `2k` is the lower half of pair `k`
//! (hangs below the centre line) and bar `2k + 1` is the upper half. Only
//! their highlight state changes during playback, and that is derived from
//! progress on every tick rather than stored here.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::WaveformSettings;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BarSide {
    Lower,
    Upper,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WaveformBar {
    pub index: usize,
    pub side: BarSide,
    pub height: f32,
}

#[derive(Debug, Clone)]
pub struct Waveform {
    bars: Vec<WaveformBar>,
    max_height: f32,
}

impl Waveform {
    /// Build a waveform from settings. A configured seed makes the heights
    /// reproducible.
    pub fn generate(settings: &WaveformSettings) -> Self {
        match settings.seed {
            Some(seed) => Self::from_rng(settings, &mut StdRng::seed_from_u64(seed)),
            None => Self::from_rng(settings, &mut rand::rng()),
        }
    }

    fn from_rng<R: Rng>(settings: &WaveformSettings, rng: &mut R) -> Self {
        let (lo, hi) = if settings.min_height <= settings.max_height {
            (settings.min_height, settings.max_height)
        } else {
            (settings.max_height, settings.min_height)
        };

        let mut bars = Vec::with_capacity(settings.pairs * 2);
        for pair in 0..settings.pairs {
            for side in [BarSide::Lower, BarSide::Upper] {
                bars.push(WaveformBar {
                    index: pair * 2 + side_offset(side),
                    side,
                    height: rng.random_range(lo..=hi),
                });
            }
        }

        Self {
            bars,
            max_height: hi,
        }
    }

    pub fn bars(&self) -> &[WaveformBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn pairs(&self) -> usize {
        self.bars.len() / 2
    }

    pub fn max_height(&self) -> f32 {
        self.max_height
    }

    /// The bar at `side` of pair `pair`, if the pair exists.
    pub fn bar(&self, pair: usize, side: BarSide) -> Option<&WaveformBar> {
        self.bars.get(pair * 2 + side_offset(side))
    }

    /// Track fraction a tap on bar `index` seeks to: the start of that bar's
    /// time slice.
    pub fn fraction_for_bar(&self, index: usize) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        (index.min(self.len()) as f64) / (self.len() as f64)
    }
}

fn side_offset(side: BarSide) -> usize {
    match side {
        BarSide::Lower => 0,
        BarSide::Upper => 1,
    }
}

/// Track fraction for a tap at horizontal offset `x` inside a container of
/// width `width`.
pub fn container_fraction(x: f64, width: f64) -> f64 {
    if width.is_nan() || width <= 0.0 || !x.is_finite() {
        return 0.0;
    }
    (x / width).clamp(0.0, 1.0)
}
