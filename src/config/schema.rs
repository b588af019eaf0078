use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/waveplay/config.toml` or `~/.config/waveplay/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `WAVEPLAY__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub audio: AudioSettings,
    pub sync: SyncSettings,
    pub waveform: WaveformSettings,
    pub controls: ControlsSettings,
    pub ui: UiSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Audio file played when no path is given on the command line.
    pub resource: PathBuf,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            resource: PathBuf::from("Beat110.mp3"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SyncSettings {
    /// How often the progress readout refreshes (milliseconds).
    pub tick_ms: u64,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self { tick_ms: 100 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WaveformSettings {
    /// Number of lower/upper bar pairs. The waveform has twice as many bars.
    pub pairs: usize,
    /// Smallest bar height, in the same units as `max_height`.
    pub min_height: f32,
    /// Largest bar height. Drawn bars are scaled against this.
    pub max_height: f32,
    /// Fixed seed for the bar heights. Random per launch when unset.
    pub seed: Option<u64>,
}

impl Default for WaveformSettings {
    fn default() -> Self {
        Self {
            pairs: 39,
            min_height: 7.0,
            max_height: 20.0,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Number of seconds to scrub when pressing `h` / `l`.
    pub scrub_seconds: u64,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self { scrub_seconds: 5 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ now playing ~ ".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Log file. Defaults to `$XDG_STATE_HOME/waveplay/waveplay.log`.
    pub file: Option<PathBuf>,
    /// Filter used when `RUST_LOG` is not set.
    pub level: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            file: None,
            level: "info".to_string(),
        }
    }
}
