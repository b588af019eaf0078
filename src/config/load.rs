use std::{env, path::PathBuf};

use super::schema::Settings;

/// Upper bound on bar pairs, far beyond any terminal width.
const MAX_WAVEFORM_PAIRS: usize = 1024;

/// Configuration loading helpers.
///
/// `Settings::load` reads an optional config file, then layers environment
/// variables (prefix `WAVEPLAY__`) on top, and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("WAVEPLAY")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.sync.tick_ms == 0 {
            return Err("sync.tick_ms must be >= 1".to_string());
        }
        if self.waveform.pairs == 0 {
            return Err("waveform.pairs must be >= 1".to_string());
        }
        if self.waveform.pairs > MAX_WAVEFORM_PAIRS {
            return Err(format!("waveform.pairs must be <= {MAX_WAVEFORM_PAIRS}"));
        }
        let w = &self.waveform;
        if !(w.min_height.is_finite() && w.max_height.is_finite()) || w.min_height <= 0.0 {
            return Err("waveform heights must be positive numbers".to_string());
        }
        if w.max_height < w.min_height {
            return Err("waveform.max_height must be >= waveform.min_height".to_string());
        }
        Ok(())
    }
}

/// Resolve the config path from `WAVEPLAY_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("WAVEPLAY_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/waveplay/config.toml`
/// or `~/.config/waveplay/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    xdg_dir("XDG_CONFIG_HOME", ".config").map(|d| d.join("waveplay").join("config.toml"))
}

/// Compute the default log file under `$XDG_STATE_HOME/waveplay/waveplay.log`
/// or `~/.local/state/waveplay/waveplay.log`.
pub fn default_log_path() -> Option<PathBuf> {
    xdg_dir("XDG_STATE_HOME", ".local/state").map(|d| d.join("waveplay").join("waveplay.log"))
}

fn xdg_dir(var: &str, home_fallback: &str) -> Option<PathBuf> {
    if let Some(xdg) = env::var_os(var) {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(home_fallback))
    }
}
