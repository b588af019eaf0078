use std::fs::{self, File};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::{LogSettings, default_log_path};

/// Send `tracing` output to a log file. Writing to the terminal would tear
/// the TUI, so when no file can be created logs are discarded.
pub fn init(settings: &LogSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.level.as_str()));

    let file = settings
        .file
        .clone()
        .or_else(default_log_path)
        .and_then(|path| {
            if let Some(dir) = path.parent() {
                fs::create_dir_all(dir).ok();
            }
            File::create(&path).ok()
        });

    let result = match file {
        Some(file) => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .try_init(),
        None => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::sink)
            .try_init(),
    };
    // A subscriber may already be installed (tests); keep it.
    let _ = result;
}
