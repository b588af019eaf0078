use std::env;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::app::App;
use crate::audio::{PlaybackController, RodioBackend, RodioEngine};
use crate::waveform::Waveform;

mod event_loop;
mod logging;
mod settings;
mod terminal;

use terminal::TerminalGuard;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, config_warning) = settings::load_settings();
    logging::init(&settings.log);
    if let Some(why) = config_warning {
        warn!("{why}");
    }

    let resource = env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| settings.audio.resource.clone());

    // The backend owns the output stream and must outlive the app's engine.
    let backend = RodioBackend::open_default();
    let mut controller: PlaybackController<RodioEngine> = PlaybackController::new();
    let load_error = match &backend {
        Ok(backend) => controller.load(backend, &resource).err(),
        Err(e) => {
            warn!(error = %e, "no audio output, running without a track");
            None
        }
    };

    let mut app = App::new(controller, Waveform::generate(&settings.waveform));
    match (&backend, load_error) {
        (Err(e), _) => app.set_status(e.to_string()),
        (Ok(_), Some(e)) => app.set_status(e.to_string()),
        (Ok(_), None) => {}
    }

    install_panic_hook();
    enable_raw_mode()?;
    let _restore = TerminalGuard::new(std::io::stdout());
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend_tui = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend_tui)?;

    app.activate(Duration::from_millis(settings.sync.tick_ms), Instant::now());
    info!(resource = %resource.display(), "player started");

    let run_result = event_loop::run(&mut terminal, &settings, &mut app);

    app.deactivate();

    info!("player stopped");
    run_result
}

/// Restore the terminal before the default panic output is printed.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(std::io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));
}
