mod app;
mod audio;
mod config;
mod runtime;
mod sync;
mod ui;
mod waveform;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
