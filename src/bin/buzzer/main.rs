//! buzzer - interactive console for the buzzer peripheral
//!
//! Run with: cargo run --bin buzzer
//! Logs go to buzzer.log (filter with RUST_LOG, default "info").

mod app;
mod bench;
mod ui;

use std::fs::File;
use std::sync::Mutex;

use color_eyre::eyre::{Result as EyreResult, WrapErr};
use tracing_subscriber::EnvFilter;

use app::BuzzerApp;

const LOG_FILE: &str = "buzzer.log";

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    init_logging()?;

    let mut terminal = ratatui::init();
    let result = BuzzerApp::new().run(&mut terminal);
    ratatui::restore();
    result
}

/// The terminal belongs to the UI, so log lines go to a file
fn init_logging() -> EyreResult<()> {
    let file = File::create(LOG_FILE).wrap_err_with(|| format!("failed to create {LOG_FILE}"))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
