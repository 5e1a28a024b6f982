mod actions;
mod app;
mod config;
mod display;
mod endpoints;
mod error;
mod export;
mod request;
mod state;
mod summary;
mod table;
mod token;
mod types;
mod ui;
mod utils;

use app::App;
use color_eyre::Result;
use color_eyre::eyre::eyre;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// The terminal belongs to the UI, so logs go to a file
const LOG_FILE: &str = "/tmp/token-usage-tui.log";

fn init_logging() -> Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(LOG_FILE)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| eyre!("failed to initialise logging: {e}"))
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_logging()?;

    let settings = config::Settings::load()?;
    tracing::info!(endpoints = settings.endpoints.len(), "starting");

    let app = App::new(settings)?;
    let terminal = ratatui::init();
    let app_result = app.run(terminal).await;
    ratatui::restore();
    app_result
}
