use std::{fs::OpenOptions, path::Path, sync::Mutex};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use wrapsnake::app::App;
use wrapsnake::config::Config;

fn main() -> Result<()> {
    let config = Config::parse();
    init_tracing(config.log_file.as_deref())?;

    info!(speed = config.speed, seed = ?config.seed, "starting");
    let mut app = App::new(&config, config.rng())?;
    app.run()?;
    Ok(())
}

// The game owns the terminal, so logs only go to a file when asked for.
fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
    Ok(())
}
