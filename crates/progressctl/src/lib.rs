//! progressctl - command-line front end for the tutorial progress tracker

pub mod cli;
pub mod commands;

use anyhow::{Context, Result};
use cli::Cli;
use progress_tracker::{FileStore, ProgressTracker, TrackerConfig};
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tracing::debug;

/// Data directory: `--data-dir`, then the config file, then the user data dir
pub fn resolve_data_dir(cli: &Cli, config: &TrackerConfig) -> PathBuf {
    cli.data_dir
        .clone()
        .or_else(|| config.data_dir.clone())
        .unwrap_or_else(FileStore::default_dir)
}

/// Install the stderr subscriber. `RUST_LOG` wins over `--verbose`.
pub fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

pub fn run(cli: Cli) -> Result<()> {
    let config = TrackerConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let data_dir = resolve_data_dir(&cli, &config);
    debug!("Using data directory {}", data_dir.display());

    let mut tracker = ProgressTracker::with_layout(FileStore::new(data_dir), config.course);

    let stdout = io::stdout();
    let stdin = io::stdin();
    let color = stdout.is_terminal();
    commands::execute(&mut tracker, cli.command, &mut stdout.lock(), &mut stdin.lock(), color)
}
