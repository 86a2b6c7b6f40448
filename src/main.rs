//! ticklist - A terminal task list with drag-and-drop reordering.
//!
//! This is the main binary that loads configuration, restores the stored
//! task list, and launches the TUI application.

use std::{fs::OpenOptions, path::PathBuf, sync::Mutex};

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use ticklist_config::{Config, FileStorage, LoggingConfig, StatePersistence};
use ticklist_protocol::TaskStore;
use ticklist_tui::{App, terminal};

#[derive(Debug, Parser)]
#[command(name = "ticklist")]
#[command(about = "A terminal task list with drag-and-drop reordering")]
#[command(version)]
struct Cli {
    /// Configuration file to use instead of the default locations
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Directory holding the stored task list
    #[arg(long, value_name = "DIR")]
    storage_dir: Option<PathBuf>,

    /// Minimum log level (trace, debug, info, warn, error, off)
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli).await?;
    init_tracing(&config.logging)?;

    let directory = config.storage.resolved_directory()?;
    info!(directory = %directory.display(), key = %config.storage.key, "starting ticklist");

    let persistence =
        StatePersistence::with_key(FileStorage::new(directory), config.storage.key.clone());
    let mut store = TaskStore::hydrate(persistence.load_or_default());
    store.subscribe(Box::new(persistence));

    // Install panic hook to restore terminal on panic
    terminal::install_panic_hook();
    let mut terminal = terminal::setup_terminal()?;

    let mut app = App::new(store);
    let result = app.run(&mut terminal).await;

    // Always restore terminal, even if app.run() failed
    terminal::restore_terminal(&mut terminal)?;

    info!(tasks = app.state().store.len(), "exiting");
    result
}

/// Loads configuration with file, then environment, then CLI precedence.
async fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::load().await?,
    };
    config.apply_env();

    if let Some(dir) = &cli.storage_dir {
        config.storage.directory = Some(dir.clone());
    }
    if let Some(level) = &cli.log_level {
        config.logging.level.clone_from(level);
    }
    config.validate()?;
    Ok(config)
}

/// Sends logs to the configured file, since the TUI owns the terminal.
fn init_tracing(logging: &LoggingConfig) -> anyhow::Result<()> {
    let path = logging.resolved_file()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.level.to_ascii_lowercase()));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}
