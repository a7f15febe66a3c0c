mod cli;
mod config;
mod db;
mod journal;
mod models;
mod tracker;
mod tui;
mod utils;

use anyhow::{Context, Result};
use clap::Parser;

use cli::args::{Cli, Commands};
use cli::handlers::{self, CaptureArgs};
use config::{AppConfig, StorageBackend};
use db::{JsonStore, SqliteStore, Store};
use journal::Journal;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut config = AppConfig::load().context("Loading config")?;

    // Command-line flags win over the config file
    if let Some(backend) = cli.backend {
        config.storage.backend = backend;
    }
    if let Some(dir) = cli.data_dir {
        config.storage.data_dir = Some(dir);
    }

    // Config inspection never touches the store
    if let Some(Commands::Config { init }) = cli.command {
        return handlers::handle_config(&config, init);
    }

    config.ensure_data_dir()?;
    let store_path = config.store_path()?;
    let zone = config.zone()?;
    let goal = config.journal.default_visit_goal;
    log::debug!("Using {:?} store at {:?}", config.storage.backend, store_path);

    match config.storage.backend {
        StorageBackend::Sqlite => {
            let store = SqliteStore::open(&store_path)
                .with_context(|| format!("Opening database at {:?}", store_path))?;
            run(Journal::new(store, zone, goal), cli.command)
        }
        StorageBackend::Json => {
            let store = JsonStore::open(&store_path)
                .with_context(|| format!("Opening journal at {:?}", store_path))?;
            run(Journal::new(store, zone, goal), cli.command)
        }
    }
}

fn run<S: Store>(mut journal: Journal<S>, command: Option<Commands>) -> Result<()> {
    match command {
        Some(Commands::Capture {
            uri,
            lat,
            lon,
            at,
            place,
            goal,
            note,
        }) => handlers::handle_capture(
            &mut journal,
            CaptureArgs {
                uri,
                lat,
                lon,
                at,
                place,
                goal,
                note,
            },
        ),
        Some(Commands::Places) => handlers::handle_places(&journal),
        Some(Commands::Day { date }) => handlers::handle_day(&journal, date.as_deref()),
        Some(Commands::Calendar { month }) => handlers::handle_calendar(&journal, month.as_deref()),
        Some(Commands::Stats) => handlers::handle_stats(&journal),
        Some(Commands::Delete { id }) => handlers::handle_delete(&mut journal, &id),
        Some(Commands::Export) => handlers::handle_export(&journal),
        Some(Commands::Clear { yes }) => handlers::handle_clear(&mut journal, yes),
        // Handled before the store is opened
        Some(Commands::Config { .. }) => Ok(()),

        // No subcommand → launch TUI
        None => tui::app::run(journal),
    }
}
