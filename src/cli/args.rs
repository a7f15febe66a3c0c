use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::StorageBackend;

#[derive(Parser, Debug)]
#[command(name = "wayfarer", version, author, about = "A terminal travel journal for geotagged photos and the places you keep returning to")]
pub struct Cli {
    /// Storage backend (overrides config)
    #[arg(long, global = true, value_enum)]
    pub backend: Option<StorageBackend>,

    /// Directory holding the journal (overrides config)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Record a photo, optionally at a named place
    Capture {
        /// Reference to the image (path or URI; not opened)
        uri: String,
        /// Latitude in degrees (omit, or 0 with --lon 0, for no fix)
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        lat: f64,
        /// Longitude in degrees
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        lon: f64,
        /// Capture time as RFC 3339 (default: now)
        #[arg(long)]
        at: Option<String>,
        /// Place name; matched case-insensitively against existing places
        #[arg(long)]
        place: Option<String>,
        /// Weekly visit goal for a new place
        #[arg(long)]
        goal: Option<u32>,
        /// Free-text note
        #[arg(long)]
        note: Option<String>,
    },
    /// List places with this week's visit progress
    Places,
    /// Show photos taken on a day
    Day {
        /// Date as YYYY-MM-DD (default: today)
        date: Option<String>,
    },
    /// Print a month calendar with photo days highlighted
    Calendar {
        /// Month as YYYY-MM (default: this month)
        #[arg(long)]
        month: Option<String>,
    },
    /// Photo counts for today, this week and this month
    Stats,
    /// Delete a photo by id
    Delete {
        id: String,
    },
    /// Dump all photos and places as JSON to stdout
    Export,
    /// Remove every photo and place
    Clear {
        /// Required; there is no undo
        #[arg(long)]
        yes: bool,
    },
    /// Show the config file location and current settings
    Config {
        /// Write a config file with the current settings if none exists
        #[arg(long)]
        init: bool,
    },
}
