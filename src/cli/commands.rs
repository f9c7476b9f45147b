//! CLI commands and argument parsing

use crate::transform::EventTimeZone;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// playlake - song-play data lake ETL
#[derive(Parser, Debug)]
#[command(name = "playlake")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Job configuration file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Input location (overrides the config file)
    #[arg(short, long, global = true)]
    pub input: Option<String>,

    /// Output location (overrides the config file)
    #[arg(short, long, global = true)]
    pub output: Option<String>,

    /// Timezone for calendar derivation (overrides the config file)
    #[arg(short, long, global = true)]
    pub timezone: Option<EventTimeZone>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run both pipelines (catalog, then activity)
    Run,

    /// Run only the catalog pipeline (songs, artists)
    Catalog,

    /// Run only the activity pipeline (users, time, songplays)
    Activity,
}
