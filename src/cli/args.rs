use std::path::PathBuf;

use clap::Parser;

use crate::Commands;

/// Main CLI application arguments and command structure
#[derive(Parser, Debug)]
#[clap(
    name = "sistematiza",
    version,
    about = "Local-first personal knowledge repository"
)]
pub struct Cli {
    /// Path to the configuration file
    #[clap(long, value_parser)]
    pub config: Option<PathBuf>,

    /// Directory holding the stored notes (overrides the config file)
    #[clap(long, value_parser)]
    pub data_dir: Option<PathBuf>,

    /// Verbose output mode
    #[clap(short, long)]
    pub verbose: bool,

    /// Subcommands for the sistematiza application
    #[clap(subcommand)]
    pub command: Commands,
}
