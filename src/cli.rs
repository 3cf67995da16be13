use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Pluvio design-storm IDF builder.
#[derive(Parser)]
#[command(
    name = "pluvio",
    version,
    about = "Design-storm IDF curves from daily rain-gauge records"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Process a single station file.
    Run(RunArgs),
    /// Process many stations in parallel.
    Batch(BatchArgs),
}

/// Arguments for the `run` subcommand.
#[derive(clap::Args)]
pub struct RunArgs {
    /// Path to the station data file.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "pluvio.toml")]
    pub config: PathBuf,

    /// Override output directory from config.
    #[arg(short, long = "output-dir")]
    pub output_dir: Option<PathBuf>,
}

/// Arguments for the `batch` subcommand.
#[derive(clap::Args)]
pub struct BatchArgs {
    /// Directory whose station files are all processed. Repeatable.
    #[arg(long = "input-dir")]
    pub input_dir: Vec<PathBuf>,

    /// Station code resolved through the data directories. Repeatable.
    #[arg(short, long)]
    pub station: Vec<String>,

    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "pluvio.toml")]
    pub config: PathBuf,

    /// Override output directory from config.
    #[arg(short, long = "output-dir")]
    pub output_dir: Option<PathBuf>,
}
