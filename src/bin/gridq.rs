//! gridq CLI - tabular Q-learning on a grid world
//!
//! This CLI provides:
//! - Training an agent and writing the table, learning curve, policy and summary
//! - Replaying a trained (or random) policy frame by frame

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gridq")]
#[command(version, about = "Tabular Q-learning on a grid world", long_about = None)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a Q-learning agent
    Train(Box<gridq::cli::commands::train::TrainArgs>),

    /// Replay a trained policy
    Demo(gridq::cli::commands::demo::DemoArgs),
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Train(args) => gridq::cli::commands::train::execute(*args),
        Commands::Demo(args) => gridq::cli::commands::demo::execute(args),
    }
}
