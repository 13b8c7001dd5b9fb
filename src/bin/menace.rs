//! MENACE CLI - train, evaluate and play against tic-tac-toe learners

use anyhow::Result;
use clap::{Parser, Subcommand};
use menace_engine::cli::commands::{evaluate, play, train};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "menace")]
#[command(version, about = "Tic-tac-toe engine with MENACE and Monte-Carlo learners", long_about = None)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a matchbox or Monte-Carlo learner
    Train(Box<train::TrainArgs>),

    /// Evaluate a saved matchbox agent without further learning
    Evaluate(evaluate::EvaluateArgs),

    /// Play against an agent from the terminal
    Play(play::PlayArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Train(args) => train::execute(*args),
        Commands::Evaluate(args) => evaluate::execute(args),
        Commands::Play(args) => play::execute(args),
    }
}
