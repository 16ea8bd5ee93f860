//! flap32 CLI - train, evaluate, and manage learned models
//!
//! This CLI provides a unified interface for:
//! - Training the Q-learning agent against the simulated world
//! - Evaluating a frozen model
//! - Downloading preset models
//! - Inspecting saved models

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "flap32")]
#[command(version, about = "Q-learning agent for a 32x32 flappy game", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train the agent
    Train(flap32::cli::commands::train::TrainArgs),

    /// Evaluate a trained model without learning
    Evaluate(flap32::cli::commands::evaluate::EvaluateArgs),

    /// Download a preset model
    Fetch(flap32::cli::commands::fetch::FetchArgs),

    /// Inspect a saved model
    Inspect(flap32::cli::commands::inspect::InspectArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Train(args) => flap32::cli::commands::train::execute(args),
        Commands::Evaluate(args) => flap32::cli::commands::evaluate::execute(args),
        Commands::Fetch(args) => flap32::cli::commands::fetch::execute(args),
        Commands::Inspect(args) => flap32::cli::commands::inspect::execute(args),
    }
}
