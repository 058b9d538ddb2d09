//! tictactoe-q CLI - train, evaluate and play Q-learning Tic-Tac-Toe agents

use anyhow::Result;
use clap::{Parser, Subcommand};
use tictactoe_q::cli::commands::{evaluate, inspect, play, train};

#[derive(Parser)]
#[command(name = "tictactoe-q")]
#[command(version, about = "Tabular Q-learning for Tic-Tac-Toe", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a first-mover or second-mover agent
    Train(Box<train::TrainArgs>),

    /// Play trained agents against each other
    Evaluate(evaluate::EvaluateArgs),

    /// Show learned action values for a state
    Inspect(inspect::InspectArgs),

    /// Play against the trained agents in the terminal
    Play(play::PlayArgs),
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Train(args) => train::execute(*args),
        Commands::Evaluate(args) => evaluate::execute(args),
        Commands::Inspect(args) => inspect::execute(args),
        Commands::Play(args) => play::execute(args),
    }
}
