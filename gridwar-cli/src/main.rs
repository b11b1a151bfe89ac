//! GRIDWAR CLI - Debug tooling for the game engine
//!
//! Commands:
//! - show: Print the starting board (text view, debug grid or JSON summary)
//! - play: Replay a recorded match script
//! - simulate: Run many random games in parallel and report statistics

mod play_cmd;
mod show_cmd;
mod simulate_cmd;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gridwar")]
#[command(about = "GRIDWAR simultaneous-move grid combat engine")]
struct Cli {
    /// Random seed for reproducible runs
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the starting board
    Show(show_cmd::ShowArgs),
    /// Replay a match script
    Play(play_cmd::PlayArgs),
    /// Run random games and report statistics
    Simulate(simulate_cmd::SimulateArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging (RUST_LOG, default info)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Show(args) => show_cmd::run(args),
        Commands::Play(args) => play_cmd::run(args),
        Commands::Simulate(args) => simulate_cmd::run(args, cli.seed),
    }
}
