//! Simulate command - random playouts in parallel
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_config(), run_games(), report_results()
//! - Level 3: compute_statistics()
//! - Level 4: formatting utilities

use anyhow::{ensure, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use gridwar_core::{play_random_game, GameResult, RolloutConfig, RolloutResult, Side};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct SimulateArgs {
    /// Number of games to play
    #[arg(long, default_value = "100")]
    pub games: u64,

    /// Maximum rounds per game
    #[arg(long, default_value = "200")]
    pub max_rounds: u32,

    /// Chance that a unit requests a move each round (0.0-1.0)
    #[arg(long, default_value = "0.75")]
    pub move_probability: f64,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Aggregated simulation results
#[derive(Clone, Debug)]
struct SimulationStats {
    games: Vec<RolloutResult>,
    player_wins: usize,
    enemy_wins: usize,
    draws: usize,
    unfinished: usize,
    avg_rounds: f32,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run simulate command
///
/// This function reads like a table of contents:
/// 1. Build the playout configuration
/// 2. Play all games across the thread pool
/// 3. Report statistics
pub fn run(args: SimulateArgs, seed: Option<u64>) -> Result<()> {
    let config = build_config(&args, seed)?;

    tracing::info!(
        "Simulating {} games (max_rounds={}, move_probability={:.2})",
        args.games,
        config.max_rounds,
        config.move_probability
    );

    let stats = run_games(&config, args.games);

    report_results(&stats, &args);

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn build_config(args: &SimulateArgs, seed: Option<u64>) -> Result<RolloutConfig> {
    ensure!(args.games > 0, "--games must be at least 1");

    let mut config = RolloutConfig::default()
        .with_max_rounds(args.max_rounds)
        .with_move_probability(args.move_probability);
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    Ok(config)
}

/// Play every game; game `i` always uses seed `config.game_seed(i)`
fn run_games(config: &RolloutConfig, games: u64) -> SimulationStats {
    let progress = ProgressBar::new(games);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{bar:40} {pos}/{len} games ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let results: Vec<RolloutResult> = (0..games)
        .into_par_iter()
        .map(|index| {
            let result = play_random_game(config, config.game_seed(index));
            progress.inc(1);
            result
        })
        .collect();

    progress.finish_and_clear();
    compute_statistics(results)
}

fn report_results(stats: &SimulationStats, args: &SimulateArgs) {
    if args.json {
        print_json_results(stats);
    } else {
        print_text_results(stats);
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn compute_statistics(games: Vec<RolloutResult>) -> SimulationStats {
    let count = |want: GameResult| games.iter().filter(|g| g.result == want).count();

    let player_wins = count(GameResult::Won(Side::Player));
    let enemy_wins = count(GameResult::Won(Side::Enemy));
    let draws = count(GameResult::Draw);
    let unfinished = count(GameResult::Ongoing);

    let total_rounds: u64 = games.iter().map(|g| u64::from(g.rounds)).sum();
    let avg_rounds = if games.is_empty() {
        0.0
    } else {
        total_rounds as f32 / games.len() as f32
    };

    SimulationStats {
        games,
        player_wins,
        enemy_wins,
        draws,
        unfinished,
        avg_rounds,
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn percent(part: usize, total: usize) -> f32 {
    if total > 0 {
        part as f32 / total as f32 * 100.0
    } else {
        0.0
    }
}

fn print_json_results(stats: &SimulationStats) {
    #[derive(serde::Serialize)]
    struct JsonOutput<'a> {
        total_games: usize,
        player_wins: usize,
        enemy_wins: usize,
        draws: usize,
        unfinished: usize,
        avg_rounds: f32,
        games: &'a [RolloutResult],
    }

    let output = JsonOutput {
        total_games: stats.games.len(),
        player_wins: stats.player_wins,
        enemy_wins: stats.enemy_wins,
        draws: stats.draws,
        unfinished: stats.unfinished,
        avg_rounds: stats.avg_rounds,
        games: &stats.games,
    };

    if let Ok(json) = serde_json::to_string_pretty(&output) {
        println!("{}", json);
    }
}

fn print_text_results(stats: &SimulationStats) {
    let total = stats.games.len();

    println!("\n=== Simulation Results ===");
    println!("Total games: {}", total);
    println!("Player wins: {} ({:.1}%)", stats.player_wins, percent(stats.player_wins, total));
    println!("Enemy wins:  {} ({:.1}%)", stats.enemy_wins, percent(stats.enemy_wins, total));
    println!("Draws:       {} ({:.1}%)", stats.draws, percent(stats.draws, total));
    println!("Unfinished:  {} ({:.1}%)", stats.unfinished, percent(stats.unfinished, total));
    println!("Avg rounds:  {:.1}", stats.avg_rounds);
}

// ============================================================================
// TESTS
// ============================================================================
