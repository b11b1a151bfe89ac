//! Play command - replay a recorded match script
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: load_script(), play_script(), report_replay()
//! - Level 3: print_round()
//! - Level 4: formatting utilities

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use gridwar_core::{Game, GameResult, MatchScript, MoveOutcome, Replay, RoundResult, Side};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// Match script JSON file
    #[arg(long, value_name = "FILE")]
    pub script: PathBuf,

    /// Output the replay as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
///
/// This function reads like a table of contents:
/// 1. Load the script
/// 2. Replay it on a fresh board
/// 3. Report each round and the final position
pub fn run(args: PlayArgs) -> Result<()> {
    let script = load_script(&args)?;

    tracing::info!(
        "Replaying '{}' ({} scripted rounds)",
        script.name,
        script.rounds.len()
    );

    let (game, replay) = play_script(&script)?;

    report_replay(&game, &replay, &args)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn load_script(args: &PlayArgs) -> Result<MatchScript> {
    MatchScript::load(&args.script)
        .with_context(|| format!("Failed to load match script: {}", args.script.display()))
}

/// Replay the script on the standard starting board
fn play_script(script: &MatchScript) -> Result<(Game, Replay)> {
    let mut game = Game::new();
    let replay = script.replay(&mut game)?;

    if replay.unplayed > 0 {
        tracing::info!("Game ended with {} scripted rounds unplayed", replay.unplayed);
    }

    Ok((game, replay))
}

fn report_replay(game: &Game, replay: &Replay, args: &PlayArgs) -> Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(replay)?);
        return Ok(());
    }

    println!("=== {} ===", replay.name);
    for played in &replay.rounds {
        print_round(&played.result);
        for rejected in &played.rejected {
            println!("  ignored {}={} ({:?})", rejected.key, rejected.value, rejected.issue);
        }
    }

    println!("\nResult: {}", describe_result(game.result()));
    println!("\nPlayer view:\n{}", game.view(Side::Player));
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn print_round(round: &RoundResult) {
    println!("Round {}:", round.round);
    for (id, outcome) in &round.moves {
        match outcome {
            MoveOutcome::Moved { to } => println!("  unit {} -> {}", id, to),
            MoveOutcome::Rejected { reason } => println!("  unit {} stays: {}", id, reason),
        }
    }
    if !round.captured.is_empty() {
        println!("  captured: {:?}", round.captured);
    }
    println!("  {} units remain", round.remaining);
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn describe_result(result: GameResult) -> String {
    match result {
        GameResult::Ongoing => "ongoing".to_string(),
        GameResult::Won(side) => format!("{} wins", side),
        GameResult::Draw => "draw".to_string(),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_result() {
        assert_eq!(describe_result(GameResult::Ongoing), "ongoing");
        assert_eq!(describe_result(GameResult::Draw), "draw");
        assert_eq!(describe_result(GameResult::Won(Side::Enemy)), "Enemy wins");
    }

    #[test]
    fn test_play_script_runs_every_round() {
        let script = MatchScript::from_json(
            r#"{"name": "t", "rounds": [{"player": {"red": "up"}}, {"enemy": {"red": "down"}}]}"#,
        )
        .unwrap();
        let (game, replay) = play_script(&script).unwrap();
        assert_eq!(replay.rounds.len(), 2);
        assert_eq!(game.rounds_played(), 2);
    }
}
