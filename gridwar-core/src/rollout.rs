//! Random playouts
//!
//! Stand-in intents for simulation and testing: each live unit of a side
//! asks to move in a uniformly random direction with a fixed probability.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::arbiter::GameResult;
use crate::board::DIRECTIONS;
use crate::config::RolloutConfig;
use crate::game::Game;
use crate::grid::Board;
use crate::movement::MoveSet;
use crate::units::{Side, UnitId};

/// Result of a random playout
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolloutResult {
    /// Final game result (Ongoing if the round limit was hit)
    pub result: GameResult,
    /// Rounds played
    pub rounds: u32,
    /// Units captured in the deciding round
    pub captured: Vec<UnitId>,
    pub seed: u64,
}

/// Random intents for every live unit of `side`
pub fn random_intents<R: Rng>(
    board: &Board,
    side: Side,
    config: &RolloutConfig,
    rng: &mut R,
) -> MoveSet {
    let mut moves = MoveSet::new();
    for unit in board.units_of(side) {
        if rng.gen_bool(config.move_probability) {
            let direction = DIRECTIONS[rng.gen_range(0..DIRECTIONS.len())];
            moves.insert(unit.id, direction);
        }
    }
    moves
}

/// Play one game with random intents for both sides
pub fn play_random_game(config: &RolloutConfig, seed: u64) -> RolloutResult {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut game = Game::new();
    let mut captured = Vec::new();

    while !game.is_over() && game.rounds_played() < config.max_rounds {
        let mut moves = random_intents(game.board(), Side::Player, config, &mut rng);
        moves.extend(random_intents(game.board(), Side::Enemy, config, &mut rng));

        let Ok(round) = game.execute_round(&moves) else {
            break;
        };
        captured = round.captured;
    }

    RolloutResult {
        result: game.result(),
        rounds: game.rounds_played(),
        captured,
        seed,
    }
}
