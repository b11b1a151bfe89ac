//! Scripted matches - recorded proposals replayed round by round
//!
//! Each round holds one proposal object per side, in the same
//! color -> direction form the move-proposal collaborator produces.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::GameError;
use crate::game::{Game, RoundResult};
use crate::grid::Board;
use crate::proposal::{decode_entries, Proposal, RejectedInstruction};
use crate::units::Side;

/// Proposals for one round
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScriptRound {
    #[serde(default)]
    pub player: Map<String, Value>,
    #[serde(default)]
    pub enemy: Map<String, Value>,
}

impl ScriptRound {
    /// Decode both sides' proposals against the current board
    pub fn proposals(&self, board: &Board) -> [Proposal; 2] {
        [
            decode_entries(&self.player, board, Side::Player),
            decode_entries(&self.enemy, board, Side::Enemy),
        ]
    }
}

/// A recorded match
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchScript {
    #[serde(default = "default_name")]
    pub name: String,
    pub rounds: Vec<ScriptRound>,
}

fn default_name() -> String {
    "unnamed".to_string()
}

/// One replayed round
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayedRound {
    pub result: RoundResult,
    /// Proposal entries from either side that produced no move
    pub rejected: Vec<RejectedInstruction>,
}

/// Outcome of replaying a script
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Replay {
    pub name: String,
    pub rounds: Vec<PlayedRound>,
    /// Script rounds left over after the game ended
    pub unplayed: usize,
}

impl MatchScript {
    /// Parse from JSON text
    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        let script: Self = serde_json::from_str(text).context("Invalid match script")?;
        Ok(script)
    }

    /// Load from JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_json(&content)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Play the script on `game` until it runs out or the game ends
    pub fn replay(&self, game: &mut Game) -> Result<Replay, GameError> {
        let mut rounds = Vec::new();

        for (index, script_round) in self.rounds.iter().enumerate() {
            if game.is_over() {
                return Ok(Replay {
                    name: self.name.clone(),
                    rounds,
                    unplayed: self.rounds.len() - index,
                });
            }

            let proposals = script_round.proposals(game.board());
            let moves = Proposal::merge(&proposals);
            let result = game.execute_round(&moves)?;
            let rejected = proposals.into_iter().flat_map(|p| p.rejected).collect();
            rounds.push(PlayedRound { result, rejected });
        }

        Ok(Replay {
            name: self.name.clone(),
            rounds,
            unplayed: 0,
        })
    }
}
