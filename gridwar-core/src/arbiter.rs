//! First-capture win arbitration

use serde::{Deserialize, Serialize};

use crate::grid::Board;
use crate::units::{Side, Unit, UnitId};

/// Game result
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "winner", rename_all = "snake_case")]
pub enum GameResult {
    Ongoing,
    Won(Side),
    /// Both sides lost units in the deciding round
    Draw,
}

impl GameResult {
    pub fn is_over(self) -> bool {
        self != GameResult::Ongoing
    }

    pub fn winner(self) -> Option<Side> {
        match self {
            GameResult::Won(side) => Some(side),
            GameResult::Ongoing | GameResult::Draw => None,
        }
    }
}

/// How the deciding capture was attributed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Attribution {
    /// `captor` was the first differing-owner neighbor of `captured`
    Adjacent { captured: UnitId, captor: UnitId },
    /// No differing-owner neighbor found; blamed the side opposite the first captured unit
    Fallback,
    /// Captures on both sides; no winner
    BothSides,
}

/// Arbitration of one round's captures
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub result: GameResult,
    pub attribution: Option<Attribution>,
}

/// Decide the round's result from its captures
///
/// `board` must be the post-move board with the captured units still on it.
pub fn arbitrate(board: &Board, captured: &[Unit]) -> Verdict {
    let Some(first) = captured.first() else {
        return Verdict {
            result: GameResult::Ongoing,
            attribution: None,
        };
    };

    if captured.iter().any(|u| u.owner != first.owner) {
        return Verdict {
            result: GameResult::Draw,
            attribution: Some(Attribution::BothSides),
        };
    }

    for unit in captured {
        if let Some(captor) = board.adjacent_units(unit.pos).find(|n| n.owner != unit.owner) {
            return Verdict {
                result: GameResult::Won(captor.owner),
                attribution: Some(Attribution::Adjacent {
                    captured: unit.id,
                    captor: captor.id,
                }),
            };
        }
    }

    // Unreachable while the capture rule requires an adjacent larger enemy group
    tracing::warn!(
        "no captor adjacent to captured unit {}; awarding win to {}",
        first.id,
        first.owner.opponent()
    );
    Verdict {
        result: GameResult::Won(first.owner.opponent()),
        attribution: Some(Attribution::Fallback),
    }
}
