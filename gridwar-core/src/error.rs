//! Error types for caller-contract and boundary failures
//!
//! Rejected moves are not errors: they are reported per unit as a
//! [`RejectReason`](crate::movement::RejectReason).

use crate::board::Pos;
use crate::units::UnitId;

/// Errors raised by the game engine and its text/JSON boundaries
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("game is already over; start a new game to play again")]
    GameOver,

    #[error("unrecognized direction: {0:?}")]
    UnknownDirection(String),

    #[error("unrecognized color: {0:?}")]
    UnknownColor(String),

    #[error("unrecognized side: {0:?}")]
    UnknownSide(String),

    #[error("position {0} is outside the board")]
    OutOfBounds(Pos),

    #[error("position {0} is already occupied")]
    CellOccupied(Pos),

    #[error("no unit with id {0}")]
    UnitNotFound(UnitId),

    #[error("malformed proposal: {0}")]
    MalformedProposal(#[from] serde_json::Error),

    #[error("proposal must be a JSON object mapping colors to directions")]
    ProposalNotObject,

    #[error("malformed board view at line {line}: {reason}")]
    MalformedView { line: usize, reason: String },
}
