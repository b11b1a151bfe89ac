//! GRIDWAR Core - Game state engine
//!
//! This crate provides the core game logic for GRIDWAR:
//! - Board geometry (10x10 grid, orthogonal directions)
//! - Board aggregate owning every unit
//! - Simultaneous movement resolution with conflict detection
//! - Connected-group capture analysis
//! - First-capture win arbitration
//! - Text board view, proposal decoding and match scripts
//! - Seeded random playouts

pub mod arbiter;
pub mod board;
pub mod capture;
pub mod config;
pub mod error;
pub mod game;
pub mod grid;
pub mod movement;
pub mod proposal;
pub mod rollout;
pub mod script;
pub mod units;
pub mod view;

// Re-exports for convenient access
pub use arbiter::{arbitrate, Attribution, GameResult, Verdict};
pub use board::{Direction, Pos, BOARD_SIZE, DIRECTIONS};
pub use capture::{connected_group, find_captures, group_size, Groups};
pub use config::RolloutConfig;
pub use error::GameError;
pub use game::{Game, RoundResult};
pub use grid::Board;
pub use movement::{resolve_moves, MoveOutcome, MoveReport, MoveSet, RejectReason};
pub use proposal::{decode_proposal, Proposal, ProposalIssue, RejectedInstruction};
pub use rollout::{play_random_game, random_intents, RolloutResult};
pub use script::{MatchScript, Replay, ScriptRound};
pub use units::{Color, Side, Unit, UnitId, COLORS};
pub use view::{render_view, BoardView, GameSummary, ViewCell};
