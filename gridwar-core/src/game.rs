//! Game state and round execution

use serde::{Deserialize, Serialize};

use crate::arbiter::{arbitrate, Attribution, GameResult};
use crate::capture::{find_captures, group_size, remove_captured};
use crate::error::GameError;
use crate::grid::Board;
use crate::movement::{resolve_moves, MoveReport, MoveSet};
use crate::units::{Side, UnitId};
use crate::view::{render_view, GameSummary};

/// Everything that happened in one round
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    /// 1-based round number
    pub round: u32,
    /// Outcome per requested unit id
    pub moves: MoveReport,
    /// Captured unit ids, in id order
    pub captured: Vec<UnitId>,
    /// Live units after removal
    pub remaining: usize,
    pub winner: Option<Side>,
    pub game_over: bool,
    pub result: GameResult,
    pub attribution: Option<Attribution>,
}

/// A single game; rounds are executed through `&mut self`, one at a time
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    result: GameResult,
    /// Rounds executed so far
    round: u32,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// New game with the standard starting layout
    pub fn new() -> Self {
        Self::from_board(Board::standard())
    }

    /// New game from a custom position
    pub fn from_board(board: Board) -> Self {
        Self {
            board,
            result: GameResult::Ongoing,
            round: 0,
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn result(&self) -> GameResult {
        self.result
    }

    pub fn is_over(&self) -> bool {
        self.result.is_over()
    }

    pub fn winner(&self) -> Option<Side> {
        self.result.winner()
    }

    /// Rounds executed so far
    pub fn rounds_played(&self) -> u32 {
        self.round
    }

    /// Connected-group size of a live unit
    pub fn group_size(&self, id: UnitId) -> Option<usize> {
        let unit = self.board.unit(id)?;
        Some(group_size(&self.board, unit.pos))
    }

    /// Text board as seen by `viewer`
    pub fn view(&self, viewer: Side) -> String {
        render_view(&self.board, viewer)
    }

    pub fn summary(&self) -> GameSummary {
        GameSummary::from_board(&self.board)
    }

    // ========================================================================
    // ROUND EXECUTION
    // ========================================================================

    /// Execute one round: moves, captures, arbitration, removal
    ///
    /// Fails only when the game is already over.
    pub fn execute_round(&mut self, moves: &MoveSet) -> Result<RoundResult, GameError> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }

        let report = resolve_moves(&mut self.board, moves);

        let captured = find_captures(&self.board);
        // Attribution looks at the board before captured units disappear
        let verdict = arbitrate(&self.board, &captured);
        remove_captured(&mut self.board, &captured);

        self.round += 1;
        self.result = verdict.result;

        if !captured.is_empty() {
            tracing::debug!(
                "round {}: captured {:?}",
                self.round,
                captured.iter().map(|u| u.id).collect::<Vec<_>>()
            );
        }
        if self.is_over() {
            tracing::debug!("round {}: game over, {:?}", self.round, self.result);
        }

        Ok(RoundResult {
            round: self.round,
            moves: report,
            captured: captured.iter().map(|u| u.id).collect(),
            remaining: self.board.len(),
            winner: self.result.winner(),
            game_over: self.is_over(),
            result: self.result,
            attribution: verdict.attribution,
        })
    }
}
