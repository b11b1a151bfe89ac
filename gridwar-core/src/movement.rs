//! Simultaneous movement resolution
//!
//! A round's moves are resolved in two phases:
//! 1. Validate every request against the pre-round board. Occupancy is never
//!    re-checked mid-pass, so two units cannot swap cells in one round.
//! 2. Apply every move that survived validation and conflict detection.
//!
//! Surviving destinations were empty before the round and are claimed by
//! exactly one unit, so application order does not matter.

use std::collections::BTreeMap;
use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::board::{Direction, Pos};
use crate::grid::Board;
use crate::units::UnitId;

/// One round's move intents; ids not present stay put
pub type MoveSet = BTreeMap<UnitId, Direction>;

/// Per-unit outcomes for one round
pub type MoveReport = BTreeMap<UnitId, MoveOutcome>;

/// Why a requested move was not carried out
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    PieceNotFound,
    OutOfBounds,
    PositionOccupied,
    MovementConflict,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RejectReason::PieceNotFound => "piece not found",
            RejectReason::OutOfBounds => "out of bounds",
            RejectReason::PositionOccupied => "position occupied",
            RejectReason::MovementConflict => "movement conflict",
        })
    }
}

/// Result of one unit's move request
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MoveOutcome {
    Moved { to: Pos },
    Rejected { reason: RejectReason },
}

impl MoveOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, MoveOutcome::Moved { .. })
    }

    pub fn new_position(&self) -> Option<Pos> {
        match *self {
            MoveOutcome::Moved { to } => Some(to),
            MoveOutcome::Rejected { .. } => None,
        }
    }

    pub fn reason(&self) -> Option<RejectReason> {
        match *self {
            MoveOutcome::Moved { .. } => None,
            MoveOutcome::Rejected { reason } => Some(reason),
        }
    }
}

fn rejected(reason: RejectReason) -> MoveOutcome {
    MoveOutcome::Rejected { reason }
}

/// Phase 1: decide every request against the unmodified board
pub fn validate_moves(board: &Board, moves: &MoveSet) -> MoveReport {
    let mut report = MoveReport::new();
    let mut claims: FxHashMap<Pos, Vec<UnitId>> = FxHashMap::default();

    for (&id, &direction) in moves {
        let outcome = match board.unit(id) {
            None => rejected(RejectReason::PieceNotFound),
            Some(unit) => {
                let dest = unit.pos.step(direction);
                if !dest.is_valid() {
                    rejected(RejectReason::OutOfBounds)
                } else if board.is_occupied(dest) {
                    rejected(RejectReason::PositionOccupied)
                } else {
                    claims.entry(dest).or_default().push(id);
                    MoveOutcome::Moved { to: dest }
                }
            }
        };
        report.insert(id, outcome);
    }

    // Contested destinations fail for every claimant
    for ids in claims.values().filter(|ids| ids.len() > 1) {
        for &id in ids {
            report.insert(id, rejected(RejectReason::MovementConflict));
        }
    }

    report
}

/// Phase 2: carry out every successful outcome
pub fn apply_moves(board: &mut Board, report: &MoveReport) {
    for (&id, outcome) in report {
        if let MoveOutcome::Moved { to } = *outcome {
            board.relocate(id, to);
        }
    }
}

/// Validate then apply one round of moves
pub fn resolve_moves(board: &mut Board, moves: &MoveSet) -> MoveReport {
    let report = validate_moves(board, moves);
    apply_moves(board, &report);

    for (id, outcome) in &report {
        if let Some(reason) = outcome.reason() {
            tracing::debug!("unit {} move {} rejected: {}", id, moves[id], reason);
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{Color, Side};

    fn moves(entries: &[(UnitId, Direction)]) -> MoveSet {
        entries.iter().copied().collect()
    }

    #[test]
    fn test_simple_move() {
        let mut board = Board::standard();
        let report = resolve_moves(&mut board, &moves(&[(2, Direction::Left)]));
        assert_eq!(report[&2], MoveOutcome::Moved { to: Pos::new(8, 3) });
        assert_eq!(board.unit(2).unwrap().pos, Pos::new(8, 3));
    }

    #[test]
    fn test_unknown_unit() {
        let mut board = Board::standard();
        let report = resolve_moves(&mut board, &moves(&[(77, Direction::Up)]));
        assert_eq!(report[&77].reason(), Some(RejectReason::PieceNotFound));
    }

    #[test]
    fn test_out_of_bounds() {
        let mut board = Board::empty();
        let id = board.place(Side::Player, Color::Red, Pos::new(0, 0)).unwrap();
        let report = resolve_moves(&mut board, &moves(&[(id, Direction::Up)]));
        assert_eq!(report[&id].reason(), Some(RejectReason::OutOfBounds));
        assert_eq!(board.unit(id).unwrap().pos, Pos::new(0, 0));
    }

    #[test]
    fn test_swap_is_rejected() {
        let mut board = Board::empty();
        let a = board.place(Side::Player, Color::Red, Pos::new(4, 4)).unwrap();
        let b = board.place(Side::Enemy, Color::Red, Pos::new(4, 5)).unwrap();
        let report = resolve_moves(
            &mut board,
            &moves(&[(a, Direction::Right), (b, Direction::Left)]),
        );
        assert_eq!(report[&a].reason(), Some(RejectReason::PositionOccupied));
        assert_eq!(report[&b].reason(), Some(RejectReason::PositionOccupied));
        assert_eq!(board.unit(a).unwrap().pos, Pos::new(4, 4));
        assert_eq!(board.unit(b).unwrap().pos, Pos::new(4, 5));
    }

    #[test]
    fn test_following_into_vacated_cell_is_rejected() {
        // The cell ahead is occupied in the pre-round snapshot even though
        // its occupant leaves this round
        let mut board = Board::empty();
        let lead = board.place(Side::Player, Color::Red, Pos::new(4, 4)).unwrap();
        let tail = board.place(Side::Player, Color::Blue, Pos::new(5, 4)).unwrap();
        let report = resolve_moves(
            &mut board,
            &moves(&[(lead, Direction::Up), (tail, Direction::Up)]),
        );
        assert!(report[&lead].is_success());
        assert_eq!(report[&tail].reason(), Some(RejectReason::PositionOccupied));
        assert_eq!(board.unit(tail).unwrap().pos, Pos::new(5, 4));
    }

    #[test]
    fn test_three_way_conflict() {
        let mut board = Board::empty();
        let a = board.place(Side::Player, Color::Red, Pos::new(4, 5)).unwrap();
        let b = board.place(Side::Enemy, Color::Red, Pos::new(6, 5)).unwrap();
        let c = board.place(Side::Player, Color::Blue, Pos::new(5, 4)).unwrap();
        let report = resolve_moves(
            &mut board,
            &moves(&[(a, Direction::Down), (b, Direction::Up), (c, Direction::Right)]),
        );
        for id in [a, b, c] {
            assert_eq!(report[&id].reason(), Some(RejectReason::MovementConflict));
        }
        assert!(board.get(Pos::new(5, 5)).is_none());
        assert!(board.check_consistency().is_empty());
    }

    #[test]
    fn test_validate_does_not_mutate() {
        let board = Board::standard();
        let report = validate_moves(&board, &moves(&[(1, Direction::Up)]));
        assert!(report[&1].is_success());
        assert_eq!(board.unit(1).unwrap().pos, Pos::new(8, 2));
    }

    #[test]
    fn test_outcome_serialization() {
        let json = serde_json::to_value(MoveOutcome::Rejected {
            reason: RejectReason::MovementConflict,
        })
        .unwrap();
        assert_eq!(json["status"], "rejected");
        assert_eq!(json["reason"], "movement_conflict");
    }
}
