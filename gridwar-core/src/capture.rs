//! Capture analysis over connected groups
//!
//! A unit is captured when the largest enemy group touching it is strictly
//! larger than its own group. Every unit is judged against the same post-move
//! snapshot; removals never feed back into the same round.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::board::Pos;
use crate::grid::Board;
use crate::units::Unit;

// ============================================================================
// CONNECTED GROUPS
// ============================================================================

/// Same-owner 4-connected component containing `start`, in traversal order
///
/// Iterative; `visited` is shared so callers can label many groups in one pass.
fn flood(board: &Board, start: Pos, visited: &mut FxHashSet<Pos>) -> Vec<Pos> {
    let Some(owner) = board.get(start).map(|u| u.owner) else {
        return Vec::new();
    };

    let mut members = Vec::new();
    let mut stack = vec![start];
    visited.insert(start);

    while let Some(pos) = stack.pop() {
        members.push(pos);
        for next in pos.neighbors() {
            let same_owner = board.get(next).is_some_and(|u| u.owner == owner);
            if same_owner && visited.insert(next) {
                stack.push(next);
            }
        }
    }

    members
}

/// Positions of the group containing the unit at `pos` (empty for empty cells)
pub fn connected_group(board: &Board, pos: Pos) -> Vec<Pos> {
    let mut group = flood(board, pos, &mut FxHashSet::default());
    group.sort();
    group
}

/// Size of the group containing the unit at `pos`; 0 for empty cells
pub fn group_size(board: &Board, pos: Pos) -> usize {
    flood(board, pos, &mut FxHashSet::default()).len()
}

/// Component labels for one board snapshot
///
/// Each group is traversed exactly once; later queries are lookups.
#[derive(Clone, Debug, Default)]
pub struct Groups {
    label: FxHashMap<Pos, usize>,
    sizes: Vec<usize>,
}

impl Groups {
    pub fn label(board: &Board) -> Self {
        let mut visited = FxHashSet::default();
        let mut groups = Self::default();

        for unit in board.units() {
            if visited.contains(&unit.pos) {
                continue;
            }
            let members = flood(board, unit.pos, &mut visited);
            let index = groups.sizes.len();
            groups.sizes.push(members.len());
            for pos in members {
                groups.label.insert(pos, index);
            }
        }

        groups
    }

    /// Group index of the unit at `pos`
    pub fn group_of(&self, pos: Pos) -> Option<usize> {
        self.label.get(&pos).copied()
    }

    /// Size of the group at `pos`; 0 for empty cells
    pub fn size_at(&self, pos: Pos) -> usize {
        self.group_of(pos).map_or(0, |g| self.sizes[g])
    }

    /// Number of distinct groups on the board
    pub fn count(&self) -> usize {
        self.sizes.len()
    }

    /// Largest group size among enemy units orthogonally adjacent to `unit`
    pub fn threat(&self, board: &Board, unit: &Unit) -> usize {
        board
            .adjacent_units(unit.pos)
            .filter(|n| n.owner != unit.owner)
            .map(|n| self.size_at(n.pos))
            .max()
            .unwrap_or(0)
    }

    /// Capture rule: opposing threat strictly exceeds own group size
    pub fn is_captured(&self, board: &Board, unit: &Unit) -> bool {
        self.threat(board, unit) > self.size_at(unit.pos)
    }
}

// ============================================================================
// CAPTURES
// ============================================================================

/// Units captured on this snapshot, in id order, with pre-removal positions
pub fn find_captures(board: &Board) -> Vec<Unit> {
    let groups = Groups::label(board);
    board
        .units()
        .filter(|unit| groups.is_captured(board, unit))
        .copied()
        .collect()
}

/// Remove all captured units at once
pub fn remove_captured(board: &mut Board, captured: &[Unit]) {
    for unit in captured {
        board.remove(unit.id);
    }
}
