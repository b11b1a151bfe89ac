//! Board aggregate: the cell grid and the unit registry
//!
//! The grid and the registry are only ever changed together, so a cell's
//! occupant always agrees with that unit's stored position.

use std::collections::BTreeMap;
use std::fmt;

use crate::board::{Pos, BOARD_SIZE};
use crate::error::GameError;
use crate::units::{Color, Side, Unit, UnitId, COLORS, ENEMY_START, PLAYER_START};

const CELLS: usize = BOARD_SIZE as usize;

/// First id handed out by a fresh board
const FIRST_UNIT_ID: UnitId = 1;

/// Fixed-size board owning every unit
#[derive(Clone, Debug)]
pub struct Board {
    /// cell -> occupant id
    cells: [[Option<UnitId>; CELLS]; CELLS],

    /// id -> unit, iterated in id order
    units: BTreeMap<UnitId, Unit>,

    next_id: UnitId,
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl Board {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Empty board, for building custom positions with [`Board::place`]
    pub fn empty() -> Self {
        Self {
            cells: [[None; CELLS]; CELLS],
            units: BTreeMap::new(),
            next_id: FIRST_UNIT_ID,
        }
    }

    /// Starting layout: four units per side on opposite ends
    pub fn standard() -> Self {
        let mut board = Self::empty();
        for (color, pos) in COLORS.into_iter().zip(PLAYER_START) {
            board.spawn(Side::Player, color, pos);
        }
        for (color, pos) in COLORS.into_iter().zip(ENEMY_START) {
            board.spawn(Side::Enemy, color, pos);
        }
        board
    }

    // ========================================================================
    // MUTATION
    // ========================================================================

    /// Create a unit at `pos`, returning its new id
    pub fn place(&mut self, owner: Side, color: Color, pos: Pos) -> Result<UnitId, GameError> {
        if !pos.is_valid() {
            return Err(GameError::OutOfBounds(pos));
        }
        if self.is_occupied(pos) {
            return Err(GameError::CellOccupied(pos));
        }
        Ok(self.spawn(owner, color, pos))
    }

    /// Delete a unit from both the registry and its cell
    pub fn remove(&mut self, id: UnitId) -> Option<Unit> {
        let unit = self.units.remove(&id)?;
        self.cells[unit.pos.row as usize][unit.pos.col as usize] = None;
        Some(unit)
    }

    /// Move a unit to an empty on-board cell
    pub fn move_unit(&mut self, id: UnitId, to: Pos) -> Result<(), GameError> {
        if !self.units.contains_key(&id) {
            return Err(GameError::UnitNotFound(id));
        }
        if !to.is_valid() {
            return Err(GameError::OutOfBounds(to));
        }
        if self.is_occupied(to) {
            return Err(GameError::CellOccupied(to));
        }
        self.relocate(id, to);
        Ok(())
    }

    /// Move without checks; `to` must be on the board and empty
    pub(crate) fn relocate(&mut self, id: UnitId, to: Pos) {
        let Some(unit) = self.units.get_mut(&id) else {
            return;
        };
        debug_assert!(to.is_valid() && self.cells[to.row as usize][to.col as usize].is_none());
        let from = unit.pos;
        self.cells[from.row as usize][from.col as usize] = None;
        unit.pos = to;
        self.cells[to.row as usize][to.col as usize] = Some(id);
    }

    /// Insert a unit; `pos` must be on the board and empty
    fn spawn(&mut self, owner: Side, color: Color, pos: Pos) -> UnitId {
        let id = self.next_id;
        self.next_id += 1;
        self.units.insert(id, Unit { id, owner, pos, color });
        self.cells[pos.row as usize][pos.col as usize] = Some(id);
        id
    }

    // ========================================================================
    // LOOKUP
    // ========================================================================

    /// Unit by id
    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(&id)
    }

    /// Unit at `pos`; `None` for empty or off-board cells
    pub fn get(&self, pos: Pos) -> Option<&Unit> {
        if !pos.is_valid() {
            return None;
        }
        let id = self.cells[pos.row as usize][pos.col as usize]?;
        self.units.get(&id)
    }

    /// Unit at raw coordinates; anything outside the grid is simply empty
    pub fn unit_at(&self, row: i32, col: i32) -> Option<&Unit> {
        let size = i32::from(BOARD_SIZE);
        if !(0..size).contains(&row) || !(0..size).contains(&col) {
            return None;
        }
        // in range, so the narrowing is lossless
        self.get(Pos::new(row as i8, col as i8))
    }

    pub fn is_occupied(&self, pos: Pos) -> bool {
        self.get(pos).is_some()
    }

    /// All live units in id order
    pub fn units(&self) -> impl Iterator<Item = &Unit> + '_ {
        self.units.values()
    }

    /// Live units of one side in id order
    pub fn units_of(&self, side: Side) -> impl Iterator<Item = &Unit> + '_ {
        self.units.values().filter(move |u| u.owner == side)
    }

    /// The live unit of `side` tagged `color`, if it survives
    pub fn unit_by_color(&self, side: Side, color: Color) -> Option<&Unit> {
        self.units_of(side).find(|u| u.color == color)
    }

    /// Occupied orthogonal neighbors of `pos`
    pub fn adjacent_units(&self, pos: Pos) -> impl Iterator<Item = &Unit> + '_ {
        pos.neighbors().filter_map(move |n| self.get(n))
    }

    /// (friendly, enemy) orthogonal neighbor counts for a unit
    pub fn support_count(&self, id: UnitId) -> Option<(usize, usize)> {
        let unit = self.unit(id)?;
        let (friendly, enemy) = self
            .adjacent_units(unit.pos)
            .fold((0, 0), |(f, e), n| {
                if n.owner == unit.owner {
                    (f + 1, e)
                } else {
                    (f, e + 1)
                }
            });
        Some((friendly, enemy))
    }

    /// Number of live units
    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Number of live units of one side
    pub fn count(&self, side: Side) -> usize {
        self.units_of(side).count()
    }

    /// Id the next placed unit will receive
    pub fn next_id(&self) -> UnitId {
        self.next_id
    }

    // ========================================================================
    // CONSISTENCY
    // ========================================================================

    /// Describe every grid/registry disagreement; empty when healthy
    pub fn check_consistency(&self) -> Vec<String> {
        let mut problems = Vec::new();

        for unit in self.units.values() {
            if !unit.pos.is_valid() {
                problems.push(format!("unit {} stored off-board at {}", unit.id, unit.pos));
                continue;
            }
            let occupant = self.cells[unit.pos.row as usize][unit.pos.col as usize];
            if occupant != Some(unit.id) {
                problems.push(format!(
                    "unit {} at {} but cell holds {:?}",
                    unit.id, unit.pos, occupant
                ));
            }
            if unit.id >= self.next_id {
                problems.push(format!("unit {} not below next id {}", unit.id, self.next_id));
            }
        }

        for (row, cells) in self.cells.iter().enumerate() {
            for (col, occupant) in cells.iter().enumerate() {
                let Some(id) = occupant else { continue };
                match self.units.get(id) {
                    None => problems.push(format!("cell ({row}, {col}) holds dead unit {id}")),
                    Some(unit) if unit.pos != Pos::new(row as i8, col as i8) => problems.push(
                        format!("cell ({row}, {col}) holds unit {id} stored at {}", unit.pos),
                    ),
                    Some(_) => {}
                }
            }
        }

        problems
    }
}

/// Debug rendering: column header, then `.` / `P<n>` / `E<n>` per cell
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  ")?;
        for col in 0..BOARD_SIZE {
            write!(f, " {col} ")?;
        }
        writeln!(f)?;

        for row in 0..BOARD_SIZE {
            write!(f, "{row:2}")?;
            for col in 0..BOARD_SIZE {
                match self.get(Pos::new(row, col)) {
                    None => write!(f, " . ")?,
                    Some(unit) => {
                        let prefix = match unit.owner {
                            Side::Player => 'P',
                            Side::Enemy => 'E',
                        };
                        write!(f, " {}{}", prefix, unit.id % 10)?;
                    }
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
