//! Square grid geometry with (row, col) coordinates

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Board width and height
pub const BOARD_SIZE: i8 = 10;

/// Grid coordinates; row 0 is the top of the board
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pos {
    pub row: i8,
    pub col: i8,
}

impl Pos {
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    /// Check if this position is on the board
    pub fn is_valid(&self) -> bool {
        (0..BOARD_SIZE).contains(&self.row) && (0..BOARD_SIZE).contains(&self.col)
    }

    /// Position one step away; may be off the board
    pub fn step(&self, direction: Direction) -> Pos {
        let (dr, dc) = direction.delta();
        Pos::new(self.row + dr, self.col + dc)
    }

    /// On-board orthogonal neighbors, in `DIRECTIONS` order
    pub fn neighbors(self) -> impl Iterator<Item = Pos> {
        DIRECTIONS
            .into_iter()
            .map(move |dir| self.step(dir))
            .filter(Pos::is_valid)
    }

    /// Check orthogonal adjacency
    pub fn is_adjacent(&self, other: Pos) -> bool {
        (self.row - other.row).abs() + (self.col - other.col).abs() == 1
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Cardinal movement direction
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// All directions, in neighbor scan order
pub const DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

impl Direction {
    /// Row/column offset (dr, dc)
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = GameError;

    /// Case-insensitive; anything but the four canonical words is rejected
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            _ => Err(GameError::UnknownDirection(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pos_validity() {
        assert!(Pos::new(0, 0).is_valid());
        assert!(Pos::new(9, 9).is_valid());
        assert!(!Pos::new(-1, 0).is_valid());
        assert!(!Pos::new(0, 10).is_valid());
    }

    #[test]
    fn test_neighbors_clip_at_edges() {
        let corner: Vec<Pos> = Pos::new(0, 0).neighbors().collect();
        assert_eq!(corner, vec![Pos::new(1, 0), Pos::new(0, 1)]);
        assert_eq!(Pos::new(5, 5).neighbors().count(), 4);
    }

    #[test]
    fn test_direction_parsing() {
        assert_eq!("UP".parse::<Direction>().unwrap(), Direction::Up);
        assert_eq!(" left ".parse::<Direction>().unwrap(), Direction::Left);
        assert!(matches!(
            "north".parse::<Direction>(),
            Err(GameError::UnknownDirection(s)) if s == "north"
        ));
    }

    #[test]
    fn test_step_and_opposite() {
        let p = Pos::new(4, 4);
        for dir in DIRECTIONS {
            assert_eq!(p.step(dir).step(dir.opposite()), p);
            assert!(p.is_adjacent(p.step(dir)));
        }
    }
}
