//! Sides, color tags and units

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::board::Pos;
use crate::error::GameError;

/// Unit identifier; assigned monotonically and never reused
pub type UnitId = u32;

/// One of the two sides
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Player => f.write_str("Player"),
            Side::Enemy => f.write_str("Enemy"),
        }
    }
}

impl FromStr for Side {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "player" => Ok(Side::Player),
            "enemy" => Ok(Side::Enemy),
            _ => Err(GameError::UnknownSide(s.to_string())),
        }
    }
}

/// Color tag; each side starts with exactly one unit per color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    Red,
    Blue,
    Green,
    Yellow,
}

/// All colors, in starting-layout order
pub const COLORS: [Color; 4] = [Color::Red, Color::Blue, Color::Green, Color::Yellow];

impl Color {
    pub fn name(self) -> &'static str {
        match self {
            Color::Red => "Red",
            Color::Blue => "Blue",
            Color::Green => "Green",
            Color::Yellow => "Yellow",
        }
    }

    /// Uppercase first letter, used on the text board
    pub fn letter(self) -> char {
        match self {
            Color::Red => 'R',
            Color::Blue => 'B',
            Color::Green => 'G',
            Color::Yellow => 'Y',
        }
    }

    /// Inverse of [`Color::letter`], case-insensitive
    pub fn from_letter(c: char) -> Option<Self> {
        COLORS
            .into_iter()
            .find(|color| color.letter() == c.to_ascii_uppercase())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Color {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        COLORS
            .into_iter()
            .find(|color| color.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| GameError::UnknownColor(s.to_string()))
    }
}

/// A unit on the board (snapshot; the board owns the live copy)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub owner: Side,
    pub pos: Pos,
    pub color: Color,
}

impl Unit {
    /// Text-board token as seen by `viewer`: own units by color letter, others as `E`
    pub fn view_token(&self, viewer: Side) -> char {
        if self.owner == viewer {
            self.color.letter()
        } else {
            'E'
        }
    }
}

/// Player starting cells, matched to `COLORS` by index
pub const PLAYER_START: [Pos; 4] = [
    Pos::new(8, 2),
    Pos::new(8, 4),
    Pos::new(8, 6),
    Pos::new(8, 8),
];

/// Enemy starting cells, matched to `COLORS` by index
pub const ENEMY_START: [Pos; 4] = [
    Pos::new(1, 1),
    Pos::new(1, 3),
    Pos::new(1, 5),
    Pos::new(1, 7),
];
