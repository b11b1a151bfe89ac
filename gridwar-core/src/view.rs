//! Text board view and game summary
//!
//! The view is what the move-proposal collaborator sees: one line per row,
//! cells separated by a single space. `X` is an empty cell, the viewer's own
//! units show their color letter, and every opposing unit shows `E`.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::{Pos, BOARD_SIZE};
use crate::error::GameError;
use crate::grid::Board;
use crate::units::{Color, Side, UnitId};

const EMPTY_TOKEN: char = 'X';
const ENEMY_TOKEN: char = 'E';

/// One cell of a side's view
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewCell {
    Empty,
    Own(Color),
    Enemy,
}

impl ViewCell {
    pub fn token(self) -> char {
        match self {
            ViewCell::Empty => EMPTY_TOKEN,
            ViewCell::Own(color) => color.letter(),
            ViewCell::Enemy => ENEMY_TOKEN,
        }
    }

    /// Case-insensitive inverse of [`ViewCell::token`]
    pub fn from_token(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            EMPTY_TOKEN => Some(ViewCell::Empty),
            ENEMY_TOKEN => Some(ViewCell::Enemy),
            other => Color::from_letter(other).map(ViewCell::Own),
        }
    }
}

/// A side's view of the whole board
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardView {
    rows: Vec<Vec<ViewCell>>,
}

impl BoardView {
    pub fn from_board(board: &Board, viewer: Side) -> Self {
        let rows = (0..BOARD_SIZE)
            .map(|row| {
                (0..BOARD_SIZE)
                    .map(|col| match board.get(Pos::new(row, col)) {
                        None => ViewCell::Empty,
                        Some(unit) if unit.owner == viewer => ViewCell::Own(unit.color),
                        Some(_) => ViewCell::Enemy,
                    })
                    .collect()
            })
            .collect();
        Self { rows }
    }

    /// Parse the text format back; tokens are case-insensitive
    pub fn parse(text: &str) -> Result<Self, GameError> {
        let size = BOARD_SIZE as usize;
        let lines: Vec<&str> = text.trim_end().lines().collect();
        if lines.len() != size {
            return Err(GameError::MalformedView {
                line: lines.len(),
                reason: format!("expected {size} rows, found {}", lines.len()),
            });
        }

        let mut rows = Vec::with_capacity(size);
        for (index, line) in lines.iter().enumerate() {
            let malformed = |reason: String| GameError::MalformedView {
                line: index + 1,
                reason,
            };

            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.len() != size {
                return Err(malformed(format!(
                    "expected {size} cells, found {}",
                    tokens.len()
                )));
            }

            let mut row = Vec::with_capacity(size);
            for token in tokens {
                let mut chars = token.chars();
                let cell = match (chars.next(), chars.next()) {
                    (Some(c), None) => ViewCell::from_token(c),
                    _ => None,
                };
                row.push(cell.ok_or_else(|| malformed(format!("bad token {token:?}")))?);
            }
            rows.push(row);
        }

        Ok(Self { rows })
    }

    /// Cell at `pos`; `None` off the board
    pub fn cell(&self, pos: Pos) -> Option<ViewCell> {
        if !pos.is_valid() {
            return None;
        }
        Some(self.rows[pos.row as usize][pos.col as usize])
    }

    /// Cells holding the viewer's own units
    pub fn own_units(&self) -> impl Iterator<Item = (Pos, Color)> + '_ {
        self.cells().filter_map(|(pos, cell)| match cell {
            ViewCell::Own(color) => Some((pos, color)),
            _ => None,
        })
    }

    fn cells(&self) -> impl Iterator<Item = (Pos, ViewCell)> + '_ {
        self.rows.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .map(move |(c, &cell)| (Pos::new(r as i8, c as i8), cell))
        })
    }
}

impl fmt::Display for BoardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, row) in self.rows.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            let line: Vec<String> = row.iter().map(|cell| cell.token().to_string()).collect();
            f.write_str(line.join(" ").trim_end())?;
        }
        Ok(())
    }
}

/// Text board for `viewer`
pub fn render_view(board: &Board, viewer: Side) -> String {
    BoardView::from_board(board, viewer).to_string()
}

/// Counts and positions, for tooling and debugging
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub board_size: usize,
    pub player_units: usize,
    pub enemy_units: usize,
    pub total_units: usize,
    pub positions: BTreeMap<UnitId, Pos>,
}

impl GameSummary {
    pub fn from_board(board: &Board) -> Self {
        Self {
            board_size: BOARD_SIZE as usize,
            player_units: board.count(Side::Player),
            enemy_units: board.count(Side::Enemy),
            total_units: board.len(),
            positions: board.units().map(|u| (u.id, u.pos)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAYER_VIEW: &str = "\
X X X X X X X X X X
X E X E X E X E X X
X X X X X X X X X X
X X X X X X X X X X
X X X X X X X X X X
X X X X X X X X X X
X X X X X X X X X X
X X X X X X X X X X
X X R X B X G X Y X
X X X X X X X X X X";

    #[test]
    fn test_player_view_is_exact() {
        assert_eq!(render_view(&Board::standard(), Side::Player), PLAYER_VIEW);
    }

    #[test]
    fn test_enemy_view_shows_own_colors() {
        let view = render_view(&Board::standard(), Side::Enemy);
        let lines: Vec<&str> = view.lines().collect();
        assert_eq!(lines[1], "X R X B X G X Y X X");
        assert_eq!(lines[8], "X X E X E X E X E X");
        assert!(lines.iter().all(|l| !l.ends_with(' ')));
    }

    #[test]
    fn test_parse_round_trips() {
        let board = Board::standard();
        let view = BoardView::from_board(&board, Side::Player);
        let parsed = BoardView::parse(&view.to_string()).unwrap();
        assert_eq!(parsed, view);
        assert_eq!(parsed.cell(Pos::new(8, 4)), Some(ViewCell::Own(Color::Blue)));
        assert_eq!(parsed.cell(Pos::new(1, 1)), Some(ViewCell::Enemy));
        assert_eq!(parsed.own_units().count(), 4);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        let lower = PLAYER_VIEW.to_lowercase();
        let parsed = BoardView::parse(&lower).unwrap();
        assert_eq!(parsed.to_string(), PLAYER_VIEW);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(matches!(
            BoardView::parse("X X"),
            Err(GameError::MalformedView { .. })
        ));

        let bad_token = PLAYER_VIEW.replacen("R", "Q", 1);
        assert!(matches!(
            BoardView::parse(&bad_token),
            Err(GameError::MalformedView { line: 9, .. })
        ));

        let short_row = PLAYER_VIEW.replacen("X X X X X X X X X X", "X X X", 1);
        assert!(matches!(
            BoardView::parse(&short_row),
            Err(GameError::MalformedView { line: 1, .. })
        ));
    }

    #[test]
    fn test_summary() {
        let summary = GameSummary::from_board(&Board::standard());
        assert_eq!(summary.board_size, 10);
        assert_eq!(summary.player_units, 4);
        assert_eq!(summary.enemy_units, 4);
        assert_eq!(summary.total_units, 8);
        assert_eq!(summary.positions[&5], Pos::new(1, 1));
    }
}
