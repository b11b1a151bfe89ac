//! Decoding move proposals from the move-proposal collaborator
//!
//! The collaborator answers with a JSON object mapping color names to
//! direction words for one side, e.g. `{"red": "up", "Blue": "LEFT"}`.
//! Entries are matched to the side's live units by color. Nothing is
//! dropped silently: every entry that cannot become a move is kept in
//! [`Proposal::rejected`] with the reason.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::board::Direction;
use crate::error::GameError;
use crate::grid::Board;
use crate::movement::MoveSet;
use crate::units::{Color, Side, UnitId};

/// Why a proposal entry produced no move
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposalIssue {
    UnknownColor,
    UnknownDirection,
    /// Direction value was not a string
    NotAString,
    /// The side has no live unit of that color
    NoLiveUnit,
}

/// A proposal entry that was not turned into a move
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RejectedInstruction {
    pub key: String,
    pub value: Value,
    pub issue: ProposalIssue,
}

/// Decoded proposal for one side
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Proposal {
    pub side: Side,
    pub moves: MoveSet,
    pub rejected: Vec<RejectedInstruction>,
}

impl Proposal {
    /// No moves for `side`; what a failed collaborator call turns into
    pub fn empty(side: Side) -> Self {
        Self {
            side,
            moves: MoveSet::new(),
            rejected: Vec::new(),
        }
    }

    /// Combine several proposals into one round's input
    pub fn merge<'a>(proposals: impl IntoIterator<Item = &'a Proposal>) -> MoveSet {
        proposals
            .into_iter()
            .flat_map(|p| p.moves.iter().map(|(&id, &dir)| (id, dir)))
            .collect()
    }
}

/// Decode the collaborator's raw text response
pub fn decode_proposal(text: &str, board: &Board, side: Side) -> Result<Proposal, GameError> {
    let value: Value = serde_json::from_str(text)?;
    decode_proposal_value(&value, board, side)
}

/// Decode an already-parsed JSON response
pub fn decode_proposal_value(value: &Value, board: &Board, side: Side) -> Result<Proposal, GameError> {
    match value {
        Value::Object(entries) => Ok(decode_entries(entries, board, side)),
        _ => Err(GameError::ProposalNotObject),
    }
}

/// Decode color -> direction entries against the current board
pub fn decode_entries(entries: &Map<String, Value>, board: &Board, side: Side) -> Proposal {
    let mut proposal = Proposal::empty(side);

    for (key, value) in entries {
        match decode_entry(key, value, board, side) {
            Ok((id, direction)) => {
                proposal.moves.insert(id, direction);
            }
            Err(issue) => {
                tracing::debug!("{} proposal entry {:?}: {:?} ignored ({:?})", side, key, value, issue);
                proposal.rejected.push(RejectedInstruction {
                    key: key.clone(),
                    value: value.clone(),
                    issue,
                });
            }
        }
    }

    proposal
}

fn decode_entry(
    key: &str,
    value: &Value,
    board: &Board,
    side: Side,
) -> Result<(UnitId, Direction), ProposalIssue> {
    let color: Color = key.parse().map_err(|_| ProposalIssue::UnknownColor)?;
    let word = value.as_str().ok_or(ProposalIssue::NotAString)?;
    let direction: Direction = word.parse().map_err(|_| ProposalIssue::UnknownDirection)?;
    let unit = board
        .unit_by_color(side, color)
        .ok_or(ProposalIssue::NoLiveUnit)?;
    Ok((unit.id, direction))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_maps_colors_to_own_units() {
        let board = Board::standard();
        let proposal = decode_proposal(r#"{"red": "up", "Blue": "LEFT"}"#, &board, Side::Player).unwrap();
        assert_eq!(proposal.moves.get(&1), Some(&Direction::Up));
        assert_eq!(proposal.moves.get(&2), Some(&Direction::Left));
        assert!(proposal.rejected.is_empty());

        let enemy = decode_proposal(r#"{"red": "down"}"#, &board, Side::Enemy).unwrap();
        assert_eq!(enemy.moves.get(&5), Some(&Direction::Down));
    }

    #[test]
    fn test_bad_entries_are_reported() {
        let board = Board::standard();
        let proposal = decode_proposal(
            r#"{"purple": "up", "green": "sideways", "yellow": 3, "red": "down"}"#,
            &board,
            Side::Player,
        )
        .unwrap();

        assert_eq!(proposal.moves.len(), 1);
        let issues: Vec<(&str, ProposalIssue)> = proposal
            .rejected
            .iter()
            .map(|r| (r.key.as_str(), r.issue))
            .collect();
        assert!(issues.contains(&("purple", ProposalIssue::UnknownColor)));
        assert!(issues.contains(&("green", ProposalIssue::UnknownDirection)));
        assert!(issues.contains(&("yellow", ProposalIssue::NotAString)));
    }

    #[test]
    fn test_captured_color_has_no_unit() {
        let mut board = Board::standard();
        board.remove(1);
        let proposal = decode_proposal_value(&json!({"red": "up"}), &board, Side::Player).unwrap();
        assert!(proposal.moves.is_empty());
        assert_eq!(proposal.rejected[0].issue, ProposalIssue::NoLiveUnit);
    }

    #[test]
    fn test_malformed_responses_are_errors() {
        let board = Board::standard();
        assert!(matches!(
            decode_proposal("not json", &board, Side::Player),
            Err(GameError::MalformedProposal(_))
        ));
        assert!(matches!(
            decode_proposal(r#"["red", "up"]"#, &board, Side::Player),
            Err(GameError::ProposalNotObject)
        ));
    }

    #[test]
    fn test_merge_both_sides() {
        let board = Board::standard();
        let player = decode_proposal(r#"{"red": "up"}"#, &board, Side::Player).unwrap();
        let enemy = decode_proposal(r#"{"red": "down"}"#, &board, Side::Enemy).unwrap();
        let merged = Proposal::merge([&player, &enemy]);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[&1], Direction::Up);
        assert_eq!(merged[&5], Direction::Down);
    }
}
