//! The serialized game state.
//!
//! ```json
//! {
//!   "board": [[{"type": "rook", "color": "white"}, ...], ...],
//!   "currentPlayer": "white",
//!   "castlingRights": {"whiteKingside": true, ...},
//!   "enPassantTarget": {"file": "e", "rank": 3},
//!   "halfMoveClock": 0,
//!   "fullMoveNumber": 1,
//!   "positionHistory": ["rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -"]
//! }
//! ```
//!
//! The board is rank-major with rank 1 first. Move history is not part of
//! the format.

use chess_core::{Color, Square};
use serde::{Deserialize, Serialize};

use crate::error::StateError;
use crate::{Board, CastlingRights, GameState, Position};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SerializedState {
    board: Board,
    current_player: Color,
    castling_rights: CastlingRights,
    en_passant_target: Option<Square>,
    half_move_clock: u32,
    full_move_number: u32,
    position_history: Vec<String>,
}

impl From<&GameState> for SerializedState {
    fn from(state: &GameState) -> Self {
        let p = &state.position;
        SerializedState {
            board: p.board,
            current_player: p.side_to_move,
            castling_rights: p.castling,
            en_passant_target: p.en_passant,
            half_move_clock: p.halfmove_clock,
            full_move_number: p.fullmove_number,
            position_history: state.position_history.clone(),
        }
    }
}

impl SerializedState {
    fn validate(&self) -> Result<(), String> {
        self.board.check_kings()?;
        if let Some(sq) = self.en_passant_target {
            // The target sits behind the pawn that just moved, so it is on
            // rank 6 when White is to move and rank 3 when Black is.
            let expected = match self.current_player {
                Color::White => 6,
                Color::Black => 3,
            };
            if sq.rank().number() != expected {
                return Err(format!("en passant target {sq} is not on rank {expected}"));
            }
        }
        if self.full_move_number == 0 {
            return Err("fullMoveNumber must be at least 1".to_string());
        }
        // Repetition counting reads the history, so its tail must be the
        // position that is actually on the board.
        match self.position_history.last() {
            None => return Err("positionHistory must not be empty".to_string()),
            Some(last) if *last != self.position().key() => {
                return Err("positionHistory does not end with the current position".to_string());
            }
            Some(_) => {}
        }
        Ok(())
    }

    fn position(&self) -> Position {
        Position {
            board: self.board,
            side_to_move: self.current_player,
            castling: self.castling_rights,
            en_passant: self.en_passant_target,
            halfmove_clock: self.half_move_clock,
            fullmove_number: self.full_move_number,
        }
    }

    fn into_state(self) -> GameState {
        GameState {
            position: self.position(),
            move_history: Vec::new(),
            position_history: self.position_history,
        }
    }
}

/// Serializes the state to compact JSON.
pub fn to_json(state: &GameState) -> String {
    serde_json::to_string(&SerializedState::from(state)).expect("game state serializes to JSON")
}

/// Serializes the state to indented JSON.
pub fn to_json_pretty(state: &GameState) -> String {
    serde_json::to_string_pretty(&SerializedState::from(state))
        .expect("game state serializes to JSON")
}

/// Parses and validates a serialized state.
///
/// The result has an empty move history.
pub fn from_json(json: &str) -> Result<GameState, StateError> {
    let parsed: SerializedState = serde_json::from_str(json)?;
    parsed.validate().map_err(StateError::InvalidJson)?;
    Ok(parsed.into_state())
}
