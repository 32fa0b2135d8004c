//! Check, checkmate, and draw detection.
//!
//! [`game_status`] combines the individual predicates in a fixed priority:
//! checkmate first, then stalemate, insufficient material, threefold
//! repetition, and the fifty-move rule. The first match wins.

mod draw;

pub use draw::{is_fifty_move_rule, is_insufficient_material, is_threefold_repetition};

use chess_core::Color;
use serde::{Deserialize, Serialize};

use crate::movegen::is_king_attacked;
use crate::validate::has_legal_moves;
use crate::{GameState, Position};

/// Reason for a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DrawReason {
    /// No legal moves and not in check.
    Stalemate,
    /// Neither side can possibly deliver mate.
    InsufficientMaterial,
    /// The current position has occurred three times.
    ThreefoldRepetition,
    /// 100 half-moves without a pawn move or capture.
    FiftyMoveRule,
}

impl std::fmt::Display for DrawReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DrawReason::Stalemate => "stalemate",
            DrawReason::InsufficientMaterial => "insufficient material",
            DrawReason::ThreefoldRepetition => "threefold repetition",
            DrawReason::FiftyMoveRule => "fifty-move rule",
        };
        f.write_str(s)
    }
}

/// Where the game stands.
///
/// Serializes as `{"status":"active","inCheck":false}`,
/// `{"status":"checkmate","winner":"white"}` or
/// `{"status":"draw","reason":"stalemate"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum GameStatus {
    /// The game continues.
    Active {
        /// The side to move is in check.
        #[serde(rename = "inCheck")]
        in_check: bool,
    },
    /// The side to move is mated.
    Checkmate { winner: Color },
    /// The game is drawn.
    Draw { reason: DrawReason },
}

impl GameStatus {
    /// Returns true for `Active`.
    pub const fn is_active(self) -> bool {
        matches!(self, GameStatus::Active { .. })
    }

    /// Returns true for checkmate or a draw.
    pub const fn is_terminal(self) -> bool {
        !self.is_active()
    }
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameStatus::Active { in_check: false } => f.write_str("active"),
            GameStatus::Active { in_check: true } => f.write_str("active (check)"),
            GameStatus::Checkmate { winner } => write!(f, "checkmate, {winner} wins"),
            GameStatus::Draw { reason } => write!(f, "draw by {reason}"),
        }
    }
}

/// Returns true if `color`'s king is attacked.
///
/// # Panics
///
/// Panics if `color` has no king on the board.
pub fn is_check(position: &Position, color: Color) -> bool {
    is_king_attacked(&position.board, color)
}

/// Returns true if the side to move is in check and has no legal move.
pub fn is_checkmate(position: &Position) -> bool {
    is_check(position, position.side_to_move) && !has_legal_moves(position)
}

/// Returns true if the side to move is not in check and has no legal move.
pub fn is_stalemate(position: &Position) -> bool {
    !is_check(position, position.side_to_move) && !has_legal_moves(position)
}

/// Computes the status of a game.
pub fn game_status(state: &GameState) -> GameStatus {
    let position = &state.position;
    let side = position.side_to_move;
    let in_check = is_check(position, side);
    let can_move = has_legal_moves(position);

    if in_check && !can_move {
        return GameStatus::Checkmate {
            winner: side.opposite(),
        };
    }

    let draw = if !can_move {
        Some(DrawReason::Stalemate)
    } else if is_insufficient_material(&position.board) {
        Some(DrawReason::InsufficientMaterial)
    } else if is_threefold_repetition(&state.position_history) {
        Some(DrawReason::ThreefoldRepetition)
    } else if is_fifty_move_rule(position.halfmove_clock) {
        Some(DrawReason::FiftyMoveRule)
    } else {
        None
    };

    match draw {
        Some(reason) => GameStatus::Draw { reason },
        None => GameStatus::Active { in_check },
    }
}
