//! Game state and move records.
//!
//! A [`GameState`] is a value: the engine never edits one in place after
//! handing it out. Every accepted move produces a successor state whose
//! history has grown by exactly one [`MoveRecord`] and one position key.

use chess_core::{Color, Move, Piece, PieceKind, Square};

use crate::position::CastleSide;
use crate::{Board, CastlingRights, Position};

/// One played move plus everything needed to describe and undo it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    /// The move as requested (including the promotion choice, if any).
    pub mv: Move,
    /// The piece that moved, before any promotion.
    pub piece: Piece,
    /// The piece removed from the board, if the move captured.
    pub captured: Option<Piece>,
    /// The opponent is in check after the move.
    pub is_check: bool,
    /// The opponent is checkmated after the move.
    pub is_checkmate: bool,
    /// Which castling variant this move was, if any.
    pub castling: Option<CastleSide>,
    /// The move was an en passant capture.
    pub is_en_passant: bool,
    /// Snapshot of the position immediately before the move.
    ///
    /// Owned by this record alone. Together with the preceding records and
    /// the position history minus its last key, it reconstructs the full
    /// prior [`GameState`].
    pub before: Position,
}

/// The complete state of a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    /// The current position.
    pub position: Position,
    /// Moves played so far, oldest first.
    pub move_history: Vec<MoveRecord>,
    /// Keys of every position reached, including the starting one.
    ///
    /// In a game started with `new_game` this always holds exactly one more
    /// entry than `move_history`.
    pub position_history: Vec<String>,
}

impl GameState {
    /// Creates a state at the given position with no moves played.
    pub fn from_position(position: Position) -> Self {
        let key = position.key();
        GameState {
            position,
            move_history: Vec::new(),
            position_history: vec![key],
        }
    }

    /// Creates the canonical starting state.
    pub fn initial() -> Self {
        Self::from_position(Position::startpos())
    }

    /// Returns the board.
    #[inline]
    pub fn board(&self) -> &Board {
        &self.position.board
    }

    /// Returns the side to move.
    #[inline]
    pub fn current_player(&self) -> Color {
        self.position.side_to_move
    }

    /// Returns the castling rights.
    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.position.castling
    }

    /// Returns the en passant target square.
    #[inline]
    pub fn en_passant_target(&self) -> Option<Square> {
        self.position.en_passant
    }

    /// Returns the half-move clock.
    #[inline]
    pub fn half_move_clock(&self) -> u32 {
        self.position.halfmove_clock
    }

    /// Returns the full-move number.
    #[inline]
    pub fn full_move_number(&self) -> u32 {
        self.position.fullmove_number
    }

    /// Returns the most recent move record.
    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.move_history.last()
    }

    /// Returns the state as it was before the most recent move, or `None`
    /// at the start of the history.
    pub fn previous(&self) -> Option<GameState> {
        let (last, earlier) = self.move_history.split_last()?;
        let mut position_history = self.position_history.clone();
        position_history.pop();
        Some(GameState {
            position: last.before.clone(),
            move_history: earlier.to_vec(),
            position_history,
        })
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}

/// A pawn move that reached the far rank and still needs a promotion piece.
///
/// Held by the caller while a piece is being chosen; the engine only
/// accepts the completed [`Move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingPromotion {
    pub from: Square,
    pub to: Square,
    pub color: Color,
}

impl PendingPromotion {
    /// Completes the promotion with the chosen piece.
    pub const fn complete(self, piece: PieceKind) -> Move {
        Move::with_promotion(self.from, self.to, piece)
    }
}
