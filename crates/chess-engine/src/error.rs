//! Error types returned by [`crate::Game`].
//!
//! A failed operation never changes the game.

use thiserror::Error;

/// Why a move was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    /// The origin square is empty.
    #[error("no piece on the origin square")]
    NoPiece,
    /// The piece belongs to the side not to move.
    #[error("piece belongs to the side not to move")]
    WrongColor,
    /// Bad geometry, missing or invalid promotion, or the king would be left
    /// in check.
    #[error("illegal move")]
    IllegalMove,
    /// The game has already ended.
    #[error("game is over")]
    GameOver,
}

/// Why an undo was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UndoError {
    #[error("no moves to undo")]
    NoMovesToUndo,
}

/// Why a serialized state could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    /// Unparsable JSON, or JSON that does not describe a playable position.
    #[error("invalid json: {0}")]
    InvalidJson(String),
}

impl From<serde_json::Error> for StateError {
    fn from(e: serde_json::Error) -> Self {
        StateError::InvalidJson(e.to_string())
    }
}
