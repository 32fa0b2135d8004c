//! Core value types for chess.
//!
//! This crate provides the plain data the rules engine is built from:
//! - [`PieceKind`], [`Piece`] and [`Color`] for piece representation
//! - [`Square`], [`File`], and [`Rank`] for board coordinates
//! - [`Move`] for a requested move (origin, destination, promotion choice)
//! - FEN field parsing and validation
//!
//! None of these types know the rules of chess; they are immutable values
//! with serde support matching the engine's JSON shape.

mod color;
mod fen;
mod mov;
mod piece;
mod square;

pub use color::Color;
pub use fen::{FenError, FenParser};
pub use mov::Move;
pub use piece::{Piece, PieceKind};
pub use square::{File, Rank, Square};
