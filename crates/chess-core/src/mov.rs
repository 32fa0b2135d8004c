//! Move representation.

use crate::{PieceKind, Square};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A requested chess move.
///
/// A move names only what a player chooses: origin, destination, and the
/// promotion piece when a pawn reaches the far rank. Whether it is a
/// capture, castling, or en passant is derived from the position it is
/// played in.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion: Option<PieceKind>,
}

impl Move {
    /// Creates a move without a promotion choice.
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Move {
            from,
            to,
            promotion: None,
        }
    }

    /// Creates a promoting move.
    #[inline]
    pub const fn with_promotion(from: Square, to: Square, piece: PieceKind) -> Self {
        Move {
            from,
            to,
            promotion: Some(piece),
        }
    }

    /// Returns the UCI notation for this move (e.g., "e2e4", "e7e8q").
    pub fn to_uci(self) -> String {
        match self.promotion {
            Some(kind) => format!("{}{}{}", self.from, self.to, kind.to_char()),
            None => format!("{}{}", self.from, self.to),
        }
    }

    /// Parses a move from UCI notation.
    ///
    /// The promotion letter is accepted in either case. Whether the
    /// promotion choice is valid for the position is the engine's concern.
    pub fn from_uci(s: &str) -> Option<Self> {
        if !s.is_ascii() || s.len() < 4 || s.len() > 5 {
            return None;
        }
        let from = Square::from_algebraic(&s[0..2])?;
        let to = Square::from_algebraic(&s[2..4])?;
        let promotion = match s[4..].chars().next() {
            Some(c) => Some(PieceKind::from_char(c)?),
            None => None,
        };
        Some(Move {
            from,
            to,
            promotion,
        })
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self.to_uci())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}
