//! Mailbox board representation.
//!
//! The board is an 8x8 grid of optional pieces indexed rank-major, rank 1
//! first. It is a plain `Copy` value: cloning it is a full deep copy, and
//! [`Board::with_piece`] returns a new board rather than editing in place.

use chess_core::{Color, FenParser, Piece, PieceKind, Square};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An 8x8 grid of optional pieces.
///
/// `cells[rank][file]`, where rank 0 is rank 1 and file 0 is file a.
/// Serializes as `(piece | null)[8][8]` in the same order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    cells: [[Option<Piece>; 8]; 8],
}

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

impl Board {
    /// Creates a board with no pieces.
    pub const fn empty() -> Self {
        Board {
            cells: [[None; 8]; 8],
        }
    }

    /// Creates the standard opening setup.
    pub fn initial() -> Self {
        let mut board = Board::empty();
        for (file, kind) in BACK_RANK.iter().enumerate() {
            board.cells[0][file] = Some(Piece::new(*kind, Color::White));
            board.cells[1][file] = Some(Piece::new(PieceKind::Pawn, Color::White));
            board.cells[6][file] = Some(Piece::new(PieceKind::Pawn, Color::Black));
            board.cells[7][file] = Some(Piece::new(*kind, Color::Black));
        }
        board
    }

    /// Creates a board from rank-major rows.
    pub const fn from_rows(cells: [[Option<Piece>; 8]; 8]) -> Self {
        Board { cells }
    }

    /// Builds a board from the placement field of a parsed FEN record.
    pub fn from_fen(parsed: &FenParser) -> Self {
        let mut board = Board::empty();
        for &(sq, piece) in &parsed.pieces {
            board.set(sq, Some(piece));
        }
        board
    }

    /// Returns the rank-major rows.
    pub const fn rows(&self) -> &[[Option<Piece>; 8]; 8] {
        &self.cells
    }

    /// Returns the piece on the given square, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        let (rank, file) = sq.coords();
        self.cells[rank as usize][file as usize]
    }

    /// Returns true if no piece stands on the square.
    #[inline]
    pub fn is_empty_at(&self, sq: Square) -> bool {
        self.piece_at(sq).is_none()
    }

    /// Returns a copy of this board with the given square replaced.
    #[must_use]
    pub fn with_piece(&self, sq: Square, piece: Option<Piece>) -> Board {
        let mut next = *self;
        next.set(sq, piece);
        next
    }

    /// Replaces the contents of a square in place.
    ///
    /// Only used on boards the caller owns outright, such as a scratch copy
    /// being built up by the move executor.
    #[inline]
    pub fn set(&mut self, sq: Square, piece: Option<Piece>) {
        let (rank, file) = sq.coords();
        self.cells[rank as usize][file as usize] = piece;
    }

    /// Removes and returns the piece on a square.
    #[inline]
    pub fn take(&mut self, sq: Square) -> Option<Piece> {
        let (rank, file) = sq.coords();
        self.cells[rank as usize][file as usize].take()
    }

    /// Iterates over every occupied square, a1 to h8.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|p| (sq, p)))
    }

    /// Iterates over the squares occupied by the given color.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, p)| p.color == color)
    }

    /// Scans the board for the given color's king.
    ///
    /// `None` means the board does not describe a legal position; callers
    /// treat that as a broken invariant rather than a recoverable error.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces()
            .find(|(_, p)| p.is(PieceKind::King, color))
            .map(|(sq, _)| sq)
    }

    /// Counts the pieces of one kind and color.
    pub fn count(&self, kind: PieceKind, color: Color) -> usize {
        self.pieces().filter(|(_, p)| p.is(kind, color)).count()
    }

    /// Checks that each side has exactly one king.
    ///
    /// Attack and legality queries rely on this, so every external entry
    /// point that accepts a board runs it first.
    pub fn check_kings(&self) -> Result<(), String> {
        for color in Color::BOTH {
            let kings = self.count(PieceKind::King, color);
            if kings != 1 {
                return Err(format!("expected one {color} king, found {kings}"));
            }
        }
        Ok(())
    }

    /// Returns the FEN piece-placement field.
    pub fn placement_fen(&self) -> String {
        let mut fen = String::with_capacity(64);
        for rank in (0..8).rev() {
            let mut empty_count = 0;
            for file in 0..8 {
                match self.cells[rank][file] {
                    Some(piece) => {
                        if empty_count > 0 {
                            fen.push_str(&empty_count.to_string());
                            empty_count = 0;
                        }
                        fen.push(piece.to_fen_char());
                    }
                    None => empty_count += 1,
                }
            }
            if empty_count > 0 {
                fen.push_str(&empty_count.to_string());
            }
            if rank > 0 {
                fen.push('/');
            }
        }
        fen
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({})", self.placement_fen())
    }
}

/// Renders the board as a text diagram with rank 8 at the top.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8 {
                let c = self.cells[rank][file].map_or('.', Piece::to_fen_char);
                write!(f, " {}", c)?;
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}
