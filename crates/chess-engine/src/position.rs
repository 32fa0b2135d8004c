//! Chess position: everything about the game that is not history.

use chess_core::{Color, FenError, FenParser, Square};
use serde::{Deserialize, Serialize};

use crate::Board;

/// Which side of the board a castling move goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CastleSide {
    Kingside,
    Queenside,
}

impl CastleSide {
    /// Both sides, kingside first.
    pub const BOTH: [CastleSide; 2] = [CastleSide::Kingside, CastleSide::Queenside];

    /// The corner square the castling rook starts on.
    pub const fn rook_origin(self, color: Color) -> Square {
        match (self, color) {
            (CastleSide::Kingside, Color::White) => Square::H1,
            (CastleSide::Queenside, Color::White) => Square::A1,
            (CastleSide::Kingside, Color::Black) => Square::H8,
            (CastleSide::Queenside, Color::Black) => Square::A8,
        }
    }

    /// The square the castling rook lands on (the one the king crosses).
    pub const fn rook_target(self, color: Color) -> Square {
        match (self, color) {
            (CastleSide::Kingside, Color::White) => Square::F1,
            (CastleSide::Queenside, Color::White) => Square::D1,
            (CastleSide::Kingside, Color::Black) => Square::F8,
            (CastleSide::Queenside, Color::Black) => Square::D8,
        }
    }

    /// The square the king lands on.
    pub const fn king_target(self, color: Color) -> Square {
        match (self, color) {
            (CastleSide::Kingside, Color::White) => Square::G1,
            (CastleSide::Queenside, Color::White) => Square::C1,
            (CastleSide::Kingside, Color::Black) => Square::G8,
            (CastleSide::Queenside, Color::Black) => Square::C8,
        }
    }

    /// The side a king move of `file_delta` files castles toward, if it is a castling step.
    pub const fn from_king_step(file_delta: i8) -> Option<CastleSide> {
        match file_delta {
            2 => Some(CastleSide::Kingside),
            -2 => Some(CastleSide::Queenside),
            _ => None,
        }
    }
}

/// The square a king starts on and must still occupy to castle.
pub const fn king_origin(color: Color) -> Square {
    match color {
        Color::White => Square::E1,
        Color::Black => Square::E8,
    }
}

/// Four independent castling flags.
///
/// A flag only ever goes from `true` to `false` within one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CastlingRights {
    pub white_kingside: bool,
    pub white_queenside: bool,
    pub black_kingside: bool,
    pub black_queenside: bool,
}

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights {
        white_kingside: false,
        white_queenside: false,
        black_kingside: false,
        black_queenside: false,
    };

    pub const ALL: CastlingRights = CastlingRights {
        white_kingside: true,
        white_queenside: true,
        black_kingside: true,
        black_queenside: true,
    };

    /// Returns true if the given color may still castle to the given side.
    #[inline]
    pub const fn has(self, color: Color, side: CastleSide) -> bool {
        match (color, side) {
            (Color::White, CastleSide::Kingside) => self.white_kingside,
            (Color::White, CastleSide::Queenside) => self.white_queenside,
            (Color::Black, CastleSide::Kingside) => self.black_kingside,
            (Color::Black, CastleSide::Queenside) => self.black_queenside,
        }
    }

    /// Clears one right.
    #[inline]
    pub fn remove(&mut self, color: Color, side: CastleSide) {
        let flag = match (color, side) {
            (Color::White, CastleSide::Kingside) => &mut self.white_kingside,
            (Color::White, CastleSide::Queenside) => &mut self.white_queenside,
            (Color::Black, CastleSide::Kingside) => &mut self.black_kingside,
            (Color::Black, CastleSide::Queenside) => &mut self.black_queenside,
        };
        *flag = false;
    }

    /// Clears both rights for a color.
    #[inline]
    pub fn remove_color(&mut self, color: Color) {
        self.remove(color, CastleSide::Kingside);
        self.remove(color, CastleSide::Queenside);
    }

    /// Returns true if any right remains.
    #[inline]
    pub const fn any(self) -> bool {
        self.white_kingside || self.white_queenside || self.black_kingside || self.black_queenside
    }

    /// Returns the FEN castling field.
    pub fn to_fen(self) -> String {
        if !self.any() {
            return "-".to_string();
        }
        let mut field = String::with_capacity(4);
        for (flag, c) in [
            (self.white_kingside, 'K'),
            (self.white_queenside, 'Q'),
            (self.black_kingside, 'k'),
            (self.black_queenside, 'q'),
        ] {
            if flag {
                field.push(c);
            }
        }
        field
    }
}

impl Default for CastlingRights {
    fn default() -> Self {
        Self::ALL
    }
}

/// A chess position without history: board, side to move, castling rights,
/// en passant target, and the two move counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    /// Piece placement.
    pub board: Board,

    /// The side to move.
    pub side_to_move: Color,

    /// Castling rights.
    pub castling: CastlingRights,

    /// En passant target square: the square a pawn skipped over on the
    /// immediately preceding move, if that move was a double advance.
    pub en_passant: Option<Square>,

    /// Half-moves since the last pawn move or capture.
    pub halfmove_clock: u32,

    /// Fullmove number (starts at 1, increments after Black's move).
    pub fullmove_number: u32,
}

impl Position {
    /// Creates the standard starting position.
    pub fn startpos() -> Self {
        Position {
            board: Board::initial(),
            side_to_move: Color::White,
            castling: CastlingRights::ALL,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Creates a position from a FEN string.
    ///
    /// Besides the syntax checks, the board must hold exactly one king per
    /// side.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parsed = FenParser::parse(fen)?;
        let board = Board::from_fen(&parsed);
        board.check_kings().map_err(FenError::InvalidPiecePlacement)?;
        let [white_kingside, white_queenside, black_kingside, black_queenside] = parsed.castling;
        Ok(Position {
            board,
            side_to_move: parsed.side_to_move,
            castling: CastlingRights {
                white_kingside,
                white_queenside,
                black_kingside,
                black_queenside,
            },
            en_passant: parsed.en_passant,
            halfmove_clock: parsed.halfmove_clock,
            fullmove_number: parsed.fullmove_number,
        })
    }

    /// Converts the position to a FEN string.
    pub fn to_fen(&self) -> String {
        format!(
            "{} {} {}",
            self.key(),
            self.halfmove_clock,
            self.fullmove_number
        )
    }

    /// Returns the position key recorded in the repetition history.
    ///
    /// This is the first four FEN fields: two positions share a key exactly
    /// when board, side to move, castling rights, and en passant target all
    /// match.
    pub fn key(&self) -> String {
        let en_passant = self
            .en_passant
            .map_or_else(|| "-".to_string(), Square::to_algebraic);
        format!(
            "{} {} {} {}",
            self.board.placement_fen(),
            self.side_to_move.fen_char(),
            self.castling.to_fen(),
            en_passant
        )
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}
