//! FEN (Forsyth-Edwards Notation) parsing.

use crate::{Color, Piece, Square};
use thiserror::Error;

/// Errors that can occur when parsing FEN strings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid FEN: expected 4 or 6 fields, got {0}")]
    InvalidPartCount(usize),

    #[error("invalid piece placement: {0}")]
    InvalidPiecePlacement(String),

    #[error("invalid active color: expected 'w' or 'b', got '{0}'")]
    InvalidActiveColor(String),

    #[error("invalid castling rights: {0}")]
    InvalidCastlingRights(String),

    #[error("invalid en passant square: {0}")]
    InvalidEnPassantSquare(String),

    #[error("invalid halfmove clock: {0}")]
    InvalidHalfmoveClock(String),

    #[error("invalid fullmove number: {0}")]
    InvalidFullmoveNumber(String),
}

/// Parsed FEN fields.
///
/// Holds the validated components of a FEN record. The engine turns this
/// into its own board and position types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenParser {
    /// Occupied squares in a1..h8 order.
    pub pieces: Vec<(Square, Piece)>,
    /// Side to move.
    pub side_to_move: Color,
    /// Castling availability as `[white kingside, white queenside, black kingside, black queenside]`.
    pub castling: [bool; 4],
    /// En passant target square, if any.
    pub en_passant: Option<Square>,
    /// Halfmove clock (for the fifty-move rule). Defaults to 0 when omitted.
    pub halfmove_clock: u32,
    /// Fullmove number. Defaults to 1 when omitted.
    pub fullmove_number: u32,
}

impl FenParser {
    /// The standard starting position FEN.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// Parses a FEN string.
    ///
    /// The two clock fields may be omitted together, which makes a
    /// four-field position key parseable as well.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();

        if parts.len() != 6 && parts.len() != 4 {
            return Err(FenError::InvalidPartCount(parts.len()));
        }

        let pieces = Self::parse_piece_placement(parts[0])?;

        let side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::InvalidActiveColor(other.to_string())),
        };

        let castling = Self::parse_castling(parts[2])?;
        let en_passant = Self::parse_en_passant(parts[3])?;

        let (halfmove_clock, fullmove_number) = if parts.len() == 6 {
            let halfmove = parts[4]
                .parse::<u32>()
                .map_err(|_| FenError::InvalidHalfmoveClock(parts[4].to_string()))?;
            let fullmove = parts[5]
                .parse::<u32>()
                .ok()
                .filter(|&n| n >= 1)
                .ok_or_else(|| FenError::InvalidFullmoveNumber(parts[5].to_string()))?;
            (halfmove, fullmove)
        } else {
            (0, 1)
        };

        Ok(FenParser {
            pieces,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
        })
    }

    fn parse_piece_placement(placement: &str) -> Result<Vec<(Square, Piece)>, FenError> {
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::InvalidPiecePlacement(format!(
                "expected 8 ranks, got {}",
                ranks.len()
            )));
        }

        let mut pieces = Vec::with_capacity(32);
        // FEN lists rank 8 first.
        for (i, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - i as i8;
            let mut file: i8 = 0;
            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10).filter(|d| (1..=8).contains(d)) {
                    file += skip as i8;
                } else if let Some(piece) = Piece::from_fen_char(c) {
                    let sq = Square::from_coords(rank, file).ok_or_else(|| {
                        FenError::InvalidPiecePlacement(format!(
                            "rank {} has more than 8 squares",
                            rank + 1
                        ))
                    })?;
                    pieces.push((sq, piece));
                    file += 1;
                } else {
                    return Err(FenError::InvalidPiecePlacement(format!(
                        "invalid character '{}' in rank {}",
                        c,
                        rank + 1
                    )));
                }
                if file > 8 {
                    break;
                }
            }
            if file != 8 {
                return Err(FenError::InvalidPiecePlacement(format!(
                    "rank {} has {} squares, expected 8",
                    rank + 1,
                    file
                )));
            }
        }

        pieces.sort_by_key(|(sq, _)| *sq);
        Ok(pieces)
    }

    fn parse_castling(castling: &str) -> Result<[bool; 4], FenError> {
        let mut rights = [false; 4];
        if castling == "-" {
            return Ok(rights);
        }

        for c in castling.chars() {
            let slot = match c {
                'K' => 0,
                'Q' => 1,
                'k' => 2,
                'q' => 3,
                _ => {
                    return Err(FenError::InvalidCastlingRights(format!(
                        "invalid character '{}'",
                        c
                    )))
                }
            };
            if rights[slot] {
                return Err(FenError::InvalidCastlingRights(format!(
                    "duplicate '{}'",
                    c
                )));
            }
            rights[slot] = true;
        }

        Ok(rights)
    }

    fn parse_en_passant(ep: &str) -> Result<Option<Square>, FenError> {
        if ep == "-" {
            return Ok(None);
        }

        match Square::from_algebraic(ep) {
            Some(sq) if sq.rank().number() == 3 || sq.rank().number() == 6 => Ok(Some(sq)),
            _ => Err(FenError::InvalidEnPassantSquare(ep.to_string())),
        }
    }
}

impl Default for FenParser {
    fn default() -> Self {
        Self::parse(Self::STARTPOS).expect("STARTPOS is valid")
    }
}
