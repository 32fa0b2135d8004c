//! Piece geometry and square-attack detection.
//!
//! Offsets are `(rank delta, file delta)` pairs. Attack detection walks the
//! board directly: no precomputed tables, no incremental state.

use chess_core::{Color, PieceKind, Square};

use crate::Board;

/// The eight L-shaped knight jumps.
pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

/// The eight unit steps a king can take.
pub const KING_OFFSETS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// Orthogonal ray directions (rook, queen).
pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Diagonal ray directions (bishop, queen).
pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Returns the ray directions a sliding piece moves along.
pub fn slider_directions(kind: PieceKind) -> &'static [(i8, i8)] {
    const QUEEN: [(i8, i8); 8] = [
        (1, 0),
        (-1, 0),
        (0, 1),
        (0, -1),
        (1, 1),
        (1, -1),
        (-1, 1),
        (-1, -1),
    ];
    match kind {
        PieceKind::Rook => &ROOK_DIRECTIONS,
        PieceKind::Bishop => &BISHOP_DIRECTIONS,
        PieceKind::Queen => &QUEEN,
        _ => &[],
    }
}

/// Returns true if any piece of `by_color` attacks `sq`.
///
/// Occupancy of `sq` itself does not matter; only whether a piece of
/// `by_color` could capture there.
pub fn is_square_attacked(board: &Board, sq: Square, by_color: Color) -> bool {
    let attacker_at = |offset: Option<Square>, kind: PieceKind| {
        offset
            .and_then(|from| board.piece_at(from))
            .is_some_and(|p| p.is(kind, by_color))
    };

    // Pawns attack one rank forward, so look one rank back from the target.
    let back = -by_color.pawn_direction();
    if attacker_at(sq.offset(back, -1), PieceKind::Pawn)
        || attacker_at(sq.offset(back, 1), PieceKind::Pawn)
    {
        return true;
    }

    if KNIGHT_OFFSETS
        .iter()
        .any(|&(dr, df)| attacker_at(sq.offset(dr, df), PieceKind::Knight))
    {
        return true;
    }

    if KING_OFFSETS
        .iter()
        .any(|&(dr, df)| attacker_at(sq.offset(dr, df), PieceKind::King))
    {
        return true;
    }

    ray_hits(board, sq, &ROOK_DIRECTIONS, by_color, PieceKind::Rook)
        || ray_hits(board, sq, &BISHOP_DIRECTIONS, by_color, PieceKind::Bishop)
}

/// Walks each ray from `sq`; the first occupied square either holds a
/// `by_color` slider of `kind` (or a queen) or blocks the ray.
fn ray_hits(
    board: &Board,
    sq: Square,
    directions: &[(i8, i8)],
    by_color: Color,
    kind: PieceKind,
) -> bool {
    directions.iter().any(|&(dr, df)| {
        let mut cursor = sq.offset(dr, df);
        while let Some(current) = cursor {
            if let Some(piece) = board.piece_at(current) {
                return piece.color == by_color
                    && (piece.kind == kind || piece.kind == PieceKind::Queen);
            }
            cursor = current.offset(dr, df);
        }
        false
    })
}

/// Returns true if the king of the given color is attacked.
///
/// # Panics
///
/// Panics if the board has no king of that color. Every position the
/// engine produces or accepts has one, so a missing king is a bug.
pub fn is_king_attacked(board: &Board, color: Color) -> bool {
    let king = board
        .king_square(color)
        .unwrap_or_else(|| panic!("board has no {} king: {:?}", color, board));
    is_square_attacked(board, king, color.opposite())
}
