//! Draw conditions that do not depend on move generation.

use chess_core::{Color, PieceKind, Square};

use crate::Board;

/// Returns true if neither side can possibly checkmate.
///
/// Covers king vs king, king and one minor piece vs bare king, and king and
/// bishop vs king and bishop with both bishops on the same square color.
pub fn is_insufficient_material(board: &Board) -> bool {
    let mut white: Vec<(Square, PieceKind)> = Vec::new();
    let mut black: Vec<(Square, PieceKind)> = Vec::new();

    for (sq, piece) in board.pieces() {
        if piece.kind == PieceKind::King {
            continue;
        }
        match piece.color {
            Color::White => white.push((sq, piece.kind)),
            Color::Black => black.push((sq, piece.kind)),
        }
    }

    match (white.as_slice(), black.as_slice()) {
        ([], []) => true,
        ([(_, kind)], []) | ([], [(_, kind)]) => kind.is_minor(),
        ([(a, PieceKind::Bishop)], [(b, PieceKind::Bishop)]) => a.is_light() == b.is_light(),
        _ => false,
    }
}

/// Returns true if the most recent key occurs at least three times.
pub fn is_threefold_repetition(position_history: &[String]) -> bool {
    let Some(current) = position_history.last() else {
        return false;
    };
    position_history.iter().filter(|key| *key == current).count() >= 3
}

/// Returns true once the half-move clock reaches 100.
pub fn is_fifty_move_rule(halfmove_clock: u32) -> bool {
    halfmove_clock >= 100
}
