//! Legal move filtering.
//!
//! Every check here goes through [`leaves_king_safe`]: play the candidate
//! on a scratch board, then ask whether the mover's king is attacked.
//! Status detection in [`crate::rules`] reuses the same primitive through
//! [`has_legal_moves`].

use chess_core::{Move, PieceKind, Square};

use crate::execute::execute_move;
use crate::movegen::{all_pseudo_legal_moves, castling_moves, is_king_attacked, pseudo_legal_moves};
use crate::{MoveList, Position};

/// Returns true if playing `mv` does not leave the mover's king attacked.
///
/// An empty origin square is never safe.
///
/// # Panics
///
/// Panics if the mover has no king on the board.
pub fn leaves_king_safe(position: &Position, mv: Move) -> bool {
    match execute_move(&position.board, mv, position.en_passant) {
        Some(exec) => !is_king_attacked(&exec.board, exec.piece.color),
        None => false,
    }
}

/// Returns true if `mv` is legal for the side to move.
///
/// The origin must hold a piece of the side to move, the move must be one of
/// that piece's candidates (destination and, when given, promotion piece),
/// and it must not leave the king attacked.
pub fn is_legal_move(position: &Position, mv: Move) -> bool {
    let Some(piece) = position.board.piece_at(mv.from) else {
        return false;
    };
    if piece.color != position.side_to_move {
        return false;
    }

    let candidates = candidate_moves(position, mv.from);
    let listed = candidates.iter().any(|c| {
        c.to == mv.to && (mv.promotion.is_none() || c.promotion == mv.promotion)
    });

    listed && leaves_king_safe(position, mv)
}

/// Returns the legal moves of the piece on `from`.
///
/// The square's piece may belong to either side; its moves are generated as
/// if it were that side's turn. Empty squares yield an empty list.
pub fn legal_moves_for_piece(position: &Position, from: Square) -> MoveList {
    let mut moves = candidate_moves(position, from);
    moves.retain(|m| leaves_king_safe(position, *m));
    moves
}

/// Returns every legal move for the side to move, castling included.
pub fn all_legal_moves(position: &Position) -> MoveList {
    let color = position.side_to_move;
    let mut moves = all_pseudo_legal_moves(&position.board, color, position.en_passant);
    moves.extend_from(&castling_moves(&position.board, color, position.castling));
    moves.retain(|m| leaves_king_safe(position, *m));
    moves
}

/// Returns true if the side to move has at least one legal move.
///
/// Stops at the first safe candidate.
pub fn has_legal_moves(position: &Position) -> bool {
    let color = position.side_to_move;
    all_pseudo_legal_moves(&position.board, color, position.en_passant)
        .iter()
        .chain(castling_moves(&position.board, color, position.castling).iter())
        .any(|m| leaves_king_safe(position, *m))
}

/// Pseudo-legal moves for one square, plus castling when it holds a king.
fn candidate_moves(position: &Position, from: Square) -> MoveList {
    let mut moves = pseudo_legal_moves(&position.board, from, position.en_passant);
    if let Some(piece) = position.board.piece_at(from) {
        if piece.kind == PieceKind::King {
            moves.extend_from(&castling_moves(&position.board, piece.color, position.castling));
        }
    }
    moves
}
