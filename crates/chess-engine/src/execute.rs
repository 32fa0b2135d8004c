//! Move execution.
//!
//! Applies a move to a board without judging its legality: castling,
//! en passant, promotion and ordinary captures are recognised from the
//! shape of the move. Also derives the bookkeeping that follows a move
//! (castling rights, en passant target, clocks).

use chess_core::{Color, Move, Piece, PieceKind, Square};

use crate::position::CastleSide;
use crate::{Board, CastlingRights, Position};

/// The outcome of applying a move to a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Execution {
    /// The board after the move.
    pub board: Board,
    /// The piece that moved, as it stood on the origin square.
    pub piece: Piece,
    /// The piece removed from the board, if any.
    pub captured: Option<Piece>,
    /// Castling variant, if the move castled.
    pub castling: Option<CastleSide>,
    /// True if the capture was en passant.
    pub is_en_passant: bool,
}

/// Applies `mv` to a copy of `board`.
///
/// Returns `None` if the origin square is empty. `en_passant` is the target
/// square in force before the move.
pub fn execute_move(board: &Board, mv: Move, en_passant: Option<Square>) -> Option<Execution> {
    let mut next = *board;
    let piece = next.take(mv.from)?;
    let (from_rank, from_file) = mv.from.coords();
    let (_, to_file) = mv.to.coords();
    let file_delta = to_file as i8 - from_file as i8;

    let mut captured = None;
    let mut castling = None;
    let mut is_en_passant = false;

    if piece.kind == PieceKind::King && file_delta.abs() == 2 {
        let side = CastleSide::from_king_step(file_delta)?;
        let rook = next.take(side.rook_origin(piece.color));
        next.set(side.rook_target(piece.color), rook);
        castling = Some(side);
    } else if piece.kind == PieceKind::Pawn && file_delta != 0 && Some(mv.to) == en_passant {
        // The captured pawn sits beside the origin, on the destination file.
        let victim = Square::from_coords(from_rank as i8, to_file as i8)?;
        captured = next.take(victim);
        is_en_passant = true;
    } else {
        captured = next.piece_at(mv.to).filter(|p| p.color != piece.color);
    }

    let placed = match mv.promotion {
        Some(kind) => Piece::new(kind, piece.color),
        None => piece,
    };
    next.set(mv.to, Some(placed));

    Some(Execution {
        board: next,
        piece,
        captured,
        castling,
        is_en_passant,
    })
}

/// Derives the castling rights that remain after a move.
///
/// A king move clears both of its color's rights; a rook leaving its corner
/// clears that corner; a rook captured on its corner clears that corner for
/// the rook's color.
pub fn update_castling_rights(
    rights: CastlingRights,
    piece: Piece,
    mv: Move,
    captured: Option<Piece>,
) -> CastlingRights {
    let mut next = rights;
    match piece.kind {
        PieceKind::King => next.remove_color(piece.color),
        PieceKind::Rook => {
            if let Some(side) = corner_side(mv.from, piece.color) {
                next.remove(piece.color, side);
            }
        }
        _ => {}
    }
    if let Some(victim) = captured.filter(|p| p.kind == PieceKind::Rook) {
        if let Some(side) = corner_side(mv.to, victim.color) {
            next.remove(victim.color, side);
        }
    }
    next
}

fn corner_side(sq: Square, color: Color) -> Option<CastleSide> {
    CastleSide::BOTH
        .into_iter()
        .find(|side| side.rook_origin(color) == sq)
}

/// Returns the en passant target created by a move: the skipped square if a
/// pawn advanced two ranks from its starting rank, otherwise `None`.
pub fn calculate_en_passant_target(piece: Piece, mv: Move) -> Option<Square> {
    if piece.kind != PieceKind::Pawn || mv.from.rank().index() != piece.color.pawn_rank() {
        return None;
    }
    let dir = piece.color.pawn_direction();
    if mv.from.offset(2 * dir, 0) != Some(mv.to) {
        return None;
    }
    mv.from.offset(dir, 0)
}

/// Returns true if a pawn landing on `to` must promote.
pub fn requires_promotion(piece: Piece, to: Square) -> bool {
    piece.kind == PieceKind::Pawn && to.rank().index() == piece.color.promotion_rank()
}

/// Checks the promotion choice of a move made by `piece`.
///
/// Moves that do not promote are trivially valid; a promoting move needs a
/// queen, rook, bishop or knight.
pub fn is_valid_promotion(piece: Piece, mv: Move) -> bool {
    if !requires_promotion(piece, mv.to) {
        return true;
    }
    mv.promotion.is_some_and(PieceKind::is_promotion_target)
}

/// Plays `mv` on `position` and returns the successor position with all
/// bookkeeping applied: castling rights, en passant target, half-move clock
/// (reset on pawn moves and captures), full-move number (after Black), and
/// side to move.
///
/// Legality is not checked. Returns `None` if the origin square is empty.
pub fn play(position: &Position, mv: Move) -> Option<(Position, Execution)> {
    let exec = execute_move(&position.board, mv, position.en_passant)?;
    let resets_clock = exec.piece.kind == PieceKind::Pawn || exec.captured.is_some();
    let mover = exec.piece.color;

    let next = Position {
        board: exec.board,
        side_to_move: mover.opposite(),
        castling: update_castling_rights(position.castling, exec.piece, mv, exec.captured),
        en_passant: calculate_en_passant_target(exec.piece, mv),
        halfmove_clock: if resets_clock {
            0
        } else {
            position.halfmove_clock.saturating_add(1)
        },
        fullmove_number: if mover == Color::Black {
            position.fullmove_number.saturating_add(1)
        } else {
            position.fullmove_number
        },
    };

    Some((next, exec))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn uci(s: &str) -> Move {
        Move::from_uci(s).unwrap()
    }

    fn white(kind: PieceKind) -> Piece {
        Piece::new(kind, Color::White)
    }

    fn black(kind: PieceKind) -> Piece {
        Piece::new(kind, Color::Black)
    }

    #[test]
    fn empty_origin_is_rejected() {
        assert!(execute_move(&Board::initial(), uci("e4e5"), None).is_none());
    }

    #[test]
    fn quiet_move_relocates_piece() {
        let exec = execute_move(&Board::initial(), uci("g1f3"), None).unwrap();
        assert_eq!(exec.piece, white(PieceKind::Knight));
        assert_eq!(exec.board.piece_at(sq("f3")), Some(white(PieceKind::Knight)));
        assert!(exec.board.is_empty_at(Square::G1));
        assert_eq!(exec.captured, None);
        assert_eq!(exec.castling, None);
        assert!(!exec.is_en_passant);
    }

    #[test]
    fn capture_removes_victim() {
        let pos = Position::from_fen("4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1").unwrap();
        let exec = execute_move(&pos.board, uci("e4d5"), None).unwrap();
        assert_eq!(exec.captured, Some(black(PieceKind::Pawn)));
        assert_eq!(exec.board.piece_at(sq("d5")), Some(white(PieceKind::Pawn)));
        assert_eq!(exec.board.pieces().count(), 3);
    }

    #[test]
    fn en_passant_removes_pawn_beside_origin() {
        let pos =
            Position::from_fen("rnbqkbnr/pppp1ppp/8/4pP2/8/8/PPPPP1PP/RNBQKBNR w KQkq e6 0 1")
                .unwrap();
        let exec = execute_move(&pos.board, uci("f5e6"), pos.en_passant).unwrap();
        assert!(exec.is_en_passant);
        assert_eq!(exec.captured, Some(black(PieceKind::Pawn)));
        assert!(exec.board.is_empty_at(sq("e5")));
        assert_eq!(exec.board.piece_at(sq("e6")), Some(white(PieceKind::Pawn)));
    }

    #[test]
    fn castling_moves_both_pieces() {
        let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();

        let exec = execute_move(&pos.board, uci("e1g1"), None).unwrap();
        assert_eq!(exec.castling, Some(CastleSide::Kingside));
        assert_eq!(exec.board.piece_at(Square::G1), Some(white(PieceKind::King)));
        assert_eq!(exec.board.piece_at(Square::F1), Some(white(PieceKind::Rook)));
        assert!(exec.board.is_empty_at(Square::H1));
        assert!(exec.board.is_empty_at(Square::E1));

        let exec = execute_move(&pos.board, uci("e8c8"), None).unwrap();
        assert_eq!(exec.castling, Some(CastleSide::Queenside));
        assert_eq!(exec.board.piece_at(Square::C8), Some(black(PieceKind::King)));
        assert_eq!(exec.board.piece_at(Square::D8), Some(black(PieceKind::Rook)));
        assert!(exec.board.is_empty_at(Square::A8));
        assert_eq!(exec.captured, None);
    }

    #[test]
    fn promotion_places_new_piece() {
        let pos = Position::from_fen("1n2k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let exec = execute_move(&pos.board, uci("a7b8n"), None).unwrap();
        assert_eq!(exec.board.piece_at(Square::B8), Some(white(PieceKind::Knight)));
        assert_eq!(exec.captured, Some(black(PieceKind::Knight)));
        assert_eq!(exec.piece, white(PieceKind::Pawn));
    }

    #[test]
    fn king_move_clears_both_rights() {
        let rights = update_castling_rights(
            CastlingRights::ALL,
            white(PieceKind::King),
            uci("e1e2"),
            None,
        );
        assert!(!rights.has(Color::White, CastleSide::Kingside));
        assert!(!rights.has(Color::White, CastleSide::Queenside));
        assert!(rights.has(Color::Black, CastleSide::Kingside));
    }

    #[test]
    fn rook_leaving_corner_clears_that_side() {
        let rights = update_castling_rights(
            CastlingRights::ALL,
            black(PieceKind::Rook),
            uci("a8a5"),
            None,
        );
        assert!(!rights.has(Color::Black, CastleSide::Queenside));
        assert!(rights.has(Color::Black, CastleSide::Kingside));

        // A rook that is not on its corner changes nothing.
        let rights = update_castling_rights(
            CastlingRights::ALL,
            white(PieceKind::Rook),
            uci("d1d5"),
            None,
        );
        assert_eq!(rights, CastlingRights::ALL);
    }

    #[test]
    fn capturing_corner_rook_clears_victims_right() {
        let rights = update_castling_rights(
            CastlingRights::ALL,
            white(PieceKind::Bishop),
            uci("b7h1"),
            Some(white(PieceKind::Rook)),
        );
        assert_eq!(rights, CastlingRights::ALL);

        let rights = update_castling_rights(
            CastlingRights::ALL,
            black(PieceKind::Bishop),
            uci("b7h1"),
            Some(white(PieceKind::Rook)),
        );
        assert!(!rights.has(Color::White, CastleSide::Kingside));
        assert!(rights.has(Color::White, CastleSide::Queenside));
    }

    #[test]
    fn en_passant_target_only_after_double_advance() {
        let pawn = white(PieceKind::Pawn);
        assert_eq!(calculate_en_passant_target(pawn, uci("e2e4")), Some(sq("e3")));
        assert_eq!(calculate_en_passant_target(pawn, uci("e2e3")), None);
        assert_eq!(calculate_en_passant_target(pawn, uci("e3e5")), None);
        assert_eq!(
            calculate_en_passant_target(black(PieceKind::Pawn), uci("d7d5")),
            Some(sq("d6"))
        );
        assert_eq!(
            calculate_en_passant_target(white(PieceKind::Rook), uci("a2a4")),
            None
        );
    }

    #[test]
    fn promotion_rules() {
        let pawn = white(PieceKind::Pawn);
        assert!(requires_promotion(pawn, sq("e8")));
        assert!(!requires_promotion(pawn, sq("e7")));
        assert!(!requires_promotion(white(PieceKind::Rook), sq("e8")));
        assert!(requires_promotion(black(PieceKind::Pawn), sq("a1")));

        assert!(is_valid_promotion(pawn, uci("e6e7")));
        assert!(is_valid_promotion(pawn, uci("e7e8q")));
        assert!(is_valid_promotion(pawn, uci("e7e8n")));
        assert!(!is_valid_promotion(pawn, uci("e7e8")));
        assert!(!is_valid_promotion(pawn, uci("e7e8k")));
        assert!(!is_valid_promotion(pawn, uci("e7e8p")));
    }

    #[test]
    fn play_updates_clocks_and_side() {
        let start = Position::startpos();
        let (after_e4, _) = play(&start, uci("e2e4")).unwrap();
        assert_eq!(after_e4.side_to_move, Color::Black);
        assert_eq!(after_e4.en_passant, Some(sq("e3")));
        assert_eq!(after_e4.halfmove_clock, 0);
        assert_eq!(after_e4.fullmove_number, 1);

        let (after_nf6, _) = play(&after_e4, uci("g8f6")).unwrap();
        assert_eq!(after_nf6.en_passant, None);
        assert_eq!(after_nf6.halfmove_clock, 1);
        assert_eq!(after_nf6.fullmove_number, 2);
        assert_eq!(after_nf6.side_to_move, Color::White);
    }

    #[test]
    fn play_counters_saturate() {
        let position = Position {
            side_to_move: Color::Black,
            halfmove_clock: u32::MAX,
            fullmove_number: u32::MAX,
            ..Position::startpos()
        };
        let (next, _) = play(&position, uci("g8f6")).unwrap();
        assert_eq!(next.halfmove_clock, u32::MAX);
        assert_eq!(next.fullmove_number, u32::MAX);

        let (reset, _) = play(&position, uci("e7e5")).unwrap();
        assert_eq!(reset.halfmove_clock, 0);
        assert_eq!(reset.fullmove_number, u32::MAX);
    }
}
