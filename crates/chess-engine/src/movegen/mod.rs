//! Pseudo-legal move generation.
//!
//! Moves produced here obey each piece's geometry and blocking rules but
//! ignore whether the mover's own king is left in check. Filtering that out
//! is [`crate::validate`]'s job.

mod attacks;
pub mod perft;

use chess_core::{Color, Move, Piece, PieceKind, Square};

use crate::position::{king_origin, CastleSide};
use crate::{Board, CastlingRights};

pub use attacks::{
    is_king_attacked, is_square_attacked, slider_directions, BISHOP_DIRECTIONS, KING_OFFSETS,
    KNIGHT_OFFSETS, ROOK_DIRECTIONS,
};

/// A list of moves with a fixed maximum capacity.
///
/// Generation pushes into a stack-allocated array instead of growing a
/// heap vector.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; Self::MAX_MOVES],
    len: usize,
}

impl MoveList {
    /// Upper bound on pseudo-legal moves for one side in any reachable position.
    pub const MAX_MOVES: usize = 384;

    const FILLER: Move = Move::new(Square::A1, Square::A1);

    /// Creates an empty move list.
    #[inline]
    pub const fn new() -> Self {
        MoveList {
            moves: [Self::FILLER; Self::MAX_MOVES],
            len: 0,
        }
    }

    /// Adds a move to the list.
    #[inline]
    pub fn push(&mut self, m: Move) {
        debug_assert!(self.len < Self::MAX_MOVES);
        self.moves[self.len] = m;
        self.len += 1;
    }

    /// Returns the number of moves.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a slice of the moves.
    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    /// Iterates over the moves.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }

    /// Returns true if the list contains the move.
    #[inline]
    pub fn contains(&self, m: &Move) -> bool {
        self.as_slice().contains(m)
    }

    /// Appends every move from another list.
    pub fn extend_from(&mut self, other: &MoveList) {
        for &m in other {
            self.push(m);
        }
    }

    /// Clears the move list.
    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Retains only moves for which the predicate returns true.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&Move) -> bool,
    {
        let mut write = 0;
        for read in 0..self.len {
            if f(&self.moves[read]) {
                self.moves[write] = self.moves[read];
                write += 1;
            }
        }
        self.len = write;
    }

    /// Copies the moves into a vector.
    pub fn to_vec(&self) -> Vec<Move> {
        self.as_slice().to_vec()
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.as_slice()[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Generates pseudo-legal moves for the piece standing on `from`.
///
/// Returns an empty list for an empty square. Castling is not included;
/// see [`castling_moves`].
pub fn pseudo_legal_moves(board: &Board, from: Square, en_passant: Option<Square>) -> MoveList {
    let mut moves = MoveList::new();
    if let Some(piece) = board.piece_at(from) {
        generate_piece_moves(board, from, piece, en_passant, &mut moves);
    }
    moves
}

/// Generates pseudo-legal moves for every piece of `color`, castling excluded.
pub fn all_pseudo_legal_moves(board: &Board, color: Color, en_passant: Option<Square>) -> MoveList {
    let mut moves = MoveList::new();
    for (from, piece) in board.pieces_of(color) {
        generate_piece_moves(board, from, piece, en_passant, &mut moves);
    }
    moves
}

fn generate_piece_moves(
    board: &Board,
    from: Square,
    piece: Piece,
    en_passant: Option<Square>,
    moves: &mut MoveList,
) {
    match piece.kind {
        PieceKind::Pawn => generate_pawn_moves(board, from, piece.color, en_passant, moves),
        PieceKind::Knight => generate_step_moves(board, from, piece.color, &KNIGHT_OFFSETS, moves),
        PieceKind::King => generate_step_moves(board, from, piece.color, &KING_OFFSETS, moves),
        PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
            generate_slider_moves(board, from, piece.color, slider_directions(piece.kind), moves)
        }
    }
}

/// Kings and knights: one hop per offset, no blocking. A destination is
/// taken if empty or enemy-occupied.
fn generate_step_moves(
    board: &Board,
    from: Square,
    color: Color,
    offsets: &[(i8, i8)],
    moves: &mut MoveList,
) {
    for &(dr, df) in offsets {
        if let Some(to) = from.offset(dr, df) {
            if board.piece_at(to).map_or(true, |p| p.color != color) {
                moves.push(Move::new(from, to));
            }
        }
    }
}

/// Walks each ray until the first occupied square, which is included only
/// if it holds an enemy piece.
fn generate_slider_moves(
    board: &Board,
    from: Square,
    color: Color,
    directions: &[(i8, i8)],
    moves: &mut MoveList,
) {
    for &(dr, df) in directions {
        let mut cursor = from.offset(dr, df);
        while let Some(to) = cursor {
            match board.piece_at(to) {
                None => moves.push(Move::new(from, to)),
                Some(p) => {
                    if p.color != color {
                        moves.push(Move::new(from, to));
                    }
                    break;
                }
            }
            cursor = to.offset(dr, df);
        }
    }
}

fn generate_pawn_moves(
    board: &Board,
    from: Square,
    color: Color,
    en_passant: Option<Square>,
    moves: &mut MoveList,
) {
    let dir = color.pawn_direction();

    // Pushes
    if let Some(one) = from.offset(dir, 0).filter(|sq| board.is_empty_at(*sq)) {
        push_pawn_move(from, one, color, moves);

        if from.rank().index() == color.pawn_rank() {
            if let Some(two) = one.offset(dir, 0).filter(|sq| board.is_empty_at(*sq)) {
                moves.push(Move::new(from, two));
            }
        }
    }

    // Captures, including en passant onto the skipped square.
    for df in [-1, 1] {
        let Some(to) = from.offset(dir, df) else {
            continue;
        };
        let enemy_there = board.piece_at(to).is_some_and(|p| p.color != color);
        if enemy_there || is_en_passant_target(to, color, en_passant) {
            push_pawn_move(from, to, color, moves);
        }
    }
}

/// The target only counts for the side it was created against: a White
/// capture lands on rank 6, a Black one on rank 3.
fn is_en_passant_target(to: Square, color: Color, en_passant: Option<Square>) -> bool {
    let capture_rank = color.promotion_rank() as i8 - 2 * color.pawn_direction();
    en_passant == Some(to) && to.rank().index() as i8 == capture_rank
}

/// Adds a pawn move, expanded to one move per promotion piece when it
/// lands on the far rank.
fn push_pawn_move(from: Square, to: Square, color: Color, moves: &mut MoveList) {
    if to.rank().index() == color.promotion_rank() {
        for kind in PieceKind::PROMOTIONS {
            moves.push(Move::with_promotion(from, to, kind));
        }
    } else {
        moves.push(Move::new(from, to));
    }
}

/// Generates castling candidates for `color`'s king.
///
/// For each side whose right is still held: the king must stand on its
/// origin and not be in check, every square between king and rook must be
/// empty, the rook must still be on its corner, and neither the square the
/// king crosses nor the one it lands on may be attacked.
pub fn castling_moves(board: &Board, color: Color, rights: CastlingRights) -> MoveList {
    let mut moves = MoveList::new();
    let king_from = king_origin(color);
    let them = color.opposite();

    if board.piece_at(king_from) != Some(Piece::new(PieceKind::King, color)) {
        return moves;
    }
    if is_square_attacked(board, king_from, them) {
        return moves;
    }

    for side in CastleSide::BOTH {
        if !rights.has(color, side) {
            continue;
        }
        let rook_from = side.rook_origin(color);
        if board.piece_at(rook_from) != Some(Piece::new(PieceKind::Rook, color)) {
            continue;
        }

        let (lo, hi) = {
            let (a, b) = (king_from.file().index(), rook_from.file().index());
            (a.min(b) + 1, a.max(b))
        };
        let rank = color.back_rank() as i8;
        let path_clear = (lo..hi).all(|file| {
            Square::from_coords(rank, file as i8).is_some_and(|sq| board.is_empty_at(sq))
        });
        if !path_clear {
            continue;
        }

        let crossed = side.rook_target(color);
        let landing = side.king_target(color);
        if is_square_attacked(board, crossed, them) || is_square_attacked(board, landing, them) {
            continue;
        }

        moves.push(Move::new(king_from, landing));
    }

    moves
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Position;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn destinations(moves: &MoveList) -> Vec<String> {
        let mut v: Vec<String> = moves.iter().map(|m| m.to.to_algebraic()).collect();
        v.sort();
        v
    }

    #[test]
    fn movelist_push_and_iterate() {
        let mut list = MoveList::new();
        assert!(list.is_empty());

        let m1 = Move::new(sq("e2"), sq("e4"));
        let m2 = Move::new(sq("d2"), sq("d4"));
        list.push(m1);
        list.push(m2);

        assert_eq!(list.len(), 2);
        assert_eq!(list[0], m1);
        assert_eq!(list[1], m2);
        assert!(list.contains(&m2));
    }

    #[test]
    fn movelist_retain_and_clear() {
        let mut list = MoveList::new();
        list.push(Move::new(sq("e2"), sq("e3")));
        list.push(Move::new(sq("e2"), sq("e4")));
        list.push(Move::new(sq("e3"), sq("e4")));

        list.retain(|m| m.from == sq("e2"));
        assert_eq!(list.len(), 2);

        list.clear();
        assert!(list.is_empty());
    }

    #[test]
    fn startpos_pseudo_legal_count() {
        let b = Board::initial();
        assert_eq!(all_pseudo_legal_moves(&b, Color::White, None).len(), 20);
        assert_eq!(all_pseudo_legal_moves(&b, Color::Black, None).len(), 20);
    }

    #[test]
    fn empty_square_has_no_moves() {
        assert!(pseudo_legal_moves(&Board::initial(), sq("e4"), None).is_empty());
    }

    #[test]
    fn king_steps_to_all_eight_neighbours() {
        let b = Position::from_fen("4k3/8/8/8/4K3/8/8/8 w - - 0 1").unwrap().board;
        let moves = pseudo_legal_moves(&b, sq("e4"), None);
        assert_eq!(
            destinations(&moves),
            ["d3", "d4", "d5", "e3", "e5", "f3", "f4", "f5"]
        );
    }

    #[test]
    fn knight_jumps_over_pieces() {
        let b = Board::initial();
        let moves = pseudo_legal_moves(&b, Square::B1, None);
        assert_eq!(destinations(&moves), ["a3", "c3"]);

        let corner = Position::from_fen("4k3/8/8/8/8/8/8/N3K3 w - - 0 1").unwrap().board;
        assert_eq!(
            destinations(&pseudo_legal_moves(&corner, Square::A1, None)),
            ["b3", "c2"]
        );
    }

    #[test]
    fn rook_stops_at_first_occupant() {
        let b = Position::from_fen("4k3/8/8/8/1p1R2P1/8/8/4K3 w - - 0 1").unwrap().board;
        let moves = pseudo_legal_moves(&b, sq("d4"), None);
        assert_eq!(
            destinations(&moves),
            ["b4", "c4", "d1", "d2", "d3", "d5", "d6", "d7", "d8", "e4", "f4"]
        );
    }

    #[test]
    fn queen_is_rook_plus_bishop() {
        let b = Position::from_fen("4k3/8/8/8/3Q4/8/8/4K3 w - - 0 1").unwrap().board;
        let queen = pseudo_legal_moves(&b, sq("d4"), None).len();
        let rook = Board::empty()
            .with_piece(sq("d4"), Some(Piece::new(PieceKind::Rook, Color::White)));
        let bishop = Board::empty()
            .with_piece(sq("d4"), Some(Piece::new(PieceKind::Bishop, Color::White)));
        assert_eq!(
            queen,
            pseudo_legal_moves(&rook, sq("d4"), None).len()
                + pseudo_legal_moves(&bishop, sq("d4"), None).len()
        );
        assert_eq!(queen, 27);
    }

    #[test]
    fn pawn_pushes_and_double_push() {
        let b = Board::initial();
        assert_eq!(destinations(&pseudo_legal_moves(&b, sq("e2"), None)), ["e3", "e4"]);
        assert_eq!(destinations(&pseudo_legal_moves(&b, sq("d7"), None)), ["d5", "d6"]);
    }

    #[test]
    fn blocked_pawn_cannot_double_push() {
        let b = Position::from_fen("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1").unwrap().board;
        assert!(pseudo_legal_moves(&b, sq("e2"), None).is_empty());

        let b = Position::from_fen("4k3/8/8/8/4n3/8/4P3/4K3 w - - 0 1").unwrap().board;
        assert_eq!(destinations(&pseudo_legal_moves(&b, sq("e2"), None)), ["e3"]);
    }

    #[test]
    fn pawn_captures_diagonally_only_enemies() {
        let b = Position::from_fen("4k3/8/8/8/8/3p1N2/4P3/4K3 w - - 0 1").unwrap().board;
        assert_eq!(
            destinations(&pseudo_legal_moves(&b, sq("e2"), None)),
            ["d3", "e3", "e4"]
        );
    }

    #[test]
    fn en_passant_capture_is_generated() {
        let pos =
            Position::from_fen("rnbqkbnr/pppp1ppp/8/4pP2/8/8/PPPPP1PP/RNBQKBNR w KQkq e6 0 1")
                .unwrap();
        let moves = pseudo_legal_moves(&pos.board, sq("f5"), pos.en_passant);
        assert!(moves.contains(&Move::new(sq("f5"), sq("e6"))));
        let without = pseudo_legal_moves(&pos.board, sq("f5"), None);
        assert!(!without.contains(&Move::new(sq("f5"), sq("e6"))));
    }

    #[test]
    fn en_passant_target_is_side_specific() {
        // A white pawn on d2 must not "capture" onto a rank-3 target.
        let b = Position::from_fen("4k3/8/8/8/4p3/8/3P4/4K3 w - - 0 1").unwrap().board;
        let moves = pseudo_legal_moves(&b, sq("d2"), Some(sq("e3")));
        assert!(!moves.contains(&Move::new(sq("d2"), sq("e3"))));
    }

    #[test]
    fn promotion_expands_to_four_moves() {
        let b = Position::from_fen("1n2k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap().board;
        let moves = pseudo_legal_moves(&b, sq("a7"), None);
        assert_eq!(moves.len(), 8);
        assert!(moves.iter().all(|m| m.promotion.is_some()));
        assert!(moves.contains(&Move::with_promotion(sq("a7"), sq("b8"), PieceKind::Knight)));
        assert!(!moves.contains(&Move::new(sq("a7"), sq("a8"))));
    }

    #[test]
    fn castling_both_sides() {
        let pos = Position::from_fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1").unwrap();
        let moves = castling_moves(&pos.board, Color::White, pos.castling);
        assert!(moves.contains(&Move::new(Square::E1, Square::G1)));
        assert!(moves.contains(&Move::new(Square::E1, Square::C1)));
        let black = castling_moves(&pos.board, Color::Black, pos.castling);
        assert_eq!(black.len(), 2);
    }

    #[test]
    fn no_castling_without_right() {
        let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w Qkq - 0 1").unwrap();
        let moves = castling_moves(&pos.board, Color::White, pos.castling);
        assert_eq!(destinations(&moves), ["c1"]);
    }

    #[test]
    fn no_castling_through_or_into_attack() {
        // Black rook on f-file covers f1.
        let pos = Position::from_fen("4k3/8/8/5r2/8/8/8/R3K2R w KQ - 0 1").unwrap();
        let moves = castling_moves(&pos.board, Color::White, pos.castling);
        assert_eq!(destinations(&moves), ["c1"]);

        // Black rook on c-file covers the landing square c1.
        let pos = Position::from_fen("4k3/8/8/2r5/8/8/8/R3K2R w KQ - 0 1").unwrap();
        let moves = castling_moves(&pos.board, Color::White, pos.castling);
        assert_eq!(destinations(&moves), ["g1"]);
    }

    #[test]
    fn queenside_b_file_may_be_attacked() {
        // Only d1 and c1 must be safe; an attack on b1 is irrelevant.
        let pos = Position::from_fen("4k3/8/8/1r6/8/8/8/R3K3 w Q - 0 1").unwrap();
        let moves = castling_moves(&pos.board, Color::White, pos.castling);
        assert_eq!(destinations(&moves), ["c1"]);
    }

    #[test]
    fn no_castling_out_of_check_or_when_blocked() {
        let pos = Position::from_fen("4r1k1/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
        assert!(castling_moves(&pos.board, Color::White, pos.castling).is_empty());

        let pos = Position::from_fen("4k3/8/8/8/8/8/8/RN2K1NR w KQ - 0 1").unwrap();
        assert!(castling_moves(&pos.board, Color::White, pos.castling).is_empty());
    }

    #[test]
    fn no_castling_when_rook_missing() {
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/4K2R w KQ - 0 1").unwrap();
        let moves = castling_moves(&pos.board, Color::White, pos.castling);
        assert_eq!(destinations(&moves), ["g1"]);
    }
}
