//! Perft (performance test) for move generator validation.
//!
//! Perft counts the leaf nodes of the legal move tree to a given depth.
//! Published counts for well-known positions exercise castling, en passant,
//! promotion and pins together.

use crate::execute::play;
use crate::validate::all_legal_moves;
use crate::Position;

/// Counts the number of leaf nodes at the given depth.
pub fn perft(position: &Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = all_legal_moves(position);

    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .iter()
        .filter_map(|m| play(position, *m))
        .map(|(next, _)| perft(&next, depth - 1))
        .sum()
}

/// Perft with divide: the node count below each root move, sorted by the
/// move's UCI text. Useful for locating a generator bug.
pub fn perft_divide(position: &Position, depth: u32) -> Vec<(String, u64)> {
    let mut results: Vec<(String, u64)> = all_legal_moves(position)
        .iter()
        .filter_map(|m| {
            let (next, _) = play(position, *m)?;
            let nodes = if depth > 1 { perft(&next, depth - 1) } else { 1 };
            Some((m.to_uci(), nodes))
        })
        .collect();

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    // Starting position perft values (well-known and verified)
    #[test]
    fn perft_startpos_depth_1() {
        let position = Position::startpos();
        assert_eq!(perft(&position, 1), 20);
    }

    #[test]
    fn perft_startpos_depth_2() {
        let position = Position::startpos();
        assert_eq!(perft(&position, 2), 400);
    }

    #[test]
    fn perft_startpos_depth_3() {
        let position = Position::startpos();
        assert_eq!(perft(&position, 3), 8902);
    }

    #[test]
    #[ignore]
    fn perft_startpos_depth_4() {
        let position = Position::startpos();
        assert_eq!(perft(&position, 4), 197281);
    }

    // Depth 5 is slow on a mailbox board; run with --ignored in release mode.
    #[test]
    #[ignore]
    fn perft_startpos_depth_5() {
        let position = Position::startpos();
        assert_eq!(perft(&position, 5), 4865609);
    }

    // Kiwipete - a position with lots of special moves
    // r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -
    #[test]
    fn perft_kiwipete_depth_1() {
        let position = Position::from_fen(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        )
        .unwrap();
        assert_eq!(perft(&position, 1), 48);
    }

    #[test]
    fn perft_kiwipete_depth_2() {
        let position = Position::from_fen(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        )
        .unwrap();
        assert_eq!(perft(&position, 2), 2039);
    }

    #[test]
    #[ignore]
    fn perft_kiwipete_depth_3() {
        let position = Position::from_fen(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        )
        .unwrap();
        assert_eq!(perft(&position, 3), 97862);
    }

    // Position 3: Check evasion, en passant, promotion
    // 8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - -
    #[test]
    fn perft_position3_depth_1() {
        let position = Position::from_fen("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1").unwrap();
        assert_eq!(perft(&position, 1), 14);
    }

    #[test]
    fn perft_position3_depth_2() {
        let position = Position::from_fen("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1").unwrap();
        assert_eq!(perft(&position, 2), 191);
    }

    #[test]
    fn perft_position3_depth_3() {
        let position = Position::from_fen("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1").unwrap();
        assert_eq!(perft(&position, 3), 2812);
    }

    // Position 4: Lots of promotions and captures
    // r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq -
    #[test]
    fn perft_position4_depth_1() {
        let position =
            Position::from_fen("r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1")
                .unwrap();
        assert_eq!(perft(&position, 1), 6);
    }

    #[test]
    fn perft_position4_depth_2() {
        let position =
            Position::from_fen("r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1")
                .unwrap();
        assert_eq!(perft(&position, 2), 264);
    }

    #[test]
    fn perft_position4_depth_3() {
        let position =
            Position::from_fen("r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1")
                .unwrap();
        assert_eq!(perft(&position, 3), 9467);
    }

    // Position 5: Complex position
    // rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ -
    #[test]
    fn perft_position5_depth_1() {
        let position =
            Position::from_fen("rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 0 1")
                .unwrap();
        assert_eq!(perft(&position, 1), 44);
    }

    #[test]
    fn perft_position5_depth_2() {
        let position =
            Position::from_fen("rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 0 1")
                .unwrap();
        assert_eq!(perft(&position, 2), 1486);
    }

    #[test]
    #[ignore]
    fn perft_position5_depth_3() {
        let position =
            Position::from_fen("rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 0 1")
                .unwrap();
        assert_eq!(perft(&position, 3), 62379);
    }

    #[test]
    fn perft_divide_works() {
        let position = Position::startpos();
        let results = perft_divide(&position, 1);
        assert_eq!(results.len(), 20);
        let total: u64 = results.iter().map(|(_, n)| n).sum();
        assert_eq!(total, 20);
    }

    #[test]
    fn perft_divide_sums_to_perft() {
        let position = Position::from_fen(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        )
        .unwrap();
        let results = perft_divide(&position, 2);
        assert_eq!(results.len(), 48);
        assert!(results.iter().any(|(m, _)| m == "e1g1"));
        let total: u64 = results.iter().map(|(_, n)| n).sum();
        assert_eq!(total, 2039);
    }
}
