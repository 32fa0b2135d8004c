//! Invariants checked over random legal games.

use chess_core::Color;
use chess_engine::rules::{is_check, is_checkmate, is_stalemate};
use chess_engine::validate::{all_legal_moves, is_legal_move};
use chess_engine::{is_king_attacked, Game, GameState};
use proptest::prelude::*;

/// Plays up to `choices.len()` moves, picking each one by index into the
/// legal move list. Stops early when the game ends.
fn random_game(choices: &[usize]) -> Game {
    let mut game = Game::new();
    for &choice in choices {
        let moves = game.legal_moves();
        if moves.is_empty() {
            break;
        }
        let mv = moves[choice % moves.len()];
        game.make_move(mv).unwrap();
    }
    game
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn history_grows_in_lockstep(choices in prop::collection::vec(any::<usize>(), 0..40)) {
        let game = random_game(&choices);
        let state = game.state();
        prop_assert_eq!(state.position_history.len(), state.move_history.len() + 1);
        prop_assert_eq!(state.position_history.last(), Some(&state.position.key()));
    }

    #[test]
    fn legal_moves_keep_king_safe(choices in prop::collection::vec(any::<usize>(), 0..30)) {
        let game = random_game(&choices);
        let position = game.position();
        let mover = position.side_to_move;
        for mv in all_legal_moves(position).iter() {
            prop_assert!(is_legal_move(position, *mv));
            let (next, _) = chess_engine::execute::play(position, *mv).unwrap();
            prop_assert!(!is_king_attacked(&next.board, mover), "{} exposes the king", mv);
        }
    }

    #[test]
    fn mate_and_stalemate_are_exclusive(choices in prop::collection::vec(any::<usize>(), 0..60)) {
        let game = random_game(&choices);
        let position = game.position();
        let no_moves = all_legal_moves(position).is_empty();
        let check = is_check(position, position.side_to_move);
        prop_assert_eq!(is_checkmate(position), check && no_moves);
        prop_assert_eq!(is_stalemate(position), !check && no_moves);
        prop_assert!(!(is_checkmate(position) && is_stalemate(position)));
    }

    #[test]
    fn json_roundtrip_keeps_position(choices in prop::collection::vec(any::<usize>(), 0..30)) {
        let game = random_game(&choices);
        let mut loaded = Game::new();
        loaded.from_json(&game.to_json()).unwrap();
        prop_assert_eq!(&loaded.state().position, &game.state().position);
        prop_assert_eq!(&loaded.state().position_history, &game.state().position_history);
        prop_assert!(loaded.state().move_history.is_empty());
    }

    #[test]
    fn undo_everything_returns_to_start(choices in prop::collection::vec(any::<usize>(), 0..30)) {
        let mut game = random_game(&choices);
        while game.can_undo() {
            game.undo_move().unwrap();
        }
        prop_assert_eq!(game.state(), &GameState::initial());
        prop_assert_eq!(game.current_player(), Color::White);
    }
}
