use std::thread;
use std::time::Duration;

use woodpusher::controller::{GameController, MoveResultType, Strategy};
use woodpusher::engine::searcher::{Search, find_best_material_move, find_random_move};
use woodpusher::engine::SEARCH_DEPTH;
use woodpusher::game::evaluate::{CHECKMATE_SCORE, score_board};
use woodpusher::game::{BoardMove, BoardSquare, GameState};

/// Reference negamax without pruning; the alpha-beta search must return the
/// same root score for the same move ordering.
fn negamax_unpruned(state: &mut GameState, valid_moves: &[BoardMove], depth: usize) -> f32 {
    if depth == 0 {
        return score_board(state) * state.side;
    }

    let mut max_score = -CHECKMATE_SCORE;

    for &board_move in valid_moves {
        state.make_move(board_move);
        let next_moves = state.get_valid_moves();
        let score = -negamax_unpruned(state, &next_moves, depth - 1);
        state.undo_move();

        if score > max_score {
            max_score = score;
        }
    }

    max_score
}

#[test]
fn alpha_beta_matches_unpruned_negamax() {
    for fen in [
        None,
        Some("r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/R1BQK1NR w - - 0 4"),
        Some("k3q3/8/8/8/3pR3/8/8/4K3 w - - 0 1"),
    ] {
        let mut state = GameState::new(fen);
        let valid_moves = state.get_valid_moves();

        let expected = negamax_unpruned(&mut state.clone(), &valid_moves, SEARCH_DEPTH);

        let mut search = Search::new(&mut state);
        let result = search.negamax(
            &valid_moves,
            SEARCH_DEPTH,
            -CHECKMATE_SCORE,
            CHECKMATE_SCORE,
        );

        assert_eq!(
            result.evaluation, expected,
            "pruned and unpruned scores diverge for {:?}",
            fen
        );
    }
}

#[test]
fn best_move_is_always_legal() {
    for fen in [
        None,
        Some("r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/R1BQK1NR b - - 0 4"),
        Some("8/2p5/3p4/1P5r/1R3p1k/8/4P1P1/K7 w - - 0 1"),
    ] {
        let mut state = GameState::new(fen);
        let valid_moves = state.get_valid_moves();

        let mut search = Search::new(&mut state);
        let result = search.find_best_move(&valid_moves);

        let best_move = result.best_move.expect("a legal position yields a move");
        assert!(
            valid_moves.contains(&best_move),
            "selected move {} is not in the legal-move list",
            best_move.unparse()
        );
    }
}

#[test]
fn search_leaves_the_position_unchanged() {
    let mut state = GameState::new(None);
    let valid_moves = state.get_valid_moves();
    let before = state.get_fen();

    let mut search = Search::new(&mut state);
    search.find_best_move(&valid_moves);

    assert_eq!(state.get_fen(), before);
}

#[test]
fn finds_mate_in_one() {
    // After 1. f3 e5 2. g4, the queen mates on h4
    let mut state = GameState::new(Some(
        "rnbqkbnr/pppp1ppp/8/4p3/6P1/5P2/PPPPP2P/RNBQKBNR b - - 0 3",
    ));
    let valid_moves = state.get_valid_moves();

    let mut search = Search::new(&mut state);
    let result = search.find_best_move(&valid_moves);

    assert_eq!(result.evaluation, CHECKMATE_SCORE);
    let best_move = result.best_move.expect("the mate should be found");
    assert_eq!(best_move.start, BoardSquare::parse("d8").unwrap());
    assert_eq!(best_move.end, BoardSquare::parse("h4").unwrap());
}

#[test]
fn degenerate_input_falls_through_to_random() {
    let mut state = GameState::new(None);

    // No move can improve the initial bound on an empty list
    let mut search = Search::new(&mut state);
    let result = search.find_best_move(&[]);
    assert!(result.best_move.is_none());

    // The fallback is uniform over the supplied list
    assert!(find_random_move(&[]).is_none());

    let mut state = GameState::new(None);
    let valid_moves = state.get_valid_moves();
    let chosen = find_random_move(&valid_moves).unwrap();
    assert!(valid_moves.contains(&chosen));
}

#[test]
fn background_search_delivers_exactly_one_result() {
    let mut controller = GameController::new(Strategy::Negamax);
    controller.start_search();

    let result = loop {
        match controller.poll_search() {
            Some(result) => break result,
            None => thread::sleep(Duration::from_millis(10)),
        }
    };

    let best_move = result.expect("the start position has moves");
    assert!(matches!(
        controller.play_move(best_move),
        MoveResultType::Success
    ));

    // The channel is one-shot; nothing more arrives
    assert!(controller.poll_search().is_none());
    assert!(!controller.search_in_progress());
}

#[test]
fn cancelled_search_discards_its_result() {
    let mut controller = GameController::new(Strategy::Negamax);
    controller.start_search();
    assert!(controller.search_in_progress());

    controller.cancel_search();

    assert!(!controller.search_in_progress());
    assert!(controller.poll_search().is_none());
    assert!(controller.await_search().is_none());
}

#[test]
fn user_move_invalidates_outstanding_search() {
    let mut controller = GameController::new(Strategy::Negamax);
    controller.start_search();

    assert!(matches!(
        controller.try_move_piece("e2e4"),
        MoveResultType::Success
    ));
    assert!(!controller.search_in_progress());
}

#[test]
fn greedy_search_takes_the_hanging_queen() {
    // Rook d3 wins the undefended queen on d5; everything else loses material
    let mut state = GameState::new(Some("k7/8/8/3q4/8/3R4/8/K7 w - - 0 1"));
    let valid_moves = state.get_valid_moves();

    let best_move = find_best_material_move(&mut state, &valid_moves)
        .expect("greedy search should pick a move");

    assert_eq!(best_move.start, BoardSquare::parse("d3").unwrap());
    assert_eq!(best_move.end, BoardSquare::parse("d5").unwrap());
}
