use crate::controller::{GameController, Strategy};
use crate::game::{BoardSquare, GameState};

/// Positions used by the make/undo sweep: the start position, a position
/// with an en-passant capture available, and a promotion race.
const SWEEP_POSITIONS: [(Option<&str>, usize); 3] = [
    (None, 3),
    (
        // After 1. e4 d5 2. e5 f5 - white may capture f5 en passant
        Some("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w - f6 0 3"),
        3,
    ),
    (
        // Both sides one square from promotion
        Some("1k6/4P3/8/8/8/8/5p2/1K6 w - - 0 1"),
        3,
    ),
];

#[test]
fn test_make_undo_consistency() {
    for (fen, depth) in SWEEP_POSITIONS {
        let mut state = GameState::new(fen);
        let mut path = Vec::new();
        let mut failures = Vec::new();

        check_make_undo_recursive(&mut state, depth, &mut path, &mut failures);

        if !failures.is_empty() {
            panic!(
                "make/undo consistency failures for position '{:?}':\n{}",
                fen,
                failures.join("\n")
            );
        }
    }
}

fn check_make_undo_recursive(
    state: &mut GameState,
    depth: usize,
    path: &mut Vec<String>,
    failures: &mut Vec<String>,
) {
    if depth == 0 {
        return;
    }

    let initial_fen = state.get_fen();
    let initial_kings = state.king_location;

    for board_move in state.get_valid_moves() {
        state.make_move(board_move);
        path.push(board_move.unparse());

        check_make_undo_recursive(state, depth - 1, path, failures);

        path.pop();
        state.undo_move();

        // Verify that we're back to the original position
        let restored_fen = state.get_fen();
        if restored_fen != initial_fen {
            failures.push(format!(
                "position not restored after undo_move!\n  Path: {} -> {}\n  Initial FEN: {}\n  Restored FEN: {}",
                path.join(" "),
                board_move.unparse(),
                initial_fen,
                restored_fen
            ));
        }

        if state.king_location != initial_kings {
            failures.push(format!(
                "king cache not restored after undo_move!\n  Path: {} -> {}\n  Initial: {:?}\n  Restored: {:?}",
                path.join(" "),
                board_move.unparse(),
                initial_kings,
                state.king_location
            ));
        }
    }
}

#[test]
fn test_perft_starting_position() {
    let mut controller = GameController::new(Strategy::Negamax);

    // Castling and en passant cannot occur within three plies of the start
    // position, so the standard counts apply to this engine too.
    for (depth, expected) in [(1, 20), (2, 400), (3, 8902)] {
        controller.new_game(None);

        let moves = controller.perft(depth);
        let total: usize = moves.iter().map(|(_, count)| count).sum();

        assert_eq!(
            total, expected,
            "perft({}) from the start position: got {} nodes, expected {}",
            depth, total, expected
        );
    }
}

#[test]
fn test_fen_round_trip() {
    // Castling-free positions: the castling field always serializes as "-"
    for fen in [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1",
        "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w - f6 0 1",
        "1k6/4P3/8/8/8/8/5p2/1K6 b - - 0 1",
        "8/2p5/3p4/1P5r/1R3p1k/8/4P1P1/K7 w - - 0 1",
    ] {
        let state = GameState::new(Some(fen));
        assert_eq!(state.get_fen(), fen, "FEN round trip mismatch");
    }
}

#[test]
fn test_detector_reports_pins_and_checks() {
    // Rook on e4 shields its king from the queen on e8
    let state = GameState::new(Some("k3q3/8/8/8/3pR3/8/8/4K3 w - - 0 1"));
    let (in_check, pins, checks) = state.check_for_pins_and_checks();

    assert!(!in_check);
    assert!(checks.is_empty());
    assert_eq!(pins.len(), 1);
    assert_eq!(pins[0].square, BoardSquare::parse("e4").unwrap());
    assert_eq!(pins[0].direction, (-1, 0));

    // Knight check and a bishop check at once: the only double-check shape
    let state = GameState::new(Some("k7/8/8/8/7b/5n2/8/4K3 w - - 0 1"));
    let (in_check, _, checks) = state.check_for_pins_and_checks();

    assert!(in_check);
    assert_eq!(checks.len(), 2);
}

#[test]
fn test_valid_moves_are_a_subset_of_pseudo_legal_moves() {
    // In check, the legal set shrinks to the moves resolving it
    let mut state = GameState::new(Some("k7/8/8/8/7b/8/8/3QK3 w - - 0 1"));

    let pseudo_legal = state.get_all_possible_moves();
    let valid = state.get_valid_moves();

    assert!(valid.len() < pseudo_legal.len());
    for board_move in &valid {
        assert!(
            pseudo_legal.contains(board_move),
            "legal move {} missing from the pseudo-legal set",
            board_move.unparse()
        );
    }
}

#[test]
fn test_square_codes() {
    let state = GameState::new(None);

    assert_eq!(state.square_code(BoardSquare::parse("a1").unwrap()), "wR");
    assert_eq!(state.square_code(BoardSquare::parse("e2").unwrap()), "wp");
    assert_eq!(state.square_code(BoardSquare::parse("d8").unwrap()), "bQ");
    assert_eq!(state.square_code(BoardSquare::parse("e5").unwrap()), "--");
}

#[test]
fn test_move_notation() {
    let mut state = GameState::new(None);
    let moves = state
        .get_valid_moves()
        .iter()
        .map(|m| m.unparse())
        .collect::<Vec<_>>();

    assert!(moves.contains(&"e2e4".to_string()));
    assert!(moves.contains(&"g1f3".to_string()));
    assert!(!moves.contains(&"e2e5".to_string()));
}
