use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use crate::engine::searcher::{Search, find_best_material_move, find_random_move};
use crate::game::{BoardMove, BoardSquare, Color, GameState};

#[derive(Debug)]
pub enum MoveResultType {
    Success,         // successful move
    InvalidNotation, // wrong algebraic notation
    InvalidMove,     // legal-looking notation, but not a legal move
    NoHistory,       // undo with nothing to undo
}

/// How the engine picks its move.
#[derive(Copy, Clone, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Strategy {
    /// Fixed-depth negamax with alpha-beta pruning
    Negamax,
    /// One-ply material greedy
    Greedy,
    /// Uniformly random legal move
    Random,
}

/// Owns the live position and mediates everything the interactive side is
/// allowed to do: validated moves, undo, legal-move queries, and the
/// background search over an independent snapshot.
pub struct GameController {
    pub state: GameState,
    pub strategy: Strategy,
    search_thread: Option<JoinHandle<()>>,
    search_result: Option<Receiver<Option<BoardMove>>>,
}

impl GameController {
    pub fn new(strategy: Strategy) -> Self {
        Self {
            state: GameState::new(None),
            strategy,
            search_thread: None,
            search_result: None,
        }
    }

    pub fn new_game(&mut self, fen: Option<&str>) {
        self.cancel_search();
        self.state = GameState::new(fen);
    }

    /// Validates long algebraic notation against the legal-move list and
    /// applies the move. The instance actually applied is the generator's,
    /// so en-passant and promotion metadata are always correct even though
    /// move equality only compares the two squares.
    pub fn try_move_piece(&mut self, long_algebraic_notation: &str) -> MoveResultType {
        match BoardMove::parse_squares(long_algebraic_notation) {
            Some((start, end)) => {
                if self.state.piece_at(start).is_none() {
                    return MoveResultType::InvalidMove;
                }

                let probe = BoardMove::new(start, end, &self.state.board);
                self.play_move(probe)
            }
            None => MoveResultType::InvalidNotation,
        }
    }

    /// Applies `board_move` if it is in the current legal-move list.
    /// Mutating the live position invalidates any outstanding search.
    pub fn play_move(&mut self, board_move: BoardMove) -> MoveResultType {
        let valid_moves = self.state.get_valid_moves();

        match valid_moves.iter().find(|m| **m == board_move) {
            Some(&canonical) => {
                self.cancel_search();
                self.state.make_move(canonical);
                MoveResultType::Success
            }
            None => MoveResultType::InvalidMove,
        }
    }

    pub fn try_unmove_piece(&mut self) -> MoveResultType {
        match self.state.move_log.len() {
            0 => MoveResultType::NoHistory,
            _ => {
                self.cancel_search();
                self.state.undo_move();
                MoveResultType::Success
            }
        }
    }

    /// Refreshes the legal-move list and reports a finished game, if any.
    pub fn check_game_end(&mut self) -> Option<String> {
        self.state.get_valid_moves();

        if self.state.check_mate {
            let winner = match self.state.side {
                Color::White => "black",
                Color::Black => "white",
            };
            Some(format!("checkmate, {} wins", winner))
        } else if self.state.stale_mate {
            Some("stalemate".to_string())
        } else {
            None
        }
    }

    /// Hands an independent snapshot of the position and its legal moves to
    /// a worker thread. The worker owns the snapshot for its whole lifetime
    /// and reports exactly one result over a one-shot channel.
    pub fn start_search(&mut self) {
        self.cancel_search();

        let mut snapshot = self.state.clone();
        let valid_moves = snapshot.get_valid_moves();
        let strategy = self.strategy;

        let (sender, receiver) = mpsc::channel();

        let handle = thread::spawn(move || {
            let chosen = select_move(&mut snapshot, &valid_moves, strategy);
            // The receiver is gone if the search was cancelled; the result
            // is simply discarded then.
            let _ = sender.send(chosen);
        });

        self.search_thread = Some(handle);
        self.search_result = Some(receiver);
    }

    /// Non-blocking check on the outstanding search. `None` while it is
    /// still running; `Some(result)` exactly once when it finished.
    pub fn poll_search(&mut self) -> Option<Option<BoardMove>> {
        let receiver = self.search_result.as_ref()?;

        match receiver.try_recv() {
            Ok(result) => {
                self.search_result = None;
                if let Some(handle) = self.search_thread.take() {
                    let _ = handle.join();
                }
                Some(result)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.search_result = None;
                self.search_thread = None;
                Some(None)
            }
        }
    }

    /// Blocks until the outstanding search reports its move.
    pub fn await_search(&mut self) -> Option<BoardMove> {
        let receiver = self.search_result.take()?;
        let result = receiver.recv().ok().flatten();

        if let Some(handle) = self.search_thread.take() {
            let _ = handle.join();
        }

        result
    }

    /// Abrupt cancellation: drop the channel and detach the worker. Its
    /// snapshot dies with it and its eventual result goes nowhere.
    pub fn cancel_search(&mut self) {
        if self.search_result.take().is_some() {
            log::info!("outstanding search cancelled");
        }
        self.search_thread = None;
    }

    pub fn search_in_progress(&self) -> bool {
        self.search_result.is_some()
    }

    /// Legal-move counts per root move, depth-limited DFS.
    pub fn perft(&mut self, depth: usize) -> Vec<(BoardMove, usize)> {
        let mut move_breakdown = vec![];

        let start = Instant::now();
        let valid_moves = self.state.get_valid_moves();

        for board_move in valid_moves {
            let count = self.dfs_count_moves(board_move, depth);
            move_breakdown.push((board_move, count));
        }

        log::debug!(
            "perft({}) finished in {:?}",
            depth,
            start.elapsed()
        );

        move_breakdown
    }

    fn dfs_count_moves(&mut self, initial_move: BoardMove, depth: usize) -> usize {
        if depth <= 1 {
            return 1;
        }

        self.state.make_move(initial_move);

        let current_moves = self.state.get_valid_moves();

        // Bulk counting
        let total_count = if depth == 2 {
            current_moves.len()
        } else {
            current_moves
                .into_iter()
                .map(|board_move| self.dfs_count_moves(board_move, depth - 1))
                .sum()
        };

        self.state.undo_move();

        total_count
    }

    pub fn print_with_moves(&self, possible_moves: &[BoardSquare]) {
        const RESET: &str = "\x1b[0m";
        const LIGHT_SQUARE_BG: &str = "\x1b[48;5;172m";
        const DARK_SQUARE_BG: &str = "\x1b[48;5;130m";
        const WHITE_PIECE: &str = "\x1b[1;97m";
        const BLACK_PIECE: &str = "\x1b[1;30m";
        const MOVE_HIGHLIGHT: &str = "\x1b[1;34m";
        const HEADING_BG: &str = "\x1b[48;5;240m"; // Neutral gray background

        let heading_text = match self.state.side {
            Color::White => "White to move",
            Color::Black => "Black to move",
        };
        let heading_color = match self.state.side {
            Color::White => WHITE_PIECE,
            Color::Black => BLACK_PIECE,
        };

        // Board width is 8 squares * 3 chars each = 24 chars
        let board_width = 24;
        let padding = (board_width - heading_text.len()) / 2;
        let right_padding = board_width - heading_text.len() - padding;

        println!(
            "{}{}{}{}{}{}",
            HEADING_BG,
            " ".repeat(padding),
            heading_color,
            heading_text,
            " ".repeat(right_padding),
            RESET
        );

        for row in 0..8u8 {
            let mut line = String::new();
            for col in 0..8u8 {
                let square = BoardSquare::new(row, col);
                let is_light_square = (row + col) % 2 == 0;
                let bg_color = if is_light_square {
                    LIGHT_SQUARE_BG
                } else {
                    DARK_SQUARE_BG
                };
                line.push_str(bg_color);

                match self.state.piece_at(square) {
                    Some((piece, color)) => {
                        let piece_color = match color {
                            Color::White => WHITE_PIECE,
                            Color::Black => BLACK_PIECE,
                        };
                        line.push_str(&format!("{} {} {}", piece_color, piece.to_emoji(), RESET));
                    }
                    None => {
                        if possible_moves.contains(&square) {
                            line.push_str(&format!("{} ● {}", MOVE_HIGHLIGHT, RESET));
                        } else {
                            line.push_str("   ");
                        }
                    }
                }

                line.push_str(RESET);
            }
            println!("{}", line);
        }
    }

    pub fn print(&self) {
        self.print_with_moves(&[]);
    }

    pub fn print_fen(&self) {
        println!("{}", self.state.get_fen());
    }
}

/// Runs the configured strategy against the snapshot. The negamax and greedy
/// searches fall back to a uniformly random legal move when they come back
/// empty-handed.
fn select_move(
    state: &mut GameState,
    valid_moves: &[BoardMove],
    strategy: Strategy,
) -> Option<BoardMove> {
    match strategy {
        Strategy::Negamax => {
            let mut search = Search::new(state);
            let result = search.find_best_move(valid_moves);

            log::info!(
                "searched {} nodes in {} ms ({} nps): {}",
                search.stats.nodes,
                search.stats.get_elapsed_ms(),
                search.stats.get_nps(),
                result
            );

            result.best_move.or_else(|| find_random_move(valid_moves))
        }
        Strategy::Greedy => {
            find_best_material_move(state, valid_moves).or_else(|| find_random_move(valid_moves))
        }
        Strategy::Random => find_random_move(valid_moves),
    }
}
