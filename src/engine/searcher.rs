use rand::seq::{IndexedRandom, SliceRandom};

use crate::game::evaluate::{CHECKMATE_SCORE, STALEMATE_SCORE, score_board, score_material};
use crate::game::{BoardMove, GameState};

use super::params::SEARCH_DEPTH;
use super::results::{SearchResult, SearchStats};

/// Fixed-depth negamax with alpha-beta pruning over a position snapshot.
/// The search descends and backtracks strictly through make/undo pairs and
/// leaves the position unchanged after returning.
pub struct Search<'a> {
    pub state: &'a mut GameState,
    pub stats: SearchStats,
    max_depth: usize,
}

impl<'a> Search<'a> {
    pub fn new(state: &'a mut GameState) -> Self {
        Self {
            state,
            stats: SearchStats::new(),
            max_depth: SEARCH_DEPTH,
        }
    }

    /// Picks a move for the side to move: shuffles the legal moves once and
    /// runs the full-window negamax over them. `best_move` is `None` when
    /// nothing improved the initial bound (degenerate or empty input).
    pub fn find_best_move(&mut self, valid_moves: &[BoardMove]) -> SearchResult {
        let mut moves = valid_moves.to_vec();
        moves.shuffle(&mut rand::rng());

        self.negamax(&moves, self.max_depth, -CHECKMATE_SCORE, CHECKMATE_SCORE)
    }

    /// Fail-hard negamax. Each level receives the legal moves of the current
    /// position; the recursion negates the child's score and swaps/negates
    /// the window. Siblings stop being explored once alpha meets beta.
    pub fn negamax(
        &mut self,
        valid_moves: &[BoardMove],
        depth: usize,
        mut alpha: f32,
        beta: f32,
    ) -> SearchResult {
        self.stats.increment_nodes();

        if depth == 0 {
            return SearchResult::leaf(score_board(self.state) * self.state.side);
        }

        let mut best = SearchResult::leaf(-CHECKMATE_SCORE);

        for &board_move in valid_moves {
            self.state.make_move(board_move);
            let next_moves = self.state.get_valid_moves();
            let score = -self.negamax(&next_moves, depth - 1, -beta, -alpha).evaluation;
            self.state.undo_move();

            if score > best.evaluation {
                best.evaluation = score;
                if depth == self.max_depth {
                    best.best_move = Some(board_move);
                }
            }

            alpha = alpha.max(best.evaluation);
            if alpha >= beta {
                break; // Beta cutoff
            }
        }

        best
    }
}

/// Picks a random legal move, uniformly. The fallback when the real search
/// comes back empty-handed.
pub fn find_random_move(valid_moves: &[BoardMove]) -> Option<BoardMove> {
    valid_moves.choose(&mut rand::rng()).copied()
}

/// One-ply-lookahead material greedy: for each candidate, plays it and
/// scores the opponent's best material reply (with checkmate and stalemate
/// as extreme/neutral scores), then picks the candidate that minimizes that
/// reply. A lighter-weight alternative to the full negamax.
pub fn find_best_material_move(
    state: &mut GameState,
    valid_moves: &[BoardMove],
) -> Option<BoardMove> {
    let mut moves = valid_moves.to_vec();
    moves.shuffle(&mut rand::rng());

    let mut best_move = None;
    let mut opponent_min_max_score = CHECKMATE_SCORE;

    for &player_move in moves.iter() {
        state.make_move(player_move);
        let opponent = state.side;
        let opponent_moves = state.get_valid_moves();

        let opponent_max_score = if state.check_mate {
            // The opponent is already mated; no reply exists
            -CHECKMATE_SCORE
        } else if state.stale_mate {
            STALEMATE_SCORE
        } else {
            let mut max_score = -CHECKMATE_SCORE;

            for &opponent_move in opponent_moves.iter() {
                state.make_move(opponent_move);
                state.get_valid_moves(); // refresh the terminal flags

                let score = if state.check_mate {
                    CHECKMATE_SCORE
                } else if state.stale_mate {
                    STALEMATE_SCORE
                } else {
                    score_material(state) * opponent
                };

                if score > max_score {
                    max_score = score;
                }

                state.undo_move();
            }

            max_score
        };

        if opponent_max_score < opponent_min_max_score {
            opponent_min_max_score = opponent_max_score;
            best_move = Some(player_move);
        }

        state.undo_move();
    }

    best_move
}
