use std::fmt::{Display, Formatter, Result};
use std::time::Instant;

use crate::game::BoardMove;

/// Outcome of one search invocation. The best move is threaded through the
/// recursion's return values and only populated at the root depth; `None`
/// means no move improved the initial bound and the caller should fall back
/// to a random legal move.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub best_move: Option<BoardMove>,
    pub evaluation: f32,
}

impl Display for SearchResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self.best_move {
            Some(board_move) => write!(f, "{} ({})", board_move.unparse(), self.evaluation),
            None => write!(f, "none ({})", self.evaluation),
        }
    }
}

impl SearchResult {
    pub fn leaf(evaluation: f32) -> Self {
        Self {
            best_move: None,
            evaluation,
        }
    }
}

/// Statistics tracked during search
pub struct SearchStats {
    pub nodes: u64,
    pub start_time: Instant,
}

impl SearchStats {
    pub fn new() -> Self {
        Self {
            nodes: 0,
            start_time: Instant::now(),
        }
    }

    pub fn increment_nodes(&mut self) {
        self.nodes += 1;
    }

    pub fn get_elapsed_ms(&self) -> u64 {
        self.start_time.elapsed().as_millis() as u64
    }

    pub fn get_nps(&self) -> u64 {
        let elapsed_secs = self.start_time.elapsed().as_secs_f64();
        if elapsed_secs > 0.0 {
            (self.nodes as f64 / elapsed_secs) as u64
        } else {
            0
        }
    }
}
