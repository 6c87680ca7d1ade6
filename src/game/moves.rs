use std::fmt;

use super::board::PieceBoard;
use super::pieces::{Color, Piece};
use super::square::BoardSquare;

/// A single ply. Captured piece and the en-passant/promotion flags are
/// recorded at construction time so the move can be undone exactly.
///
/// Equality compares the start and end squares only; the promotion choice is
/// not part of a move's identity (promotion always resolves to a queen).
#[derive(Copy, Clone, Debug)]
pub struct BoardMove {
    pub start: BoardSquare,
    pub end: BoardSquare,
    pub piece_moved: (Piece, Color),
    pub piece_captured: Option<(Piece, Color)>,
    pub is_en_passant: bool,
    pub is_promotion: bool,
}

impl PartialEq for BoardMove {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start && self.end == other.end
    }
}

impl BoardMove {
    /// Move of the piece at `start` to `end`, reading the moved and captured
    /// pieces off the board.
    pub fn new(start: BoardSquare, end: BoardSquare, board: &PieceBoard) -> BoardMove {
        let piece_moved = board[start.row as usize][start.col as usize]
            .expect("no piece at move start square");
        let is_promotion =
            piece_moved.0 == Piece::Pawn && end.row == piece_moved.1.promotion_row();

        BoardMove {
            start,
            end,
            piece_moved,
            piece_captured: board[end.row as usize][end.col as usize],
            is_en_passant: false,
            is_promotion,
        }
    }

    /// En-passant capture onto `end`; the captured pawn sits beside the
    /// capturing pawn, on the start row in the end column.
    pub fn en_passant(start: BoardSquare, end: BoardSquare, board: &PieceBoard) -> BoardMove {
        let piece_moved = board[start.row as usize][start.col as usize]
            .expect("no piece at move start square");

        BoardMove {
            start,
            end,
            piece_moved,
            piece_captured: board[start.row as usize][end.col as usize],
            is_en_passant: true,
            is_promotion: false,
        }
    }

    /// Long algebraic notation: the two file+rank tokens concatenated.
    pub fn unparse(&self) -> String {
        format!("{}{}", self.start.unparse(), self.end.unparse())
    }

    /// Splits long algebraic notation ("e2e4") into its two squares.
    pub fn parse_squares(notation: &str) -> Option<(BoardSquare, BoardSquare)> {
        let chars: Vec<char> = notation.chars().collect();

        if chars.len() != 4 {
            return None;
        }

        let start = BoardSquare::parse(&chars[0..2].iter().collect::<String>())?;
        let end = BoardSquare::parse(&chars[2..4].iter().collect::<String>())?;
        Some((start, end))
    }
}

impl fmt::Display for BoardMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.unparse())
    }
}
