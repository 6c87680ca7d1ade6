use strum::EnumCount;

use super::moves::BoardMove;
use super::pieces::{Color, Piece};
use super::square::BoardSquare;

pub type PieceBoard = [[Option<(Piece, Color)>; 8]; 8];

/// Two-character code of an empty square, matching the occupied-square codes
/// ("wp", "bR", ...) handed to the presentation layer.
pub const EMPTY_CODE: &str = "--";

const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1";

/// The full position: board grid, side to move, move log, king-square
/// caches, en-passant target and the terminal flags refreshed by
/// `get_valid_moves`. Mutated only through `make_move`/`undo_move`.
#[derive(Debug, Clone)]
pub struct GameState {
    pub board: PieceBoard,
    pub side: Color,
    pub move_log: Vec<BoardMove>,
    pub king_location: [BoardSquare; Color::COUNT],

    /// Square a two-square pawn advance just passed over, capturable for
    /// exactly one ply.
    pub en_passant_target: Option<BoardSquare>,
    // Pre-move targets, pushed/popped in lockstep with the move log so undo
    // restores the target exactly.
    en_passant_log: Vec<Option<BoardSquare>>,

    pub check_mate: bool,
    pub stale_mate: bool,
}

impl GameState {
    /// Sets up the position from a FEN string, or the standard starting
    /// position. The castling field is read and discarded (castling is not
    /// supported); halfmove/fullmove counters are accepted and ignored.
    pub fn new(fen: Option<&str>) -> GameState {
        let fen = fen.unwrap_or(START_FEN);
        let mut parts = fen.split_whitespace();

        let mut board = PieceBoard::default();
        let mut kings = [None; Color::COUNT];

        for (row, rank) in parts.next().expect("empty FEN").split('/').enumerate() {
            let mut col = 0usize;

            for c in rank.chars() {
                // Numbers encode empty spaces
                if let Some(skip) = c.to_digit(10) {
                    col += skip as usize;
                    continue;
                }

                let color = if c.is_ascii_uppercase() {
                    Color::White
                } else {
                    Color::Black
                };

                match Piece::from_char(c) {
                    Some(piece) => {
                        board[row][col] = Some((piece, color));
                        if piece == Piece::King {
                            kings[color as usize] = Some(BoardSquare::new(row as u8, col as u8));
                        }
                    }
                    None => panic!("incorrect FEN piece character: {}", c),
                }

                col += 1;
            }
        }

        let side = match parts.next() {
            Some("w") => Color::White,
            Some("b") => Color::Black,
            _ => panic!("incorrect FEN format"),
        };

        // Castling rights; skipped, never used
        let _ = parts.next();

        let en_passant_target = match parts.next() {
            None | Some("-") => None,
            Some(square_string) => match BoardSquare::parse(square_string) {
                Some(square) => Some(square),
                None => panic!("incorrect FEN en passant target square"),
            },
        };

        let king_location = [
            kings[Color::Black as usize].expect("position is missing the black king"),
            kings[Color::White as usize].expect("position is missing the white king"),
        ];

        GameState {
            board,
            side,
            move_log: Vec::new(),
            king_location,
            en_passant_target,
            en_passant_log: Vec::new(),
            check_mate: false,
            stale_mate: false,
        }
    }

    pub fn get_fen(&self) -> String {
        let mut placement = String::new();

        for row in 0..8 {
            let mut empty_run = 0;

            for col in 0..8 {
                match self.board[row][col] {
                    Some((piece, color)) => {
                        if empty_run > 0 {
                            placement.push_str(&empty_run.to_string());
                            empty_run = 0;
                        }
                        let c = match color {
                            Color::White => piece.to_char().to_ascii_uppercase(),
                            Color::Black => piece.to_char().to_ascii_lowercase(),
                        };
                        placement.push(c);
                    }
                    None => empty_run += 1,
                }
            }

            if empty_run > 0 {
                placement.push_str(&empty_run.to_string());
            }
            if row < 7 {
                placement.push('/');
            }
        }

        let en_passant = match self.en_passant_target {
            Some(square) => square.unparse(),
            None => "-".to_string(),
        };

        format!(
            "{} {} - {} 0 1",
            placement,
            self.side.to_char(),
            en_passant
        )
    }

    pub fn piece_at(&self, square: BoardSquare) -> Option<(Piece, Color)> {
        self.board[square.row as usize][square.col as usize]
    }

    /// Two-character color+kind code of a square, "--" when empty.
    pub fn square_code(&self, square: BoardSquare) -> String {
        match self.piece_at(square) {
            Some((piece, color)) => format!("{}{}", color.to_char(), piece.to_char()),
            None => EMPTY_CODE.to_string(),
        }
    }

    /// Applies a move: grid update, history append, side flip, king-cache
    /// maintenance. Promotions place a queen; en-passant removes the
    /// bypassed pawn. The en-passant target is reset on every call and
    /// re-armed only after a two-square pawn advance.
    pub fn make_move(&mut self, board_move: BoardMove) {
        let (piece, color) = board_move.piece_moved;

        self.board[board_move.start.row as usize][board_move.start.col as usize] = None;
        self.board[board_move.end.row as usize][board_move.end.col as usize] =
            if board_move.is_promotion {
                Some((Piece::Queen, color))
            } else {
                Some((piece, color))
            };

        if board_move.is_en_passant {
            // The captured pawn sits beside the capturing pawn, not on the
            // destination square.
            self.board[board_move.start.row as usize][board_move.end.col as usize] = None;
        }

        self.en_passant_log.push(self.en_passant_target);
        self.en_passant_target = if piece == Piece::Pawn
            && (board_move.start.row as i8 - board_move.end.row as i8).abs() == 2
        {
            Some(BoardSquare::new(
                (board_move.start.row + board_move.end.row) / 2,
                board_move.start.col,
            ))
        } else {
            None
        };

        if piece == Piece::King {
            self.king_location[color as usize] = board_move.end;
        }

        self.move_log.push(board_move);
        self.side = !self.side;
    }

    /// Undoes the last move. Calling this with an empty move log is a
    /// programmer error and fails fast.
    pub fn undo_move(&mut self) {
        let board_move = self
            .move_log
            .pop()
            .expect("undo_move called with an empty move log");
        let (piece, color) = board_move.piece_moved;

        self.board[board_move.start.row as usize][board_move.start.col as usize] =
            Some((piece, color));
        self.board[board_move.end.row as usize][board_move.end.col as usize] =
            board_move.piece_captured;

        if board_move.is_en_passant {
            // The destination was empty; the captured pawn goes back beside
            // the capturing pawn.
            self.board[board_move.end.row as usize][board_move.end.col as usize] = None;
            self.board[board_move.start.row as usize][board_move.end.col as usize] =
                board_move.piece_captured;
        }

        self.en_passant_target = self
            .en_passant_log
            .pop()
            .expect("en passant log out of sync with move log");

        if piece == Piece::King {
            self.king_location[color as usize] = board_move.start;
        }

        self.side = !self.side;
    }
}
