use super::board::GameState;
use super::pieces::{Color, Piece};

/// Score magnitude of a decided game; also the initial search window bound.
pub const CHECKMATE_SCORE: f32 = 1000.0;
pub const STALEMATE_SCORE: f32 = 0.0;

pub const PAWN_VALUE: f32 = 1.0;
pub const KNIGHT_VALUE: f32 = 3.0;
pub const BISHOP_VALUE: f32 = 3.0;
pub const ROOK_VALUE: f32 = 5.0;
// Deliberately 10 rather than the conventional 9
pub const QUEEN_VALUE: f32 = 10.0;
pub const KING_VALUE: f32 = 0.0;

/// Weight of the positional tables relative to material.
pub const POSITION_WEIGHT: f32 = 0.1;

pub fn get_piece_value(piece: Piece) -> f32 {
    match piece {
        Piece::Pawn => PAWN_VALUE,
        Piece::Knight => KNIGHT_VALUE,
        Piece::Bishop => BISHOP_VALUE,
        Piece::Rook => ROOK_VALUE,
        Piece::Queen => QUEEN_VALUE,
        Piece::King => KING_VALUE,
    }
}

// Desirability tables indexed [row][col], row 0 being the black back rank.
// Knights, bishops, queens and rooks share one table per kind for both
// colors; pawns get one table per color. Kings have none.

#[rustfmt::skip]
const KNIGHT_TABLE: [[f32; 8]; 8] = [
    [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0],
    [1.0, 2.0, 2.0, 2.0, 2.0, 2.0, 2.0, 1.0],
    [1.0, 2.0, 3.0, 3.0, 3.0, 3.0, 2.0, 1.0],
    [1.0, 2.0, 3.0, 4.0, 4.0, 3.0, 2.0, 1.0],
    [1.0, 2.0, 3.0, 4.0, 4.0, 3.0, 2.0, 1.0],
    [1.0, 2.0, 3.0, 3.0, 3.0, 3.0, 2.0, 1.0],
    [1.0, 2.0, 2.0, 2.0, 2.0, 2.0, 2.0, 1.0],
    [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0],
];

#[rustfmt::skip]
const BISHOP_TABLE: [[f32; 8]; 8] = [
    [4.0, 3.0, 2.0, 1.0, 1.0, 2.0, 3.0, 4.0],
    [3.0, 4.0, 3.0, 2.0, 2.0, 3.0, 4.0, 3.0],
    [2.0, 3.0, 4.0, 3.0, 3.0, 4.0, 3.0, 2.0],
    [1.0, 2.0, 3.0, 4.0, 4.0, 3.0, 2.0, 1.0],
    [1.0, 2.0, 3.0, 4.0, 4.0, 3.0, 2.0, 1.0],
    [2.0, 3.0, 4.0, 3.0, 3.0, 4.0, 3.0, 2.0],
    [3.0, 4.0, 3.0, 2.0, 2.0, 3.0, 4.0, 3.0],
    [4.0, 3.0, 2.0, 1.0, 1.0, 2.0, 3.0, 4.0],
];

#[rustfmt::skip]
const QUEEN_TABLE: [[f32; 8]; 8] = [
    [1.0, 1.0, 1.0, 3.0, 1.0, 1.0, 1.0, 1.0],
    [1.0, 2.0, 3.0, 3.0, 3.0, 1.0, 1.0, 1.0],
    [1.0, 4.0, 3.0, 3.0, 3.0, 4.0, 2.0, 1.0],
    [1.0, 2.0, 3.0, 3.0, 3.0, 2.0, 2.0, 1.0],
    [1.0, 2.0, 3.0, 3.0, 3.0, 2.0, 2.0, 1.0],
    [1.0, 4.0, 3.0, 3.0, 3.0, 4.0, 2.0, 1.0],
    [1.0, 1.0, 2.0, 3.0, 3.0, 1.0, 1.0, 1.0],
    [1.0, 1.0, 1.0, 3.0, 1.0, 1.0, 1.0, 1.0],
];

#[rustfmt::skip]
const ROOK_TABLE: [[f32; 8]; 8] = [
    [4.0, 3.0, 4.0, 4.0, 4.0, 4.0, 3.0, 4.0],
    [4.0, 4.0, 4.0, 4.0, 4.0, 4.0, 4.0, 4.0],
    [1.0, 1.0, 2.0, 3.0, 3.0, 2.0, 1.0, 1.0],
    [1.0, 2.0, 3.0, 4.0, 4.0, 3.0, 2.0, 1.0],
    [1.0, 2.0, 3.0, 4.0, 4.0, 3.0, 2.0, 1.0],
    [1.0, 1.0, 2.0, 2.0, 2.0, 2.0, 1.0, 1.0],
    [4.0, 4.0, 4.0, 4.0, 4.0, 4.0, 4.0, 4.0],
    [4.0, 3.0, 4.0, 4.0, 4.0, 4.0, 3.0, 4.0],
];

#[rustfmt::skip]
const WHITE_PAWN_TABLE: [[f32; 8]; 8] = [
    [8.0, 8.0, 8.0, 8.0, 8.0, 8.0, 8.0, 8.0],
    [8.0, 8.0, 8.0, 8.0, 8.0, 8.0, 8.0, 8.0],
    [5.0, 6.0, 6.0, 7.0, 7.0, 6.0, 6.0, 5.0],
    [2.0, 3.0, 3.0, 5.0, 5.0, 3.0, 3.0, 2.0],
    [1.0, 2.0, 3.0, 4.0, 4.0, 3.0, 2.0, 1.0],
    [1.0, 1.0, 2.0, 3.0, 3.0, 2.0, 1.0, 1.0],
    [1.0, 1.0, 1.0, 0.0, 0.0, 1.0, 1.0, 1.0],
    [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
];

#[rustfmt::skip]
const BLACK_PAWN_TABLE: [[f32; 8]; 8] = [
    [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    [1.0, 1.0, 1.0, 0.0, 0.0, 1.0, 1.0, 1.0],
    [1.0, 1.0, 2.0, 3.0, 3.0, 2.0, 1.0, 1.0],
    [1.0, 2.0, 3.0, 4.0, 4.0, 3.0, 2.0, 1.0],
    [2.0, 3.0, 3.0, 5.0, 5.0, 3.0, 3.0, 2.0],
    [5.0, 6.0, 6.0, 7.0, 7.0, 6.0, 6.0, 5.0],
    [8.0, 8.0, 8.0, 8.0, 8.0, 8.0, 8.0, 8.0],
    [8.0, 8.0, 8.0, 8.0, 8.0, 8.0, 8.0, 8.0],
];

fn get_position_value(piece: Piece, color: Color, row: usize, col: usize) -> f32 {
    match piece {
        Piece::Pawn => match color {
            Color::White => WHITE_PAWN_TABLE[row][col],
            Color::Black => BLACK_PAWN_TABLE[row][col],
        },
        Piece::Knight => KNIGHT_TABLE[row][col],
        Piece::Bishop => BISHOP_TABLE[row][col],
        Piece::Rook => ROOK_TABLE[row][col],
        Piece::Queen => QUEEN_TABLE[row][col],
        Piece::King => 0.0,
    }
}

/// Static evaluation, positive toward white. Checkmate overrides to the
/// extreme score against the side to move (the mated side); stalemate is
/// neutral. Relies on the terminal flags being fresh, i.e. on
/// `get_valid_moves` having run for this position.
pub fn score_board(state: &GameState) -> f32 {
    if state.check_mate {
        return match state.side {
            Color::White => -CHECKMATE_SCORE,
            Color::Black => CHECKMATE_SCORE,
        };
    }
    if state.stale_mate {
        return STALEMATE_SCORE;
    }

    let mut score = 0.0;

    for row in 0..8 {
        for col in 0..8 {
            if let Some((piece, color)) = state.board[row][col] {
                let value = get_piece_value(piece)
                    + get_position_value(piece, color, row, col) * POSITION_WEIGHT;
                score += value * color;
            }
        }
    }

    score
}

/// Material-only evaluation, positive toward white.
pub fn score_material(state: &GameState) -> f32 {
    let mut score = 0.0;

    for row in 0..8 {
        for col in 0..8 {
            if let Some((piece, color)) = state.board[row][col] {
                score += get_piece_value(piece) * color;
            }
        }
    }

    score
}
