use super::board::GameState;
use super::moves::BoardMove;
use super::pieces::{Color, Piece};
use super::square::BoardSquare;

pub type Direction = (i8, i8);

pub const ROOK_DIRECTIONS: [Direction; 4] = [(-1, 0), (0, -1), (1, 0), (0, 1)];
pub const BISHOP_DIRECTIONS: [Direction; 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// All eight ray directions, orthogonals first.
pub const RAY_DIRECTIONS: [Direction; 8] = [
    (-1, 0),
    (0, -1),
    (1, 0),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

pub const KNIGHT_OFFSETS: [Direction; 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

pub const KING_OFFSETS: [Direction; 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// A piece that would expose its own king by leaving the given line.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Pin {
    pub square: BoardSquare,
    pub direction: Direction,
}

/// An attacker giving check, with the king-to-attacker direction (a ray
/// direction, or a knight offset).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Check {
    pub square: BoardSquare,
    pub direction: Direction,
}

/// Removes and returns the pin axis recorded for `square`, if any. Each pin
/// is consumed by at most one generator call.
fn take_pin(pins: &mut Vec<Pin>, square: BoardSquare) -> Option<Direction> {
    pins.iter()
        .position(|pin| pin.square == square)
        .map(|i| pins.remove(i).direction)
}

/// Whether a destination along `direction` is allowed under the pin: only
/// squares on the pin axis (either way along the line) are.
fn pin_allows(pin: Option<Direction>, direction: Direction) -> bool {
    match pin {
        None => true,
        Some(axis) => axis == direction || axis == (-direction.0, -direction.1),
    }
}

impl GameState {
    /// Scans outward from the side-to-move's king: the first own piece on a
    /// ray becomes a pin candidate (a second one cancels the ray), the first
    /// enemy piece either checks, converts the candidate into a pin, or
    /// blocks the ray. Knights are tested separately; they check but never
    /// pin. The own king is transparent to the scan.
    pub fn check_for_pins_and_checks(&self) -> (bool, Vec<Pin>, Vec<Check>) {
        // At most 8 pins and 2 simultaneous checks are possible.
        let mut pins = Vec::with_capacity(8);
        let mut checks = Vec::with_capacity(2);
        let mut in_check = false;

        let color = self.side;
        let king_square = self.king_location[color as usize];

        for &direction in RAY_DIRECTIONS.iter() {
            let mut possible_pin: Option<Pin> = None;

            for i in 1..8i8 {
                let Some(target) = king_square.offset(direction.0 * i, direction.1 * i) else {
                    break;
                };

                match self.piece_at(target) {
                    None => {}
                    Some((piece, c)) if c == color => {
                        if piece == Piece::King {
                            // The king itself never blocks a ray; this keeps
                            // king-move simulation honest when only the cache
                            // has moved.
                            continue;
                        }
                        if possible_pin.is_none() {
                            possible_pin = Some(Pin {
                                square: target,
                                direction,
                            });
                        } else {
                            // Two own pieces on the ray: no pin, no check
                            break;
                        }
                    }
                    Some((piece, _)) => {
                        if attacks_along(piece, !color, direction, i) {
                            match possible_pin {
                                None => {
                                    in_check = true;
                                    checks.push(Check {
                                        square: target,
                                        direction,
                                    });
                                }
                                Some(pin) => pins.push(pin),
                            }
                        }
                        break;
                    }
                }
            }
        }

        for &offset in KNIGHT_OFFSETS.iter() {
            let Some(target) = king_square.offset(offset.0, offset.1) else {
                continue;
            };

            if let Some((Piece::Knight, c)) = self.piece_at(target) {
                if c != color {
                    in_check = true;
                    checks.push(Check {
                        square: target,
                        direction: offset,
                    });
                }
            }
        }

        (in_check, pins, checks)
    }

    /// All legal moves for the side to move. Refreshes the checkmate and
    /// stalemate flags as a side effect: an empty result sets exactly one of
    /// them depending on whether the king is in check.
    pub fn get_valid_moves(&mut self) -> Vec<BoardMove> {
        let (in_check, mut pins, checks) = self.check_for_pins_and_checks();
        let king_square = self.king_location[self.side as usize];

        let moves = if !in_check {
            self.all_possible_moves(&mut pins)
        } else if checks.len() == 1 {
            // Single check: king moves, plus moves that block the check line
            // or capture the attacker.
            let check = checks[0];
            let valid_squares = self.check_line_squares(king_square, check);

            let mut moves = self.all_possible_moves(&mut pins);
            moves.retain(|board_move| {
                board_move.piece_moved.0 == Piece::King
                    || valid_squares.contains(&board_move.end)
            });
            moves
        } else {
            // Double check: only the king can move
            let mut moves = Vec::new();
            self.king_moves(king_square, &mut moves);
            moves
        };

        self.check_mate = false;
        self.stale_mate = false;
        if moves.is_empty() {
            if in_check {
                self.check_mate = true;
            } else {
                self.stale_mate = true;
            }
        }

        moves
    }

    /// Pseudo-legal moves for every piece of the side to move, pin-filtered
    /// inline. King moves are additionally self-check-filtered, so with no
    /// check on the board the result is fully legal.
    pub fn get_all_possible_moves(&mut self) -> Vec<BoardMove> {
        let (_, mut pins, _) = self.check_for_pins_and_checks();
        self.all_possible_moves(&mut pins)
    }

    /// Squares that resolve a single check: the attacker's square, plus, for
    /// sliding attackers, every square between it and the king. Knight
    /// checks cannot be blocked.
    fn check_line_squares(&self, king_square: BoardSquare, check: Check) -> Vec<BoardSquare> {
        let (attacker, _) = self
            .piece_at(check.square)
            .expect("checking piece disappeared");

        if attacker == Piece::Knight {
            return vec![check.square];
        }

        let mut squares = Vec::new();
        for i in 1..8i8 {
            let Some(square) = king_square.offset(check.direction.0 * i, check.direction.1 * i)
            else {
                break;
            };

            squares.push(square);
            if square == check.square {
                break;
            }
        }
        squares
    }

    fn all_possible_moves(&mut self, pins: &mut Vec<Pin>) -> Vec<BoardMove> {
        let mut moves = Vec::new();

        for row in 0..8u8 {
            for col in 0..8u8 {
                let square = BoardSquare::new(row, col);
                let Some((piece, color)) = self.piece_at(square) else {
                    continue;
                };
                if color != self.side {
                    continue;
                }

                match piece {
                    Piece::Pawn => self.pawn_moves(square, pins, &mut moves),
                    Piece::Knight => self.knight_moves(square, pins, &mut moves),
                    Piece::Bishop => {
                        self.sliding_moves(square, &BISHOP_DIRECTIONS, pins, &mut moves)
                    }
                    Piece::Rook => self.sliding_moves(square, &ROOK_DIRECTIONS, pins, &mut moves),
                    Piece::Queen => self.sliding_moves(square, &RAY_DIRECTIONS, pins, &mut moves),
                    Piece::King => self.king_moves(square, &mut moves),
                }
            }
        }

        moves
    }

    fn pawn_moves(&self, square: BoardSquare, pins: &mut Vec<Pin>, moves: &mut Vec<BoardMove>) {
        let color = self.side;
        let pin = take_pin(pins, square);
        let forward = color.forward();

        // Single advance, and the double advance behind it
        if let Some(one) = square.offset(forward, 0) {
            if self.piece_at(one).is_none() && pin_allows(pin, (forward, 0)) {
                moves.push(BoardMove::new(square, one, &self.board));

                if square.row == color.pawn_start_row() {
                    let two = square
                        .offset(2 * forward, 0)
                        .expect("double advance from the start row stays on the board");
                    if self.piece_at(two).is_none() {
                        moves.push(BoardMove::new(square, two, &self.board));
                    }
                }
            }
        }

        // Diagonal captures, including en passant
        for col_delta in [-1, 1] {
            let Some(target) = square.offset(forward, col_delta) else {
                continue;
            };
            if !pin_allows(pin, (forward, col_delta)) {
                continue;
            }

            match self.piece_at(target) {
                Some((_, c)) if c != color => {
                    moves.push(BoardMove::new(square, target, &self.board));
                }
                None if Some(target) == self.en_passant_target => {
                    moves.push(BoardMove::en_passant(square, target, &self.board));
                }
                _ => {}
            }
        }
    }

    fn sliding_moves(
        &self,
        square: BoardSquare,
        directions: &[Direction],
        pins: &mut Vec<Pin>,
        moves: &mut Vec<BoardMove>,
    ) {
        let color = self.side;
        let pin = take_pin(pins, square);

        for &direction in directions {
            if !pin_allows(pin, direction) {
                continue;
            }

            for i in 1..8i8 {
                let Some(target) = square.offset(direction.0 * i, direction.1 * i) else {
                    break;
                };

                match self.piece_at(target) {
                    None => moves.push(BoardMove::new(square, target, &self.board)),
                    Some((_, c)) if c != color => {
                        moves.push(BoardMove::new(square, target, &self.board));
                        break; // cannot move beyond another piece
                    }
                    _ => break, // own piece
                }
            }
        }
    }

    fn knight_moves(&self, square: BoardSquare, pins: &mut Vec<Pin>, moves: &mut Vec<BoardMove>) {
        // A knight can never land back on its pin axis, so a pinned knight
        // has no moves at all.
        if take_pin(pins, square).is_some() {
            return;
        }

        for &offset in KNIGHT_OFFSETS.iter() {
            let Some(target) = square.offset(offset.0, offset.1) else {
                continue;
            };

            match self.piece_at(target) {
                Some((_, c)) if c == self.side => {}
                _ => moves.push(BoardMove::new(square, target, &self.board)),
            }
        }
    }

    /// King moves are self-check-filtered at generation time: each candidate
    /// destination is simulated by relocating the king cache and re-running
    /// the detector. The king is the one piece the pin logic cannot cover.
    fn king_moves(&mut self, square: BoardSquare, moves: &mut Vec<BoardMove>) {
        let color = self.side;

        for &offset in KING_OFFSETS.iter() {
            let Some(target) = square.offset(offset.0, offset.1) else {
                continue;
            };

            if let Some((_, c)) = self.piece_at(target) {
                if c == color {
                    continue;
                }
            }

            self.king_location[color as usize] = target;
            let (in_check, _, _) = self.check_for_pins_and_checks();
            self.king_location[color as usize] = square;

            if !in_check {
                moves.push(BoardMove::new(square, target, &self.board));
            }
        }
    }
}

/// Piece/ray compatibility for the detector: can `piece` of `attacker_color`
/// attack the king along `direction` from `distance` squares away?
fn attacks_along(piece: Piece, attacker_color: Color, direction: Direction, distance: i8) -> bool {
    let orthogonal = direction.0 == 0 || direction.1 == 0;

    match piece {
        Piece::Rook => orthogonal,
        Piece::Bishop => !orthogonal,
        Piece::Queen => true,
        Piece::King => distance == 1,
        Piece::Pawn => {
            // Seen from the king, an attacking pawn lies one square along
            // the diagonals opposite its own forward direction.
            distance == 1 && !orthogonal && direction.0 == -attacker_color.forward()
        }
        Piece::Knight => false,
    }
}
