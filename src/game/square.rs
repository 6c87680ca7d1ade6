use std::fmt;

/// A board coordinate. Row 0 is the black back rank (rank 8), row 7 the
/// white back rank (rank 1); column 0 is file a.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BoardSquare {
    pub row: u8,
    pub col: u8,
}

impl BoardSquare {
    pub fn new(row: u8, col: u8) -> BoardSquare {
        BoardSquare { row, col }
    }

    pub fn parse(string: &str) -> Option<BoardSquare> {
        let mut chars = string.chars();

        match (chars.next(), chars.next()) {
            (Some(file), Some(rank))
                if ('a'..='h').contains(&file) && ('1'..='8').contains(&rank) =>
            {
                Some(BoardSquare {
                    row: 7 - (rank as u8 - b'1'),
                    col: file as u8 - b'a',
                })
            }
            (_, _) => None,
        }
    }

    pub fn unparse(&self) -> String {
        format!("{}{}", (self.col + b'a') as char, (8 - self.row))
    }

    /// Square shifted by the given deltas, or None when off the board.
    pub fn offset(&self, row_delta: i8, col_delta: i8) -> Option<BoardSquare> {
        let row = self.row as i8 + row_delta;
        let col = self.col as i8 + col_delta;

        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(BoardSquare::new(row as u8, col as u8))
        } else {
            None
        }
    }
}

impl fmt::Display for BoardSquare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.unparse())
    }
}
