//! Board coordinates.
//!
//! Row 0 is the bottom row of the board. "Below" a position means one row
//! lower (`row - 1`); new tokens enter from above (higher rows).

use serde::{Deserialize, Serialize};

/// A `(row, column)` coordinate on the board.
///
/// Positions are plain values; bounds are checked by [`crate::board::Board`].
/// Presentation code may also use positions above the board (`row >= rows`)
/// as spawn origins for falling tokens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Row index, 0 = bottom.
    pub row: usize,
    /// Column index, 0 = left.
    pub col: usize,
}

impl Position {
    /// Create a new position.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Manhattan distance between two positions.
    #[must_use]
    pub const fn manhattan(self, other: Position) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// Two positions are adjacent when their Manhattan distance is exactly 1.
    ///
    /// ```
    /// use rust_match3::core::Position;
    ///
    /// let a = Position::new(2, 3);
    /// assert!(a.is_adjacent(Position::new(2, 4)));
    /// assert!(a.is_adjacent(Position::new(1, 3)));
    /// assert!(!a.is_adjacent(Position::new(3, 4))); // diagonal
    /// assert!(!a.is_adjacent(a));
    /// ```
    #[must_use]
    pub const fn is_adjacent(self, other: Position) -> bool {
        self.manhattan(other) == 1
    }

    /// The position one row lower, or `None` on the bottom row.
    #[must_use]
    pub fn below(self) -> Option<Position> {
        self.row.checked_sub(1).map(|row| Position::new(row, self.col))
    }

    /// The position `rows` rows higher. Used as the spawn origin for
    /// tokens that fall into the board from above.
    #[must_use]
    pub const fn lifted(self, rows: usize) -> Position {
        Position::new(self.row + rows, self.col)
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
