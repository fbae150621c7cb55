//! The board: a fixed `rows x columns` matrix of optional tokens.
//!
//! ## Layout
//!
//! Cells are stored row-major in a single `Vec`, row 0 at the bottom.
//! All neighbor and adjacency math lives here so the refill policies share
//! one set of boundary checks.
//!
//! ## Invariants
//!
//! - Dimensions never change after creation.
//! - A token's `position` always equals the slot holding it. Every mutator
//!   (`set`, `spawn`, `swap`, `move_token`) keeps this in sync.
//! - Out-of-bounds coordinates are a contract violation and panic.

use serde::{Deserialize, Serialize};

use crate::core::{Palette, Position, TileColor, Token, TokenId};

/// Owned, bounds-checked token matrix.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    rows: usize,
    columns: usize,
    cells: Vec<Option<Token>>,
    next_token: u32,
}

impl Board {
    /// Create an empty board.
    #[must_use]
    pub fn new(rows: usize, columns: usize) -> Self {
        assert!(rows > 0 && columns > 0, "Board must have at least one cell");

        Self {
            rows,
            columns,
            cells: vec![None; rows * columns],
            next_token: 0,
        }
    }

    /// Create a full board from color rows, bottom row first.
    ///
    /// ```
    /// use rust_match3::board::Board;
    /// use rust_match3::core::{Position, TileColor::*};
    ///
    /// let board = Board::from_colors(&[
    ///     &[Red, Blue],  // row 0 (bottom)
    ///     &[Green, Red], // row 1
    /// ]);
    /// assert_eq!(board.color_at(Position::new(1, 0)), Some(Green));
    /// ```
    #[must_use]
    pub fn from_colors(rows: &[&[TileColor]]) -> Self {
        let columns = rows.first().map_or(0, |r| r.len());
        assert!(
            rows.iter().all(|r| r.len() == columns),
            "All rows must have the same length"
        );

        let mut board = Self::new(rows.len(), columns);
        for (row, colors) in rows.iter().enumerate() {
            for (col, &color) in colors.iter().enumerate() {
                board.spawn(Position::new(row, col), color);
            }
        }
        board
    }

    /// Number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Check whether a position lies on the board.
    #[must_use]
    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.columns
    }

    /// Assert that `pos` lies on the board.
    fn check(&self, pos: Position) {
        assert!(
            self.contains(pos),
            "Position {pos} is outside the {}x{} board",
            self.rows,
            self.columns
        );
    }

    fn index(&self, pos: Position) -> usize {
        self.check(pos);
        pos.row * self.columns + pos.col
    }

    /// Get the token at a position.
    #[must_use]
    pub fn get(&self, pos: Position) -> Option<&Token> {
        self.cells[self.index(pos)].as_ref()
    }

    /// Get the color at a position.
    #[must_use]
    pub fn color_at(&self, pos: Position) -> Option<TileColor> {
        self.get(pos).map(|t| t.color)
    }

    /// Place a token (or clear the cell with `None`).
    ///
    /// The token's stored position is rewritten to `pos`. Returns the
    /// previous occupant.
    pub fn set(&mut self, pos: Position, token: Option<Token>) -> Option<Token> {
        let idx = self.index(pos);
        let token = token.map(|mut t| {
            t.position = pos;
            t
        });
        std::mem::replace(&mut self.cells[idx], token)
    }

    /// Repaint every token whose color is outside `palette`.
    ///
    /// Tokens keep their identity. Returns the repainted positions.
    pub fn repaint_outside(&mut self, palette: Palette, replacement: TileColor) -> Vec<Position> {
        let mut repainted = Vec::new();
        for token in self.cells.iter_mut().flatten() {
            if !palette.contains(token.color) {
                token.color = replacement;
                repainted.push(token.position);
            }
        }
        repainted
    }

    /// Remove and return the token at a position.
    pub fn take(&mut self, pos: Position) -> Option<Token> {
        let idx = self.index(pos);
        self.cells[idx].take()
    }

    /// Create a new token in an empty cell.
    pub fn spawn(&mut self, pos: Position, color: TileColor) -> TokenId {
        let idx = self.index(pos);
        debug_assert!(self.cells[idx].is_none(), "spawn into occupied cell {pos}");

        let id = TokenId::new(self.next_token);
        self.next_token += 1;
        self.cells[idx] = Some(Token::new(id, color, pos));
        id
    }

    /// Exchange the occupants of two cells, updating both tokens' stored
    /// and target coordinates.
    pub fn swap(&mut self, a: Position, b: Position) {
        let ia = self.index(a);
        let ib = self.index(b);
        self.cells.swap(ia, ib);

        for (idx, pos) in [(ia, a), (ib, b)] {
            if let Some(token) = self.cells[idx].as_mut() {
                token.position = pos;
                token.target = pos;
            }
        }
    }

    /// Move the token at `from` into the empty cell `to`.
    ///
    /// Returns the moved token's ID, or `None` if `from` was empty.
    pub fn move_token(&mut self, from: Position, to: Position) -> Option<TokenId> {
        let to_idx = self.index(to);
        debug_assert!(self.cells[to_idx].is_none(), "move into occupied cell {to}");

        let mut token = self.take(from)?;
        token.position = to;
        token.target = to;
        let id = token.id;
        self.cells[to_idx] = Some(token);
        Some(id)
    }

    /// Check whether two on-board positions are adjacent.
    #[must_use]
    pub fn is_adjacent(&self, a: Position, b: Position) -> bool {
        self.check(a);
        self.check(b);
        a.is_adjacent(b)
    }

    /// The up-to-8 on-board positions surrounding `pos`.
    pub fn neighbors8(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        self.check(pos);
        let rows = pos.row.saturating_sub(1)..=(pos.row + 1).min(self.rows - 1);
        rows.flat_map(move |row| {
            let cols = pos.col.saturating_sub(1)..=(pos.col + 1).min(self.columns - 1);
            cols.map(move |col| Position::new(row, col))
        })
        .filter(move |&p| p != pos)
    }

    /// The on-board position directly below `pos`, if any.
    #[must_use]
    pub fn below(&self, pos: Position) -> Option<Position> {
        self.check(pos);
        pos.below()
    }

    /// All positions, row-major from the bottom-left.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let columns = self.columns;
        (0..self.rows * columns).map(move |i| Position::new(i / columns, i % columns))
    }

    /// All tokens currently on the board, row-major.
    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.cells.iter().flatten()
    }

    /// Positions of empty cells, row-major.
    #[must_use]
    pub fn empty_positions(&self) -> Vec<Position> {
        self.positions().filter(|&p| self.get(p).is_none()).collect()
    }

    /// Check that every cell is occupied.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Check that every token's stored position matches its slot.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.positions()
            .all(|p| self.get(p).map_or(true, |t| t.position == p))
    }

    /// Colors of one row, left to right.
    #[must_use]
    pub fn row_colors(&self, row: usize) -> Vec<Option<TileColor>> {
        (0..self.columns)
            .map(|col| self.color_at(Position::new(row, col)))
            .collect()
    }
}

impl std::fmt::Display for Board {
    /// Renders the top row first, one letter per color, `.` for empty cells.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in (0..self.rows).rev() {
            for color in self.row_colors(row) {
                let c = color.map_or('.', |c| c.name().chars().next().unwrap_or('?'));
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Mapping from board coordinates to world coordinates.
///
/// Consumed by presentation code only; logic never uses world positions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GridLayout {
    /// World position of cell (0, 0).
    pub origin: (f32, f32),
    /// Gap between neighboring cells, in cell units.
    pub cell_spacing: f32,
}

impl GridLayout {
    /// Create a layout.
    #[must_use]
    pub const fn new(origin: (f32, f32), cell_spacing: f32) -> Self {
        Self { origin, cell_spacing }
    }

    /// World position of a cell. Works for spawn positions above the board.
    #[must_use]
    pub fn to_world(&self, pos: Position) -> (f32, f32) {
        let step = 1.0 + self.cell_spacing;
        (
            self.origin.0 + pos.col as f32 * step,
            self.origin.1 + pos.row as f32 * step,
        )
    }
}
