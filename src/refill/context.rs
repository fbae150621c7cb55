//! The cells one cascade pass vacated, grouped by originating run.

use rustc_hash::FxHashMap;

use crate::board::{MatchSet, Orientation};
use crate::core::Position;

/// Vacated positions for one pass.
///
/// A cell covered by both a vertical and a horizontal run counts as
/// vertical. Both lists are sorted bottom row first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RefillContext {
    vertical: Vec<Position>,
    horizontal: Vec<Position>,
    vertical_run: FxHashMap<Position, usize>,
}

impl RefillContext {
    /// Group the positions of a match set.
    #[must_use]
    pub fn from_matches(matches: &MatchSet) -> Self {
        let mut vertical_run = FxHashMap::default();
        for (run, m) in matches
            .matches()
            .iter()
            .filter(|m| m.orientation == Orientation::Vertical)
            .enumerate()
        {
            for &pos in &m.positions {
                vertical_run.insert(pos, run);
            }
        }

        let mut vertical: Vec<_> = vertical_run.keys().copied().collect();
        vertical.sort_unstable();

        let horizontal = matches
            .positions_by(Orientation::Horizontal)
            .into_iter()
            .filter(|p| !vertical_run.contains_key(p))
            .collect();

        Self {
            vertical,
            horizontal,
            vertical_run,
        }
    }

    /// Vacated cells that belong to a vertical run.
    #[must_use]
    pub fn vertical(&self) -> &[Position] {
        &self.vertical
    }

    /// Vacated cells that belong only to horizontal runs.
    #[must_use]
    pub fn horizontal(&self) -> &[Position] {
        &self.horizontal
    }

    /// Every vacated cell: vertical first, then horizontal.
    pub fn ordered(&self) -> impl Iterator<Item = Position> + '_ {
        self.vertical.iter().chain(self.horizontal.iter()).copied()
    }

    /// Check whether a cell belongs to a vertical run.
    #[must_use]
    pub fn is_vertical(&self, pos: Position) -> bool {
        self.vertical_run.contains_key(&pos)
    }

    /// Check whether two cells belong to the same vertical run.
    #[must_use]
    pub fn same_vertical_run(&self, a: Position, b: Position) -> bool {
        match (self.vertical_run.get(&a), self.vertical_run.get(&b)) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        }
    }

    /// Number of vacated cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vertical.len() + self.horizontal.len()
    }

    /// Check whether nothing was vacated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{find_matches, Board};
    use crate::core::TileColor::*;

    #[test]
    fn test_partition_cross_shape() {
        let board = Board::from_colors(&[
            &[Blue, Red, Blue],
            &[Red, Red, Red],
            &[Blue, Red, Blue],
        ]);
        let ctx = RefillContext::from_matches(&find_matches(&board));

        assert_eq!(
            ctx.vertical(),
            &[Position::new(0, 1), Position::new(1, 1), Position::new(2, 1)]
        );
        assert_eq!(ctx.horizontal(), &[Position::new(1, 0), Position::new(1, 2)]);
        assert_eq!(ctx.len(), 5);

        let order: Vec<_> = ctx.ordered().collect();
        assert_eq!(order[0], Position::new(0, 1));
        assert_eq!(order[3], Position::new(1, 0));
    }

    #[test]
    fn test_adjacent_vertical_runs_are_distinct() {
        let board = Board::from_colors(&[
            &[Red],
            &[Red],
            &[Red],
            &[Blue],
            &[Blue],
            &[Blue],
        ]);
        let ctx = RefillContext::from_matches(&find_matches(&board));

        assert_eq!(ctx.vertical().len(), 6);
        assert!(ctx.same_vertical_run(Position::new(1, 0), Position::new(0, 0)));
        assert!(!ctx.same_vertical_run(Position::new(3, 0), Position::new(2, 0)));
        assert!(ctx.is_vertical(Position::new(5, 0)));
    }

    #[test]
    fn test_empty() {
        let ctx = RefillContext::default();
        assert!(ctx.is_empty());
        assert_eq!(ctx.ordered().count(), 0);
    }
}
