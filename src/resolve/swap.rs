//! Swap validation.
//!
//! A swap is speculative: the two tokens are exchanged, the run detector
//! looks at the result, and the exchange is undone if nothing matched. A
//! reverted swap leaves the board exactly as it was, token coordinates
//! included.

use crate::board::{find_matches, Board, MatchSet};
use crate::core::Position;
use crate::events::{MotionKind, TileMotion};

/// Result of [`try_swap`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SwapResult {
    /// Positions are not orthogonal neighbors. Nothing happened.
    NotAdjacent,

    /// The swap produced no run and was undone.
    ///
    /// Carries the out-and-back motions for animation.
    Reverted { motions: Vec<TileMotion> },

    /// The swap produced at least one run and stays on the board.
    Committed {
        motions: Vec<TileMotion>,
        matches: MatchSet,
    },
}

impl SwapResult {
    /// Check whether the swap was kept.
    #[must_use]
    pub fn is_committed(&self) -> bool {
        matches!(self, SwapResult::Committed { .. })
    }

    /// Motion records to animate, in order.
    #[must_use]
    pub fn motions(&self) -> &[TileMotion] {
        match self {
            SwapResult::NotAdjacent => &[],
            SwapResult::Reverted { motions } | SwapResult::Committed { motions, .. } => motions,
        }
    }
}

/// Try exchanging the tokens at `a` and `b`.
///
/// # Panics
///
/// Panics if either position is outside the board.
pub fn try_swap(board: &mut Board, a: Position, b: Position) -> SwapResult {
    if !board.is_adjacent(a, b) {
        log::trace!("swap {a} <-> {b} rejected: not adjacent");
        return SwapResult::NotAdjacent;
    }

    board.swap(a, b);
    let mut motions = exchange_motions(board, a, b, MotionKind::Swap);

    let matches = find_matches(board);
    if matches.has_matches() {
        log::trace!("swap {a} <-> {b} committed, {} run(s)", matches.len());
        return SwapResult::Committed { motions, matches };
    }

    board.swap(a, b);
    motions.extend(exchange_motions(board, a, b, MotionKind::Revert));
    log::trace!("swap {a} <-> {b} reverted");
    SwapResult::Reverted { motions }
}

/// Motions for two tokens that just traded places between `a` and `b`.
fn exchange_motions(board: &Board, a: Position, b: Position, kind: MotionKind) -> Vec<TileMotion> {
    [(b, a), (a, b)]
        .into_iter()
        .filter_map(|(from, to)| {
            board
                .get(to)
                .map(|token| TileMotion::new(token.id, token.color, from, to, kind))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TileColor::*;

    fn row() -> Board {
        Board::from_colors(&[&[Red, Red, Red, Blue, Red]])
    }

    #[test]
    fn test_not_adjacent() {
        let mut board = Board::from_colors(&[&[Red, Red, Blue, Red, Green]]);
        let before = board.clone();

        assert_eq!(
            try_swap(&mut board, Position::new(0, 0), Position::new(0, 2)),
            SwapResult::NotAdjacent
        );
        assert_eq!(
            try_swap(&mut board, Position::new(0, 1), Position::new(0, 1)),
            SwapResult::NotAdjacent
        );
        assert_eq!(board, before);
    }

    #[test]
    fn test_revert_restores_board() {
        let mut board = Board::from_colors(&[&[Red, Blue, Green], &[Blue, Green, Red]]);
        let before = board.clone();

        let result = try_swap(&mut board, Position::new(0, 0), Position::new(0, 1));

        assert!(!result.is_committed());
        assert_eq!(board, before);
        assert!(board.is_consistent());

        let kinds: Vec<_> = result.motions().iter().map(|m| m.kind).collect();
        assert_eq!(
            kinds,
            vec![MotionKind::Swap, MotionKind::Swap, MotionKind::Revert, MotionKind::Revert]
        );
    }

    #[test]
    fn test_commit_scenario() {
        let mut board = row();
        let red = board.get(Position::new(0, 4)).unwrap().id;

        let result = try_swap(&mut board, Position::new(0, 3), Position::new(0, 4));

        let SwapResult::Committed { motions, matches } = result else {
            panic!("expected a committed swap");
        };
        assert_eq!(board.row_colors(0), vec![Some(Red), Some(Red), Some(Red), Some(Red), Some(Blue)]);
        assert_eq!(board.get(Position::new(0, 3)).unwrap().id, red);
        assert_eq!(board.get(Position::new(0, 3)).unwrap().position, Position::new(0, 3));

        assert_eq!(matches.len(), 1);
        assert_eq!(matches.positions().len(), 4);

        assert_eq!(motions.len(), 2);
        assert_eq!(motions[0].token, red);
        assert_eq!(motions[0].from, Position::new(0, 4));
        assert_eq!(motions[0].to, Position::new(0, 3));
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_out_of_bounds_panics() {
        let mut board = row();
        try_swap(&mut board, Position::new(0, 4), Position::new(0, 5));
    }
}
