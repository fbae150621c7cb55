//! Neighborhood-majority refill (policy B).
//!
//! Each vacated cell, in the usual vertical-then-horizontal order, is
//! filled with a color drawn in proportion to how often it appears among
//! the occupied cells of the surrounding 8-neighborhood. Cells refilled
//! earlier in the same pass count. With no occupied neighbor the level's
//! fallback color is used.

use super::{spawn_from_above, RefillContext, RefillPolicy};
use crate::board::Board;
use crate::core::{ColorMap, Palette, Position, RandomSource, RefillPolicyKind, TileColor};
use crate::events::TileMotion;

/// Policy B.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NeighborhoodMajority {
    palette: Palette,
    fallback: TileColor,
}

impl NeighborhoodMajority {
    /// Create the policy. `fallback` colors cells with no occupied neighbor.
    #[must_use]
    pub fn new(palette: Palette, fallback: TileColor) -> Self {
        Self { palette, fallback }
    }

    /// Color counts among the occupied neighbors of `pos`.
    fn tally(board: &Board, pos: Position) -> ColorMap<u32> {
        let mut counts = ColorMap::default();
        for color in board.neighbors8(pos).filter_map(|p| board.color_at(p)) {
            counts[color] += 1;
        }
        counts
    }

    fn pick_color(&self, board: &Board, pos: Position, rng: &mut dyn RandomSource) -> TileColor {
        let counts = Self::tally(board, pos);
        let colors = self.palette.colors();
        let weights: Vec<u32> = colors.iter().map(|&c| counts[c]).collect();

        match rng.choose_weighted(&weights) {
            Some(i) => colors[i],
            None => self.fallback,
        }
    }
}

impl RefillPolicy for NeighborhoodMajority {
    fn kind(&self) -> RefillPolicyKind {
        RefillPolicyKind::NeighborhoodMajority
    }

    fn palette(&self) -> Palette {
        self.palette
    }

    fn refill(
        &self,
        board: &mut Board,
        context: &RefillContext,
        rng: &mut dyn RandomSource,
    ) -> Vec<TileMotion> {
        let mut motions = Vec::with_capacity(context.len());
        for pos in context.ordered() {
            if board.get(pos).is_some() {
                continue;
            }
            let color = self.pick_color(board, pos, rng);
            motions.push(spawn_from_above(board, pos, color));
        }
        motions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::find_matches;
    use crate::core::TileColor::*;
    use crate::refill::testing::FixedRng;

    fn center_hole() -> (Board, RefillContext) {
        let mut board = Board::from_colors(&[
            &[Blue, Blue, Green],
            &[Blue, Red, Blue],
            &[Green, Blue, Blue],
        ]);
        board.take(Position::new(1, 1));
        let ctx = RefillContext::from_matches(&find_matches(&board));
        (board, ctx)
    }

    #[test]
    fn test_tally() {
        let (board, _) = center_hole();
        let counts = NeighborhoodMajority::tally(&board, Position::new(1, 1));

        assert_eq!(counts[Blue], 6);
        assert_eq!(counts[Green], 2);
        assert_eq!(counts[Red], 0);
    }

    #[test]
    fn test_weighted_pick() {
        let (board, _) = center_hole();
        let policy = NeighborhoodMajority::new(Palette::full(), Red);

        let low = policy.pick_color(&board, Position::new(1, 1), &mut FixedRng::new(0.0, 0));
        let high = policy.pick_color(&board, Position::new(1, 1), &mut FixedRng::new(0.0, 7));

        assert_eq!(low, Blue);
        assert_eq!(high, Green);
    }

    #[test]
    fn test_never_picks_absent_color() {
        let (board, _) = center_hole();
        let policy = NeighborhoodMajority::new(Palette::full(), Red);

        for index in 0..8 {
            let color = policy.pick_color(&board, Position::new(1, 1), &mut FixedRng::new(0.0, index));
            assert!(color == Blue || color == Green);
        }
    }

    #[test]
    fn test_fallback_when_isolated() {
        let mut board = Board::from_colors(&[&[Red, Red, Red]]);
        let matches = find_matches(&board);
        for pos in matches.positions() {
            board.take(pos);
        }
        let ctx = RefillContext::from_matches(&matches);
        let policy = NeighborhoodMajority::new(Palette::full(), Purple);

        let motions = policy.refill(&mut board, &ctx, &mut FixedRng::new(0.0, 0));

        // First cell has no neighbors; later cells see only the fallback.
        assert_eq!(board.row_colors(0), vec![Some(Purple); 3]);
        assert_eq!(motions.len(), 3);
    }

    #[test]
    fn test_refill_fills_every_vacated_cell() {
        let mut board = Board::from_colors(&[
            &[Blue, Green, Blue],
            &[Red, Red, Red],
            &[Green, Blue, Green],
        ]);
        let matches = find_matches(&board);
        for pos in matches.positions() {
            board.take(pos);
        }
        let ctx = RefillContext::from_matches(&matches);
        let policy = NeighborhoodMajority::new(Palette::full(), Red);

        policy.refill(&mut board, &ctx, &mut FixedRng::new(0.0, 3));

        assert!(board.is_full());
        assert!(board.row_colors(1).iter().all(|c| matches!(c, Some(Blue) | Some(Green))));
    }
}
