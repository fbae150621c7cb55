//! Gravity refill (policy C).
//!
//! Column by column, surviving tokens slide toward row 0 so they keep their
//! relative order with no holes beneath them. The empty cells left at the
//! top of each column are then filled with uniformly random colors, new
//! tokens entering from above the board.

use super::{spawn_from_above, uniform_color, RefillContext, RefillPolicy};
use crate::board::Board;
use crate::core::{Palette, Position, RandomSource, RefillPolicyKind};
use crate::events::{MotionKind, TileMotion};

/// Policy C.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Gravity {
    palette: Palette,
}

impl Gravity {
    /// Create the policy over a palette.
    #[must_use]
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }

    /// Compact one column toward row 0. Returns the first empty row.
    fn settle_column(board: &mut Board, col: usize, motions: &mut Vec<TileMotion>) -> usize {
        let mut floor = 0;
        for row in 0..board.rows() {
            let from = Position::new(row, col);
            let Some(color) = board.color_at(from) else {
                continue;
            };
            if row != floor {
                let to = Position::new(floor, col);
                if let Some(token) = board.move_token(from, to) {
                    motions.push(TileMotion::new(token, color, from, to, MotionKind::Fall));
                }
            }
            floor += 1;
        }
        floor
    }
}

impl RefillPolicy for Gravity {
    fn kind(&self) -> RefillPolicyKind {
        RefillPolicyKind::Gravity
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
        let mut motions = Vec::with_capacity(context.len() * 2);

        for col in 0..board.columns() {
            let floor = Self::settle_column(board, col, &mut motions);
            for row in floor..board.rows() {
                let color = uniform_color(self.palette, rng);
                motions.push(spawn_from_above(board, Position::new(row, col), color));
            }
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

    #[test]
    fn test_survivors_slide_down_in_order() {
        let mut board = Board::from_colors(&[
            &[Blue, Yellow],
            &[Red, Green],
            &[Red, Yellow],
            &[Red, Green],
            &[Purple, Yellow],
        ]);
        let matches = find_matches(&board);
        for pos in matches.positions() {
            board.take(pos);
        }
        let purple = board.get(Position::new(4, 0)).unwrap().id;
        let ctx = RefillContext::from_matches(&matches);

        let motions = Gravity::new(Palette::full()).refill(&mut board, &ctx, &mut FixedRng::new(0.0, 3));

        assert_eq!(board.row_colors(0), vec![Some(Blue), Some(Yellow)]);
        assert_eq!(board.row_colors(1), vec![Some(Purple), Some(Green)]);
        assert_eq!(board.row_colors(2), vec![Some(Green), Some(Yellow)]);
        assert_eq!(board.row_colors(4), vec![Some(Green), Some(Yellow)]);
        assert_eq!(board.get(Position::new(1, 0)).unwrap().id, purple);

        let falls: Vec<_> = motions.iter().filter(|m| m.kind == MotionKind::Fall).collect();
        assert_eq!(falls.len(), 1);
        assert_eq!(falls[0].from, Position::new(4, 0));
        assert_eq!(falls[0].to, Position::new(1, 0));

        let spawns: Vec<_> = motions.iter().filter(|m| m.kind == MotionKind::Spawn).collect();
        assert_eq!(spawns.len(), 3);
        assert_eq!(spawns[0].from, Position::new(7, 0));
        assert!(board.is_full());
        assert!(board.is_consistent());
    }

    #[test]
    fn test_full_board_is_untouched() {
        let mut board = Board::from_colors(&[&[Red, Blue], &[Blue, Red]]);
        let before = board.clone();

        let motions = Gravity::new(Palette::full()).refill(
            &mut board,
            &RefillContext::default(),
            &mut FixedRng::new(0.0, 0),
        );

        assert!(motions.is_empty());
        assert_eq!(board, before);
    }

    #[test]
    fn test_horizontal_clear_drops_row_above() {
        let mut board = Board::from_colors(&[
            &[Red, Red, Red],
            &[Blue, Green, Purple],
        ]);
        let matches = find_matches(&board);
        for pos in matches.positions() {
            board.take(pos);
        }
        let ctx = RefillContext::from_matches(&matches);

        Gravity::new(Palette::new(2)).refill(&mut board, &ctx, &mut FixedRng::new(0.0, 1));

        assert_eq!(board.row_colors(0), vec![Some(Blue), Some(Green), Some(Purple)]);
        assert_eq!(board.row_colors(1), vec![Some(Blue); 3]);
    }
}
