//! Weighted-neighbor refill (policy A).
//!
//! Vacated cells are filled in place, vertical-run cells first and then
//! horizontal-run cells, each bottom row first. A new token's color leans
//! toward the token directly below it:
//!
//! - vertical-run cell whose lower neighbor was vacated by the same run:
//!   copy that neighbor's (already refilled) color with `same_color_chance`
//! - horizontal-run cell above an occupied cell: copy the lower color with
//!   `different_color_chance`
//! - anything else: uniform over the palette
//!
//! When the copy roll fails, the color is uniform over the palette minus
//! the anchor color.

use smallvec::SmallVec;

use super::{spawn_from_above, uniform_color, RefillContext, RefillPolicy};
use crate::board::Board;
use crate::core::{Palette, Position, RandomSource, RefillPolicyKind, TileColor, COLOR_COUNT};
use crate::events::TileMotion;

/// Policy A.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WeightedNeighbor {
    palette: Palette,
    same_color_chance: f64,
    different_color_chance: f64,
}

impl WeightedNeighbor {
    /// Create the policy with its copy-the-color-below probabilities.
    #[must_use]
    pub fn new(palette: Palette, same_color_chance: f64, different_color_chance: f64) -> Self {
        Self {
            palette,
            same_color_chance,
            different_color_chance,
        }
    }

    fn pick_color(
        &self,
        board: &Board,
        context: &RefillContext,
        pos: Position,
        rng: &mut dyn RandomSource,
    ) -> TileColor {
        let Some(below) = pos.below() else {
            return uniform_color(self.palette, rng);
        };

        let anchor = if context.is_vertical(pos) {
            if context.same_vertical_run(pos, below) {
                board.color_at(below).map(|c| (c, self.same_color_chance))
            } else {
                None
            }
        } else {
            board.color_at(below).map(|c| (c, self.different_color_chance))
        };

        match anchor {
            Some((color, chance)) => self.lean_toward(color, chance, rng),
            None => uniform_color(self.palette, rng),
        }
    }

    fn lean_toward(&self, anchor: TileColor, chance: f64, rng: &mut dyn RandomSource) -> TileColor {
        if rng.chance(chance) {
            return anchor;
        }

        let others: SmallVec<[TileColor; COLOR_COUNT]> = self.palette.others(anchor).collect();
        if others.is_empty() {
            anchor
        } else {
            others[rng.next_index(others.len())]
        }
    }
}

impl RefillPolicy for WeightedNeighbor {
    fn kind(&self) -> RefillPolicyKind {
        RefillPolicyKind::WeightedNeighbor
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
            let color = self.pick_color(board, context, pos, rng);
            motions.push(spawn_from_above(board, pos, color));
        }
        motions
    }
}
