//! Refill policies.
//!
//! After a cascade pass removes its matched tokens, a refill policy decides
//! the color and arrival path of the tokens that replace them. Levels pick
//! one of three interchangeable strategies:
//!
//! - [`WeightedNeighbor`] (A): new tokens fall into the vacated cells; colors
//!   lean toward the token directly below
//! - [`NeighborhoodMajority`] (B): colors are drawn in proportion to the
//!   surrounding 8 cells
//! - [`Gravity`] (C): surviving tokens slide down, then the top of each
//!   column fills uniformly
//!
//! Every policy must leave the board full. All randomness comes through the
//! injected [`RandomSource`]. Cascades that outrun their pass limit switch
//! to [`fill_without_runs`], which ignores the policy's bias.

mod context;
mod weighted;
mod neighborhood;
mod gravity;
mod settle;

pub use context::RefillContext;
pub use weighted::WeightedNeighbor;
pub use neighborhood::NeighborhoodMajority;
pub use gravity::Gravity;
pub use settle::fill_without_runs;

use crate::board::Board;
use crate::core::{LevelConfig, Palette, Position, RandomSource, RefillPolicyKind, TileColor};
use crate::events::{MotionKind, TileMotion};

/// A refill strategy.
pub trait RefillPolicy: std::fmt::Debug {
    /// Which strategy this is.
    fn kind(&self) -> RefillPolicyKind;

    /// The colors this policy draws from.
    fn palette(&self) -> Palette;

    /// Fill the cells vacated by one pass.
    ///
    /// Returns one motion record per token created or moved, in the order
    /// they were applied.
    fn refill(
        &self,
        board: &mut Board,
        context: &RefillContext,
        rng: &mut dyn RandomSource,
    ) -> Vec<TileMotion>;
}

/// Build the refill policy a level runs.
#[must_use]
pub fn policy_for(config: &LevelConfig) -> Box<dyn RefillPolicy> {
    let palette = config.palette();
    match config.policy_kind() {
        RefillPolicyKind::WeightedNeighbor => Box::new(WeightedNeighbor::new(
            palette,
            config.same_color_chance,
            config.different_color_chance,
        )),
        RefillPolicyKind::NeighborhoodMajority => Box::new(NeighborhoodMajority::new(
            palette,
            config.effective_fallback_color(),
        )),
        RefillPolicyKind::Gravity => Box::new(Gravity::new(palette)),
    }
}

/// Uniform draw from the palette.
pub(crate) fn uniform_color(palette: Palette, rng: &mut dyn RandomSource) -> TileColor {
    palette.colors()[rng.next_index(palette.len())]
}

/// Create a token that falls in from above the board.
pub(crate) fn spawn_from_above(board: &mut Board, pos: Position, color: TileColor) -> TileMotion {
    let token = board.spawn(pos, color);
    TileMotion::new(token, color, pos.lifted(board.rows()), pos, MotionKind::Spawn)
}
