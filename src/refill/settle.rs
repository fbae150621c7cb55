//! Run-free refill for cascades that have gone on too long.
//!
//! A biased policy can rebuild the run it just removed, pass after pass. Once
//! a cascade passes its limit the resolver stops consulting the level's
//! policy and fills vacated cells here instead.

use smallvec::SmallVec;

use crate::board::Board;
use crate::core::{Palette, Position, RandomSource, TileColor, COLOR_COUNT};
use crate::events::TileMotion;

use super::{spawn_from_above, uniform_color, RefillContext};

/// Fill every vacated cell with a color that completes no run.
///
/// Cells are filled in context order, each checked against the tokens
/// already on the board in both directions along both axes. When every
/// palette color would complete a run the cell takes a uniform draw.
pub fn fill_without_runs(
    board: &mut Board,
    context: &RefillContext,
    palette: Palette,
    rng: &mut dyn RandomSource,
) -> Vec<TileMotion> {
    context
        .ordered()
        .map(|pos| {
            let safe: SmallVec<[TileColor; COLOR_COUNT]> = palette
                .colors()
                .iter()
                .copied()
                .filter(|&color| !completes_run(board, pos, color))
                .collect();

            let color = if safe.is_empty() {
                uniform_color(palette, rng)
            } else {
                safe[rng.next_index(safe.len())]
            };
            spawn_from_above(board, pos, color)
        })
        .collect()
}

/// Check whether placing `color` at `pos` would complete a run of three.
fn completes_run(board: &Board, pos: Position, color: TileColor) -> bool {
    [(0, 1), (1, 0)].into_iter().any(|(dr, dc)| {
        1 + stretch(board, pos, (dr, dc), color) + stretch(board, pos, (-dr, -dc), color) >= 3
    })
}

/// Same-colored tokens next to `pos`, walking one way.
fn stretch(board: &Board, pos: Position, step: (isize, isize), color: TileColor) -> usize {
    let mut len = 0;
    let (mut row, mut col) = (pos.row as isize, pos.col as isize);

    loop {
        row += step.0;
        col += step.1;
        if row < 0 || col < 0 {
            return len;
        }
        let next = Position::new(row as usize, col as usize);
        if !board.contains(next) || board.color_at(next) != Some(color) {
            return len;
        }
        len += 1;
    }
}
