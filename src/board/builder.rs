//! Level-start board construction.
//!
//! A fresh board is filled with uniformly random colors, then every matched
//! cell is re-rolled in place until no run remains. The loop is bounded: a
//! palette too small for the board would otherwise never settle.

use crate::core::{Palette, Position, RandomSource};
use crate::error::BuildError;

use super::{find_matches, Board};

/// Build a full, match-free board.
pub fn build_stable(
    rows: usize,
    columns: usize,
    palette: Palette,
    rng: &mut dyn RandomSource,
    retry_limit: u32,
) -> Result<Board, BuildError> {
    let mut board = Board::new(rows, columns);
    let cells: Vec<_> = board.positions().collect();
    fill_uniform(&mut board, &cells, palette, rng);

    let rounds = reroll_until_stable(&mut board, palette, rng, retry_limit)?;
    log::debug!("built {rows}x{columns} board after {rounds} re-roll rounds");
    Ok(board)
}

/// Re-roll matched cells in place until the board has no runs.
///
/// Returns the number of rounds used. No score, multiplier, or move
/// bookkeeping happens here.
pub fn reroll_until_stable(
    board: &mut Board,
    palette: Palette,
    rng: &mut dyn RandomSource,
    retry_limit: u32,
) -> Result<u32, BuildError> {
    let mut rounds = 0;

    loop {
        let matched = find_matches(board).positions();
        if matched.is_empty() {
            return Ok(rounds);
        }

        if rounds >= retry_limit {
            return Err(BuildError::Unstable {
                rows: board.rows(),
                columns: board.columns(),
                attempts: rounds,
                remaining: matched.len(),
            });
        }

        for &pos in &matched {
            board.take(pos);
        }
        fill_uniform(board, &matched, palette, rng);
        rounds += 1;
    }
}

fn fill_uniform(board: &mut Board, positions: &[Position], palette: Palette, rng: &mut dyn RandomSource) {
    for &pos in positions {
        let color = palette.colors()[rng.next_index(palette.len())];
        board.spawn(pos, color);
    }
}
