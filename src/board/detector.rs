//! Run detection.
//!
//! Scans every row left-to-right, then every column bottom-to-top, and
//! records each maximal run of at least [`MIN_RUN`] same-colored tokens as a
//! [`Match`]. Empty cells break runs.
//!
//! Detection is a pure function of the board: calling it twice on an
//! unchanged board yields identical results. Runs that cross (L and T
//! shapes) are reported as separate matches sharing a cell; removal works
//! on the deduplicated union from [`MatchSet::positions`].

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Position, TileColor};

use super::Board;

/// Minimum run length that counts as a match.
pub const MIN_RUN: usize = 3;

/// Direction of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Along a row.
    Horizontal,
    /// Along a column.
    Vertical,
}

/// One detected run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    /// Row-run or column-run.
    pub orientation: Orientation,
    /// Shared color.
    pub color: TileColor,
    /// Positions in scan order (left-to-right or bottom-to-top).
    /// SmallVec holds runs up to 8 long without heap allocation.
    pub positions: SmallVec<[Position; 8]>,
}

impl Match {
    /// Number of tokens in the run.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Runs are never empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Check whether the run covers a position.
    #[must_use]
    pub fn contains(&self, pos: Position) -> bool {
        self.positions.contains(&pos)
    }
}

/// All runs found in one scan.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSet {
    matches: Vec<Match>,
}

impl MatchSet {
    /// Check whether any run was found.
    #[must_use]
    pub fn has_matches(&self) -> bool {
        !self.matches.is_empty()
    }

    /// The individual runs: rows first, then columns.
    #[must_use]
    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    /// Number of runs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// Check whether no run was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Sorted, deduplicated union of every matched position.
    #[must_use]
    pub fn positions(&self) -> Vec<Position> {
        Self::union(self.matches.iter())
    }

    /// Sorted, deduplicated positions of runs with the given orientation.
    #[must_use]
    pub fn positions_by(&self, orientation: Orientation) -> Vec<Position> {
        Self::union(self.matches.iter().filter(|m| m.orientation == orientation))
    }

    fn union<'a>(matches: impl Iterator<Item = &'a Match>) -> Vec<Position> {
        let set: FxHashSet<Position> = matches.flat_map(|m| m.positions.iter().copied()).collect();
        let mut positions: Vec<_> = set.into_iter().collect();
        positions.sort_unstable();
        positions
    }
}

/// Scan the board for runs.
#[must_use]
pub fn find_matches(board: &Board) -> MatchSet {
    let mut matches = Vec::new();

    for row in 0..board.rows() {
        let line: Vec<_> = (0..board.columns()).map(|col| Position::new(row, col)).collect();
        scan_line(board, &line, Orientation::Horizontal, &mut matches);
    }

    for col in 0..board.columns() {
        let line: Vec<_> = (0..board.rows()).map(|row| Position::new(row, col)).collect();
        scan_line(board, &line, Orientation::Vertical, &mut matches);
    }

    MatchSet { matches }
}

/// Shorthand for `find_matches(board).has_matches()`.
#[must_use]
pub fn has_matches(board: &Board) -> bool {
    find_matches(board).has_matches()
}

fn scan_line(board: &Board, line: &[Position], orientation: Orientation, out: &mut Vec<Match>) {
    let mut start = 0;

    for i in 1..=line.len() {
        let prev = board.color_at(line[i - 1]);
        let cur = line.get(i).and_then(|&p| board.color_at(p));

        if prev.is_some() && prev == cur {
            continue;
        }

        if let Some(color) = prev {
            if i - start >= MIN_RUN {
                out.push(Match {
                    orientation,
                    color,
                    positions: SmallVec::from_slice(&line[start..i]),
                });
            }
        }
        start = i;
    }
}
