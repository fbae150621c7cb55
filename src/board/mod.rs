//! Board representation and run detection.
//!
//! - `Board`: the owned token matrix with bounds-checked accessors
//! - `find_matches`: pure scan for horizontal and vertical runs
//! - `build_stable`: level-start construction of a match-free board

mod grid;
mod detector;
mod builder;

pub use grid::{Board, GridLayout};
pub use detector::{find_matches, has_matches, Match, MatchSet, Orientation, MIN_RUN};
pub use builder::{build_stable, reroll_until_stable};
