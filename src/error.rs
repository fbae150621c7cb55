//! Error types.
//!
//! Only level setup can fail. Rejected swaps and game-over are ordinary
//! outcomes, and out-of-bounds coordinates are contract violations that panic.

use thiserror::Error;

/// A level configuration the engine cannot run with.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// The board has no cells.
    #[error("board must have at least one row and column, got {rows}x{columns}")]
    EmptyBoard { rows: usize, columns: usize },

    /// Too few or too many colors.
    #[error("color count must be between 2 and {max}, got {count}")]
    ColorCount { count: usize, max: usize },

    /// A spawn probability outside `[0, 1]`.
    #[error("{name} must be within [0, 1], got {value}")]
    Probability { name: &'static str, value: f64 },
}

/// Building a match-free board did not converge.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BuildError {
    /// Matches remained after every permitted re-roll round.
    #[error(
        "board still had {remaining} matched cells after {attempts} re-roll rounds; \
         too few colors for a {rows}x{columns} board?"
    )]
    Unstable {
        rows: usize,
        columns: usize,
        attempts: u32,
        remaining: usize,
    },
}

/// Errors raised while starting or restarting a level.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum EngineError {
    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Board build failed.
    #[error(transparent)]
    Build(#[from] BuildError),
}
