//! Core engine types: positions, colors, tokens, RNG, configuration.
//!
//! This module contains the leaf building blocks every other module uses.
//! Levels configure them via `LevelConfig` rather than modifying the core.

pub mod position;
pub mod color;
pub mod token;
pub mod rng;
pub mod config;

pub use position::Position;
pub use color::{ColorMap, Palette, TileColor, UnknownColor, COLOR_COUNT};
pub use token::{Token, TokenId};
pub use rng::{GameRng, GameRngState, RandomSource};
pub use config::{
    LevelConfig, LevelId, Pacing, RefillPolicyKind, StarThresholds, DEFAULT_CASCADE_PASS_LIMIT,
};
