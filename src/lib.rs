//! # rust-match3
//!
//! A grid match-three resolution engine: swap validation, run detection,
//! cascading remove/refill/rescan, pluggable refill policies, and score and
//! goal tracking.
//!
//! ## Design Principles
//!
//! 1. **Headless**: the engine never touches rendering, audio, or input
//!    devices. It publishes typed events and takes explicit calls.
//!
//! 2. **Deterministic**: all randomness flows through an injectable
//!    `RandomSource`; the same seed replays the same level.
//!
//! 3. **Pacing Is Not Logic**: animation delays are a named phase the host
//!    advances. Collapsing them to zero gives identical results.
//!
//! ## Modules
//!
//! - `core`: positions, colors, tokens, RNG, level configuration
//! - `board`: the token matrix, run detector, stable board builder
//! - `refill`: the three refill policies
//! - `resolve`: swap validator and cascade state machine
//! - `scoring`: score, multiplier, budgets, goals
//! - `events`: engine events and the subscriber bus
//! - `engine`: the facade hosts drive
//! - `error`: setup errors
//!
//! ## Example
//!
//! ```
//! use rust_match3::{Engine, LevelConfig, Pacing, Position};
//!
//! let config = LevelConfig::new("Level2").with_pacing(Pacing::Stepped).with_seed(3);
//! let mut engine = Engine::new(config).unwrap();
//!
//! for row in 0..8 {
//!     for col in 0..7 {
//!         if engine.submit_swap(Position::new(row, col), Position::new(row, col + 1)).is_accepted() {
//!             engine.advance_until_idle();
//!         }
//!     }
//! }
//! assert!(engine.score().moves_left() <= 20);
//! ```

pub mod core;
pub mod board;
pub mod refill;
pub mod resolve;
pub mod scoring;
pub mod events;
pub mod engine;
pub mod error;

// Re-export commonly used types
pub use crate::core::{
    ColorMap, GameRng, LevelConfig, LevelId, Pacing, Palette, Position, RandomSource,
    RefillPolicyKind, TileColor, Token, TokenId,
};

pub use crate::board::{find_matches, Board, GridLayout, Match, MatchSet, Orientation};

pub use crate::refill::{policy_for, RefillContext, RefillPolicy};

pub use crate::resolve::{try_swap, CascadeResolver, Phase, ResolutionStatus, SwapResult};

pub use crate::scoring::{GameOutcome, LossReason, ScoreState};

pub use crate::events::{EngineEvent, EventBus, MotionKind, TileMotion};

pub use crate::engine::{Engine, GameStatus, SwapOutcome, SwapRejection, TileSelection};

pub use crate::error::{BuildError, ConfigError, EngineError};
