//! The engine facade hosts talk to.
//!
//! ```
//! use rust_match3::core::{LevelConfig, Position};
//! use rust_match3::engine::{Engine, GameStatus};
//!
//! let mut engine = Engine::new(LevelConfig::new("Level1").with_seed(7)).unwrap();
//! let events = engine.subscribe();
//!
//! // Most swaps on a quiet board do not match and are reverted.
//! let outcome = engine.submit_swap(Position::new(0, 0), Position::new(0, 1));
//! if !outcome.is_accepted() {
//!     assert_eq!(engine.score().moves_left(), 20);
//! }
//! assert_eq!(engine.status(), GameStatus::Playing);
//! assert!(events.try_iter().count() >= 2);
//! ```

mod game;
mod selection;

pub use game::{Engine, GameStatus, SwapOutcome, SwapRejection};
pub use selection::TileSelection;
pub use crate::scoring::{GameOutcome, LossReason};
