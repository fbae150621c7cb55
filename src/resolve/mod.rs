//! Swap validation and cascade resolution.
//!
//! - [`try_swap`]: speculative swap, committed only if it creates a run
//! - [`CascadeResolver`]: the remove, refill, rescan state machine that
//!   follows a committed swap
//! - [`stabilize`]: the same loop without scoring, for quieting a board
//!   before play
//!
//! ## Example
//!
//! ```
//! use rust_match3::board::Board;
//! use rust_match3::core::{GameRng, LevelConfig, Position, TileColor::*};
//! use rust_match3::events::EventBus;
//! use rust_match3::refill::policy_for;
//! use rust_match3::resolve::{try_swap, CascadeResolver, ResolveContext};
//! use rust_match3::scoring::ScoreState;
//!
//! let config = LevelConfig::new("Level3").with_size(1, 5);
//! let mut board = Board::from_colors(&[&[Red, Red, Red, Blue, Red]]);
//! assert!(try_swap(&mut board, Position::new(0, 3), Position::new(0, 4)).is_committed());
//!
//! let mut score = ScoreState::new(&config);
//! let policy = policy_for(&config);
//! let mut rng = GameRng::new(1);
//! let mut bus = EventBus::new();
//! let mut resolver = CascadeResolver::new();
//! resolver.begin();
//!
//! let summary = resolver.run_to_completion(&mut ResolveContext {
//!     board: &mut board,
//!     score: &mut score,
//!     policy: policy.as_ref(),
//!     rng: &mut rng,
//!     bus: &mut bus,
//! });
//! assert!(summary.gained >= 400);
//! assert_eq!(score.moves_left(), config.moves - 1);
//! ```

mod swap;
mod cascade;

pub use swap::{try_swap, SwapResult};
pub use cascade::{
    stabilize, CascadeResolver, CascadeSummary, Phase, ResolutionStatus, ResolveContext,
};
