//! Score and goal tracking.
//!
//! `ScoreState` accumulates score and match units as cascades run, owns the
//! move and time budgets, and answers the win check. Deciding *when* a
//! terminal event fires is the engine's job; this module only keeps count.

mod state;
mod outcome;

pub use state::{ScoreState, POINTS_PER_TOKEN};
pub use outcome::{GameOutcome, LossReason};
