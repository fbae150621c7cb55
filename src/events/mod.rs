//! Engine events and their delivery.
//!
//! ## Design Philosophy
//!
//! The engine never calls into presentation, audio, or HUD code. It
//! publishes typed [`EngineEvent`]s on an [`EventBus`]; collaborators
//! subscribe and drain their receiver whenever suits them.
//!
//! ## Ordering
//!
//! Events are published after the mutation they describe is committed.
//! Within one cascade pass the order is: `TilesRemoved`, the pass's
//! `TileMoved` records, `ScoreChanged`, any `MatchCountChanged`, then
//! `MultiplierChanged`.

mod event;
mod bus;

pub use event::{EngineEvent, MotionKind, TileMotion};
pub use bus::EventBus;
