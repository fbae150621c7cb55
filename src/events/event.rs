//! Engine event types.
//!
//! Events describe committed state changes. They are published only after
//! the mutation they describe is complete, so a subscriber reading the
//! board in response always sees the post-change state.

use serde::{Deserialize, Serialize};

use crate::core::{Position, TileColor, TokenId};
use crate::scoring::LossReason;

/// Why a token moved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MotionKind {
    /// Exchanged by a player swap.
    Swap,
    /// Moved back by a swap that made no match.
    Revert,
    /// Newly created by a refill, entering from `from`.
    Spawn,
    /// Slid down by gravity.
    Fall,
}

/// One token movement, for animation.
///
/// `from` may lie above the board for spawned tokens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileMotion {
    /// The token that moved.
    pub token: TokenId,
    /// Its color.
    pub color: TileColor,
    /// Where the animation starts.
    pub from: Position,
    /// Where the token now rests.
    pub to: Position,
    /// Why it moved.
    pub kind: MotionKind,
}

impl TileMotion {
    /// Create a motion record.
    #[must_use]
    pub const fn new(token: TokenId, color: TileColor, from: Position, to: Position, kind: MotionKind) -> Self {
        Self {
            token,
            color,
            from,
            to,
            kind,
        }
    }
}

/// Events emitted for presentation, HUD, audio, and scene control.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineEvent {
    /// A token moved (swap, revert, refill spawn, or gravity).
    TileMoved(TileMotion),

    /// Tokens removed by one cascade pass, sorted.
    TilesRemoved { positions: Vec<Position> },

    /// Score changed.
    ScoreChanged { score: u64, gained: u64 },

    /// Multiplier changed.
    MultiplierChanged { multiplier: u32 },

    /// A color's match count changed.
    MatchCountChanged { color: TileColor, count: u32 },

    /// Move budget changed.
    MovesLeftChanged { moves_left: u32 },

    /// The cascade finished and the engine is idle again.
    CascadeSettled { passes: u32 },

    /// A new board was built (level start or restart).
    BoardReset,

    /// Scheduling was frozen.
    Paused,

    /// Scheduling resumed.
    Resumed,

    /// The level was lost.
    GameOver { reason: LossReason },

    /// The level was won.
    GameWon { stars: u8, score: u64 },
}

impl EngineEvent {
    /// Check whether this event ends the level attempt.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, EngineEvent::GameOver { .. } | EngineEvent::GameWon { .. })
    }
}
