//! Tokens: the colored pieces that occupy board cells.

use serde::{Deserialize, Serialize};

use super::color::TileColor;
use super::position::Position;

/// Unique identifier for a token.
///
/// Allocated by the board that owns the token; never reused within a
/// board's lifetime, so presentation code can key sprites by it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TokenId(pub u32);

impl TokenId {
    /// Create a new token ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for TokenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token({})", self.0)
    }
}

/// A token on the board.
///
/// `position` is authoritative and always equals the slot that holds the
/// token. `target` is where the presentation layer should draw it; logic
/// never reads it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    /// Identity.
    pub id: TokenId,
    /// Color.
    pub color: TileColor,
    /// Current board slot.
    pub position: Position,
    /// Animation target, in board coordinates.
    pub target: Position,
}

impl Token {
    /// Create a token resting at `position`.
    #[must_use]
    pub const fn new(id: TokenId, color: TileColor, position: Position) -> Self {
        Self {
            id,
            color,
            position,
            target: position,
        }
    }
}
