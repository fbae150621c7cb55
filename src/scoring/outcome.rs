//! Terminal results of a level attempt.

use serde::{Deserialize, Serialize};

/// Why a level was lost.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LossReason {
    /// The move budget ran out.
    OutOfMoves,
    /// The clock ran out.
    OutOfTime,
}

/// Result of a finished level attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    /// Every goal was met.
    Won { stars: u8 },
    /// A budget ran out first.
    Lost(LossReason),
}

impl GameOutcome {
    /// Check if this outcome is a win.
    #[must_use]
    pub fn is_win(&self) -> bool {
        matches!(self, GameOutcome::Won { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_win() {
        assert!(GameOutcome::Won { stars: 2 }.is_win());
        assert!(!GameOutcome::Lost(LossReason::OutOfTime).is_win());
    }
}
