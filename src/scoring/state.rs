//! Score, multiplier, budgets, and per-color goals.
//!
//! ## Rules
//!
//! - `add_score(n)` adds `n * 100 * multiplier`; called once per cascade
//!   pass with that pass's distinct removed-token count
//! - `record_color_matches(color, n)` adds `n / 3` match units (floor)
//! - the multiplier starts at 1, grows by one per pass, and resets to 1
//!   when a swap is accepted and again after the swap fully resolves
//! - `moves_left` and `time_left` saturate at zero

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::board::MIN_RUN;
use crate::core::{ColorMap, LevelConfig, Palette, TileColor};

/// Points per removed token at multiplier 1.
pub const POINTS_PER_TOKEN: u64 = 100;

/// Per-level scoring and goal state.
///
/// Created once per level and reset on restart; outlives any single swap.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreState {
    score: u64,
    multiplier: u32,
    moves_left: u32,
    time_left: Duration,
    match_counts: ColorMap<u32>,
    goals: ColorMap<u32>,
    palette: Palette,
}

impl ScoreState {
    /// Fresh state for a level.
    #[must_use]
    pub fn new(config: &LevelConfig) -> Self {
        Self {
            score: 0,
            multiplier: 1,
            moves_left: config.moves,
            time_left: config.time_limit,
            match_counts: ColorMap::default(),
            goals: config.goals.clone(),
            palette: config.palette(),
        }
    }

    // === Accessors ===

    /// Current score.
    #[must_use]
    pub fn score(&self) -> u64 {
        self.score
    }

    /// Current multiplier (always at least 1).
    #[must_use]
    pub fn multiplier(&self) -> u32 {
        self.multiplier
    }

    /// Remaining moves.
    #[must_use]
    pub fn moves_left(&self) -> u32 {
        self.moves_left
    }

    /// Remaining time.
    #[must_use]
    pub fn time_left(&self) -> Duration {
        self.time_left
    }

    /// Match units collected for a color.
    #[must_use]
    pub fn match_count(&self, color: TileColor) -> u32 {
        self.match_counts[color]
    }

    /// Goal for a color.
    #[must_use]
    pub fn goal(&self, color: TileColor) -> u32 {
        self.goals[color]
    }

    /// All match counts.
    #[must_use]
    pub fn match_counts(&self) -> &ColorMap<u32> {
        &self.match_counts
    }

    // === Scoring ===

    /// Add points for `matched` removed tokens at the current multiplier.
    ///
    /// Returns the points gained.
    pub fn add_score(&mut self, matched: usize) -> u64 {
        let gained = matched as u64 * POINTS_PER_TOKEN * u64::from(self.multiplier);
        self.score += gained;
        gained
    }

    /// Credit `removed` tokens of one color as `removed / 3` match units.
    ///
    /// Returns the units added.
    pub fn record_color_matches(&mut self, color: TileColor, removed: usize) -> u32 {
        let units = (removed / MIN_RUN) as u32;
        self.match_counts[color] += units;
        units
    }

    /// Grow the multiplier by one.
    pub fn increase_multiplier(&mut self) {
        self.multiplier += 1;
    }

    /// Set the multiplier back to 1.
    pub fn reset_multiplier(&mut self) {
        self.multiplier = 1;
    }

    /// Check whether every color in play has reached its goal.
    #[must_use]
    pub fn check_win(&self) -> bool {
        self.palette
            .colors()
            .iter()
            .all(|&c| self.match_counts[c] >= self.goals[c])
    }

    // === Budgets ===

    /// Spend one move. Returns `true` when the budget is exhausted.
    pub fn use_move(&mut self) -> bool {
        self.moves_left = self.moves_left.saturating_sub(1);
        self.moves_left == 0
    }

    /// Check whether the move budget is exhausted.
    #[must_use]
    pub fn is_out_of_moves(&self) -> bool {
        self.moves_left == 0
    }

    /// Count the clock down. Returns `true` when time runs out.
    pub fn drain_time(&mut self, elapsed: Duration) -> bool {
        self.time_left = self.time_left.saturating_sub(elapsed);
        self.time_left.is_zero()
    }

    /// Check whether the time budget is exhausted.
    #[must_use]
    pub fn is_out_of_time(&self) -> bool {
        self.time_left.is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> ScoreState {
        ScoreState::new(&LevelConfig::default().with_moves(3).with_uniform_goal(3))
    }

    #[test]
    fn test_new() {
        let s = state();
        assert_eq!(s.score(), 0);
        assert_eq!(s.multiplier(), 1);
        assert_eq!(s.moves_left(), 3);
        assert_eq!(s.time_left(), Duration::from_secs(120));
        assert_eq!(s.match_count(TileColor::Red), 0);
        assert_eq!(s.goal(TileColor::Red), 3);
    }

    #[test]
    fn test_score_arithmetic() {
        let mut s = state();
        s.increase_multiplier();
        assert_eq!(s.multiplier(), 2);

        assert_eq!(s.add_score(6), 1200);
        assert_eq!(s.record_color_matches(TileColor::Blue, 6), 2);
        assert_eq!(s.score(), 1200);
        assert_eq!(s.match_count(TileColor::Blue), 2);
    }

    #[test]
    fn test_color_matches_floor() {
        let mut s = state();
        assert_eq!(s.record_color_matches(TileColor::Red, 2), 0);
        assert_eq!(s.record_color_matches(TileColor::Red, 4), 1);
        assert_eq!(s.record_color_matches(TileColor::Red, 5), 1);
        assert_eq!(s.match_count(TileColor::Red), 2);
    }

    #[test]
    fn test_reset_multiplier() {
        let mut s = state();
        s.increase_multiplier();
        s.increase_multiplier();
        s.reset_multiplier();
        assert_eq!(s.multiplier(), 1);
    }

    #[test]
    fn test_win_becomes_true_and_stays_true() {
        let mut s = state();
        assert!(!s.check_win());

        for color in TileColor::ALL {
            assert!(!s.check_win());
            s.record_color_matches(color, 9);
        }
        assert!(s.check_win());

        s.record_color_matches(TileColor::Green, 3);
        s.add_score(3);
        s.use_move();
        assert!(s.check_win());
    }

    #[test]
    fn test_win_ignores_colors_out_of_play() {
        let config = LevelConfig::default().with_colors(2).with_uniform_goal(1);
        let mut s = ScoreState::new(&config);
        s.record_color_matches(TileColor::Red, 3);
        s.record_color_matches(TileColor::Blue, 3);
        assert!(s.check_win());
    }

    #[test]
    fn test_moves_saturate() {
        let mut s = state();
        assert!(!s.use_move());
        assert!(!s.use_move());
        assert!(s.use_move());
        assert!(s.use_move());
        assert_eq!(s.moves_left(), 0);
        assert!(s.is_out_of_moves());
    }

    #[test]
    fn test_time_drains() {
        let mut s = state();
        assert!(!s.drain_time(Duration::from_secs(100)));
        assert_eq!(s.time_left(), Duration::from_secs(20));
        assert!(s.drain_time(Duration::from_secs(25)));
        assert!(s.is_out_of_time());
        assert_eq!(s.time_left(), Duration::ZERO);
    }
}
