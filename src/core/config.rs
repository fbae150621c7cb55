//! Level configuration.
//!
//! Hosts configure each level by providing a `LevelConfig`:
//! - Board size and the number of colors in play
//! - Per-color goals, the move budget, and the time limit
//! - Which refill policy runs, either explicitly or keyed by `LevelId`
//! - Spawn probabilities for the weighted-neighbor policy
//! - Bounds on board building and cascade length
//! - The RNG seed and the pacing mode
//!
//! The engine never hardcodes level data; everything flows from here.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::color::{ColorMap, Palette, TileColor, COLOR_COUNT};
use crate::error::ConfigError;

/// Cascade passes refilled by the level's policy unless configured.
pub const DEFAULT_CASCADE_PASS_LIMIT: u32 = 50;

/// Level identifier, used to pick a refill policy when none is set.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LevelId(pub String);

impl LevelId {
    /// Create a new level ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for LevelId {
    fn default() -> Self {
        Self::new("Level1")
    }
}

impl std::fmt::Display for LevelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The interchangeable refill strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RefillPolicyKind {
    /// New tokens fall in; colors lean toward the token below (policy A).
    WeightedNeighbor,
    /// Colors drawn in proportion to the surrounding 8 cells (policy B).
    NeighborhoodMajority,
    /// Existing tokens fall, then the gaps at the top fill uniformly (policy C).
    Gravity,
}

impl RefillPolicyKind {
    /// The policy a level uses when its config does not name one.
    ///
    /// ```
    /// use rust_match3::core::{LevelId, RefillPolicyKind};
    ///
    /// assert_eq!(RefillPolicyKind::for_level(&LevelId::new("Level1")), RefillPolicyKind::WeightedNeighbor);
    /// assert_eq!(RefillPolicyKind::for_level(&LevelId::new("Level2")), RefillPolicyKind::NeighborhoodMajority);
    /// assert_eq!(RefillPolicyKind::for_level(&LevelId::new("Bonus")), RefillPolicyKind::Gravity);
    /// ```
    #[must_use]
    pub fn for_level(level: &LevelId) -> Self {
        match level.as_str() {
            "Level1" => RefillPolicyKind::WeightedNeighbor,
            "Level2" => RefillPolicyKind::NeighborhoodMajority,
            _ => RefillPolicyKind::Gravity,
        }
    }
}

/// How the engine paces multi-step sequences.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pacing {
    /// Every delay collapses to zero: an accepted swap resolves fully
    /// inside `submit_swap`.
    #[default]
    Immediate,
    /// The engine waits in named phases until the host calls `advance()`
    /// (typically when an animation finishes). One cascade pass per call.
    Stepped,
}

/// Score thresholds for the star rating shown on a win.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarThresholds {
    /// Minimum score for two stars.
    pub two: u64,
    /// Minimum score for three stars.
    pub three: u64,
}

impl StarThresholds {
    /// Stars earned for a final score (1 to 3).
    #[must_use]
    pub fn stars_for(&self, score: u64) -> u8 {
        if score >= self.three {
            3
        } else if score >= self.two {
            2
        } else {
            1
        }
    }
}

impl Default for StarThresholds {
    fn default() -> Self {
        Self {
            two: 5_000,
            three: 10_000,
        }
    }
}

/// Complete level configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    /// Level identifier.
    pub level: LevelId,

    /// Board height.
    pub rows: usize,

    /// Board width.
    pub columns: usize,

    /// Number of colors in play (2-5).
    pub color_count: usize,

    /// Match-count goal per color. Only colors in play are checked.
    pub goals: ColorMap<u32>,

    /// Starting move budget.
    pub moves: u32,

    /// Starting time budget.
    pub time_limit: Duration,

    /// Probability that a refilled cell on a vertical run copies the color
    /// below it (policy A).
    pub same_color_chance: f64,

    /// Probability that a refilled cell on a horizontal run copies the color
    /// below it (policy A).
    pub different_color_chance: f64,

    /// Color used when neighborhood-majority refill finds no neighbors.
    pub fallback_color: TileColor,

    /// Explicit refill policy. `None` selects by `level`.
    pub refill_policy: Option<RefillPolicyKind>,

    /// Maximum remove/re-roll rounds when building a match-free board.
    pub build_retry_limit: u32,

    /// Cascade passes refilled by the level's policy. Later passes fill
    /// vacated cells with colors that complete no run.
    pub cascade_pass_limit: u32,

    /// RNG seed.
    pub seed: u64,

    /// Pacing mode.
    pub pacing: Pacing,

    /// Star rating thresholds.
    pub stars: StarThresholds,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            level: LevelId::default(),
            rows: 8,
            columns: 8,
            color_count: COLOR_COUNT,
            goals: ColorMap::with_value(10),
            moves: 20,
            time_limit: Duration::from_secs(120),
            same_color_chance: 0.4,
            different_color_chance: 0.6,
            fallback_color: TileColor::Red,
            refill_policy: None,
            build_retry_limit: 100,
            cascade_pass_limit: DEFAULT_CASCADE_PASS_LIMIT,
            seed: 42,
            pacing: Pacing::Immediate,
            stars: StarThresholds::default(),
        }
    }
}

impl LevelConfig {
    /// Create a configuration for a level with default settings.
    pub fn new(level: impl Into<String>) -> Self {
        Self {
            level: LevelId::new(level),
            ..Self::default()
        }
    }

    /// Set the board size.
    #[must_use]
    pub fn with_size(mut self, rows: usize, columns: usize) -> Self {
        self.rows = rows;
        self.columns = columns;
        self
    }

    /// Set the number of colors in play.
    #[must_use]
    pub fn with_colors(mut self, count: usize) -> Self {
        self.color_count = count;
        self
    }

    /// Set the goal for one color.
    #[must_use]
    pub fn with_goal(mut self, color: TileColor, goal: u32) -> Self {
        self.goals[color] = goal;
        self
    }

    /// Set the goal for a color given by name.
    ///
    /// Unknown names fall back to the default color with a warning.
    #[must_use]
    pub fn with_goal_named(self, color: &str, goal: u32) -> Self {
        self.with_goal(TileColor::from_name_or_default(color), goal)
    }

    /// Set the same goal for every color.
    #[must_use]
    pub fn with_uniform_goal(mut self, goal: u32) -> Self {
        self.goals = ColorMap::with_value(goal);
        self
    }

    /// Set the move budget.
    #[must_use]
    pub fn with_moves(mut self, moves: u32) -> Self {
        self.moves = moves;
        self
    }

    /// Set the time budget.
    #[must_use]
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = limit;
        self
    }

    /// Set the policy A spawn probabilities.
    #[must_use]
    pub fn with_spawn_chances(mut self, same_color: f64, different_color: f64) -> Self {
        self.same_color_chance = same_color;
        self.different_color_chance = different_color;
        self
    }

    /// Set the neighborhood-majority fallback color.
    #[must_use]
    pub fn with_fallback_color(mut self, color: TileColor) -> Self {
        self.fallback_color = color;
        self
    }

    /// Set the fallback color by name, warning on unknown names.
    #[must_use]
    pub fn with_fallback_color_named(self, color: &str) -> Self {
        self.with_fallback_color(TileColor::from_name_or_default(color))
    }

    /// Override the refill policy.
    #[must_use]
    pub fn with_refill_policy(mut self, kind: RefillPolicyKind) -> Self {
        self.refill_policy = Some(kind);
        self
    }

    /// Set the board-build retry cap.
    #[must_use]
    pub fn with_build_retry_limit(mut self, limit: u32) -> Self {
        self.build_retry_limit = limit;
        self
    }

    /// Set the number of cascade passes the refill policy runs before
    /// run-free refill takes over.
    #[must_use]
    pub fn with_cascade_pass_limit(mut self, limit: u32) -> Self {
        self.cascade_pass_limit = limit;
        self
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the pacing mode.
    #[must_use]
    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    /// Set the star thresholds.
    #[must_use]
    pub fn with_stars(mut self, two: u64, three: u64) -> Self {
        self.stars = StarThresholds { two, three };
        self
    }

    /// The colors in play.
    #[must_use]
    pub fn palette(&self) -> Palette {
        Palette::new(self.color_count)
    }

    /// The refill policy this level runs.
    #[must_use]
    pub fn policy_kind(&self) -> RefillPolicyKind {
        self.refill_policy
            .unwrap_or_else(|| RefillPolicyKind::for_level(&self.level))
    }

    /// Check the configuration for values the engine cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.columns == 0 {
            return Err(ConfigError::EmptyBoard {
                rows: self.rows,
                columns: self.columns,
            });
        }

        if !(2..=COLOR_COUNT).contains(&self.color_count) {
            return Err(ConfigError::ColorCount {
                count: self.color_count,
                max: COLOR_COUNT,
            });
        }

        for (name, value) in [
            ("same_color_chance", self.same_color_chance),
            ("different_color_chance", self.different_color_chance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Probability { name, value });
            }
        }

        if !self.palette().contains(self.fallback_color) {
            log::warn!(
                "fallback color {} is not in play for {}, using {}",
                self.fallback_color,
                self.level,
                TileColor::default()
            );
        }

        Ok(())
    }

    /// The fallback color, replaced by the default when it is not in play.
    #[must_use]
    pub fn effective_fallback_color(&self) -> TileColor {
        if self.palette().contains(self.fallback_color) {
            self.fallback_color
        } else {
            TileColor::default()
        }
    }
}
