//! The engine facade.
//!
//! `Engine` owns one level attempt: the board, score state, RNG, refill
//! policy, cascade resolver, and event bus. Hosts drive it with swap
//! requests, `advance` (stepped pacing), `tick`, and pause/resume, and
//! listen on the channels returned by `subscribe`.
//!
//! ## Settling
//!
//! When a cascade settles the engine resets the multiplier, spends one
//! move, then checks in order: win, out of moves, out of time (including
//! time that ran out mid-cascade). `CascadeSettled` is published first and
//! the terminal event, if any, right after it. At most one terminal event
//! is ever published per attempt.

use std::sync::mpsc::Receiver;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::board::{build_stable, Board};
use crate::core::{GameRng, LevelConfig, Pacing, Position, TileColor};
use crate::error::EngineError;
use crate::events::{EngineEvent, EventBus};
use crate::refill::{policy_for, RefillPolicy};
use crate::resolve::{
    stabilize, try_swap, CascadeResolver, CascadeSummary, Phase, ResolutionStatus, ResolveContext,
    SwapResult,
};
use crate::scoring::{GameOutcome, LossReason, ScoreState};

use super::TileSelection;

/// Why a swap request was turned down.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwapRejection {
    /// The positions are not orthogonal neighbors.
    NotAdjacent,
    /// The swap would not create a run; it was reverted.
    NoMatch,
    /// A cascade is still resolving.
    Busy,
    /// The engine is paused.
    Paused,
    /// The level attempt is over.
    GameFinished,
    /// The clock has run out.
    OutOfTime,
}

/// Answer to a swap request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwapOutcome {
    /// The swap was committed and a cascade started.
    Accepted,
    /// Nothing changed (apart from revert animation events).
    Rejected(SwapRejection),
}

impl SwapOutcome {
    /// Check whether the swap was committed.
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, SwapOutcome::Accepted)
    }
}

/// Coarse engine status for HUDs and scene control.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// Accepting input (or resolving a cascade).
    Playing,
    /// Scheduling is frozen.
    Paused,
    /// The attempt ended.
    Finished(GameOutcome),
}

/// A running level.
#[derive(Debug)]
pub struct Engine {
    config: LevelConfig,
    board: Board,
    score: ScoreState,
    rng: GameRng,
    policy: Box<dyn RefillPolicy>,
    resolver: CascadeResolver,
    bus: EventBus,
    selection: TileSelection,
    paused: bool,
    outcome: Option<GameOutcome>,
}

impl Engine {
    /// Start a level with a freshly built, match-free board.
    pub fn new(config: LevelConfig) -> Result<Self, EngineError> {
        config.validate()?;

        let mut rng = GameRng::new(config.seed);
        let board = build_stable(
            config.rows,
            config.columns,
            config.palette(),
            &mut rng,
            config.build_retry_limit,
        )?;

        log::info!(
            "level {} started: {}x{} board, {} colors, {:?} refill",
            config.level,
            config.rows,
            config.columns,
            config.color_count,
            config.policy_kind()
        );
        Ok(Self::assemble(config, board, rng))
    }

    /// Start a level on a supplied board, exactly as given.
    ///
    /// The board's dimensions replace the configured ones. Runs already on
    /// the board are left alone and resolve with the first accepted swap.
    /// Tokens colored outside the level's palette are repainted with the
    /// default color.
    pub fn with_board(
        mut config: LevelConfig,
        mut board: Board,
        rng: GameRng,
    ) -> Result<Self, EngineError> {
        config.rows = board.rows();
        config.columns = board.columns();
        config.validate()?;
        confine_to_palette(&mut board, &config);

        log::info!(
            "level {} started on a supplied {}x{} board",
            config.level,
            config.rows,
            config.columns
        );
        Ok(Self::assemble(config, board, rng))
    }

    /// Start a level on a supplied board after clearing its runs.
    ///
    /// Runs are removed and refilled through the level's refill policy, with
    /// no scoring, until the board is quiet.
    pub fn with_quiet_board(
        config: LevelConfig,
        mut board: Board,
        mut rng: GameRng,
    ) -> Result<Self, EngineError> {
        confine_to_palette(&mut board, &config);
        let policy = policy_for(&config);
        let passes = stabilize(&mut board, policy.as_ref(), &mut rng, config.build_retry_limit)?;
        if passes > 0 {
            log::debug!("supplied board needed {passes} quieting pass(es)");
        }
        Self::with_board(config, board, rng)
    }

    fn assemble(config: LevelConfig, board: Board, rng: GameRng) -> Self {
        Self {
            score: ScoreState::new(&config),
            policy: policy_for(&config),
            resolver: CascadeResolver::with_pass_limit(config.cascade_pass_limit),
            config,
            board,
            rng,
            bus: EventBus::new(),
            selection: TileSelection::new(),
            paused: false,
            outcome: None,
        }
    }

    /// Replace the refill policy chosen from the configuration.
    #[must_use]
    pub fn with_policy(mut self, policy: Box<dyn RefillPolicy>) -> Self {
        self.policy = policy;
        self
    }

    /// Register an event listener.
    pub fn subscribe(&mut self) -> Receiver<EngineEvent> {
        self.bus.subscribe()
    }

    // === Accessors ===

    /// The level configuration.
    #[must_use]
    pub fn config(&self) -> &LevelConfig {
        &self.config
    }

    /// The board.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Score, multiplier, budgets, and goals.
    #[must_use]
    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    /// The resolver's phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.resolver.phase()
    }

    /// The active refill policy.
    #[must_use]
    pub fn policy(&self) -> &dyn RefillPolicy {
        self.policy.as_ref()
    }

    /// How the attempt ended, if it has.
    #[must_use]
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    /// Check whether scheduling is frozen.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Coarse status.
    #[must_use]
    pub fn status(&self) -> GameStatus {
        match self.outcome {
            Some(outcome) => GameStatus::Finished(outcome),
            None if self.paused => GameStatus::Paused,
            None => GameStatus::Playing,
        }
    }

    /// The pending tile selection.
    #[must_use]
    pub fn selection(&self) -> &TileSelection {
        &self.selection
    }

    // === Input ===

    /// Request a swap of the tokens at `a` and `b`.
    ///
    /// With [`Pacing::Immediate`] an accepted swap resolves completely
    /// before this returns. With [`Pacing::Stepped`] the cascade waits for
    /// [`Engine::advance`].
    ///
    /// # Panics
    ///
    /// Panics if either position is outside the board.
    pub fn submit_swap(&mut self, a: Position, b: Position) -> SwapOutcome {
        if let Some(rejection) = self.input_blocker() {
            log::trace!("swap {a} <-> {b} rejected: {rejection:?}");
            return SwapOutcome::Rejected(rejection);
        }

        let result = try_swap(&mut self.board, a, b);
        self.bus
            .publish_all(result.motions().iter().copied().map(EngineEvent::TileMoved));

        match result {
            SwapResult::NotAdjacent => SwapOutcome::Rejected(SwapRejection::NotAdjacent),
            SwapResult::Reverted { .. } => SwapOutcome::Rejected(SwapRejection::NoMatch),
            SwapResult::Committed { .. } => {
                self.score.reset_multiplier();
                self.resolver.begin();
                if self.config.pacing == Pacing::Immediate {
                    self.run_cascade();
                }
                SwapOutcome::Accepted
            }
        }
    }

    /// Register a tile click; a second click on another tile submits a swap.
    pub fn select(&mut self, pos: Position) -> Option<SwapOutcome> {
        let (a, b) = self.selection.click(pos)?;
        Some(self.submit_swap(a, b))
    }

    fn input_blocker(&self) -> Option<SwapRejection> {
        if self.outcome.is_some() {
            Some(SwapRejection::GameFinished)
        } else if self.paused {
            Some(SwapRejection::Paused)
        } else if !self.resolver.is_idle() {
            Some(SwapRejection::Busy)
        } else if self.score.is_out_of_time() {
            Some(SwapRejection::OutOfTime)
        } else {
            None
        }
    }

    // === Scheduling ===

    /// Signal that the current animation finished: run one cascade pass.
    ///
    /// Does nothing while idle or paused. Returns the phase afterwards.
    pub fn advance(&mut self) -> Phase {
        if self.paused || self.resolver.is_idle() {
            return self.resolver.phase();
        }

        let mut ctx = ResolveContext {
            board: &mut self.board,
            score: &mut self.score,
            policy: self.policy.as_ref(),
            rng: &mut self.rng,
            bus: &mut self.bus,
        };
        if let ResolutionStatus::Complete(summary) = self.resolver.step(&mut ctx) {
            self.settle(summary);
        }
        self.resolver.phase()
    }

    /// Advance until the engine is idle again (or paused).
    pub fn advance_until_idle(&mut self) -> Phase {
        while !self.paused && !self.resolver.is_idle() {
            self.advance();
        }
        self.resolver.phase()
    }

    /// Count the clock down.
    ///
    /// Ignored while paused or finished. Running out while idle ends the
    /// attempt at once; running out mid-cascade is handled when it settles.
    pub fn tick(&mut self, elapsed: Duration) {
        if self.paused || self.outcome.is_some() {
            return;
        }

        if self.score.drain_time(elapsed) && self.resolver.is_idle() {
            self.finish(GameOutcome::Lost(LossReason::OutOfTime));
        }
    }

    /// Freeze the countdown and cascade pacing.
    pub fn pause(&mut self) {
        if self.paused || self.outcome.is_some() {
            return;
        }
        self.paused = true;
        self.bus.publish(EngineEvent::Paused);
    }

    /// Unfreeze.
    pub fn resume(&mut self) {
        if !self.paused {
            return;
        }
        self.paused = false;
        self.bus.publish(EngineEvent::Resumed);
    }

    /// Start the level over on a new board from a forked RNG stream.
    pub fn restart(&mut self) -> Result<(), EngineError> {
        let mut rng = self.rng.fork();
        let board = build_stable(
            self.config.rows,
            self.config.columns,
            self.config.palette(),
            &mut rng,
            self.config.build_retry_limit,
        )?;

        self.board = board;
        self.rng = rng;
        self.score = ScoreState::new(&self.config);
        self.resolver = CascadeResolver::with_pass_limit(self.config.cascade_pass_limit);
        self.selection.clear();
        self.paused = false;
        self.outcome = None;
        log::info!("level {} restarted", self.config.level);

        self.bus.publish(EngineEvent::BoardReset);
        self.bus.publish(EngineEvent::ScoreChanged { score: 0, gained: 0 });
        self.bus.publish(EngineEvent::MultiplierChanged { multiplier: 1 });
        self.bus.publish(EngineEvent::MovesLeftChanged {
            moves_left: self.score.moves_left(),
        });
        for &color in self.config.palette().colors() {
            self.bus.publish(EngineEvent::MatchCountChanged { color, count: 0 });
        }
        Ok(())
    }

    fn run_cascade(&mut self) {
        let mut ctx = ResolveContext {
            board: &mut self.board,
            score: &mut self.score,
            policy: self.policy.as_ref(),
            rng: &mut self.rng,
            bus: &mut self.bus,
        };
        let summary = self.resolver.run_to_completion(&mut ctx);
        self.settle(summary);
    }

    fn settle(&mut self, summary: CascadeSummary) {
        let outcome = if self.score.check_win() {
            Some(GameOutcome::Won {
                stars: self.config.stars.stars_for(self.score.score()),
            })
        } else if summary.out_of_moves {
            Some(GameOutcome::Lost(LossReason::OutOfMoves))
        } else if self.score.is_out_of_time() {
            Some(GameOutcome::Lost(LossReason::OutOfTime))
        } else {
            None
        };

        self.bus.publish(EngineEvent::CascadeSettled {
            passes: summary.passes,
        });
        if let Some(outcome) = outcome {
            self.finish(outcome);
        }
    }

    fn finish(&mut self, outcome: GameOutcome) {
        if self.outcome.is_some() {
            return;
        }
        self.outcome = Some(outcome);
        self.selection.clear();

        let event = match outcome {
            GameOutcome::Won { stars } => {
                log::info!(
                    "level {} won with {} points, {stars} star(s)",
                    self.config.level,
                    self.score.score()
                );
                EngineEvent::GameWon {
                    stars,
                    score: self.score.score(),
                }
            }
            GameOutcome::Lost(reason) => {
                log::info!("level {} lost: {reason:?}", self.config.level);
                EngineEvent::GameOver { reason }
            }
        };
        self.bus.publish(event);
    }
}

/// Repaint tokens whose color the level does not use.
fn confine_to_palette(board: &mut Board, config: &LevelConfig) {
    let replacement = TileColor::default();
    for pos in board.repaint_outside(config.palette(), replacement) {
        log::warn!(
            "token at {pos} has a color outside the {}-color palette of {}, using {replacement}",
            config.color_count,
            config.level
        );
    }
}
