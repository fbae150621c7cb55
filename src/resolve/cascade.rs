//! The cascade state machine.
//!
//! ## Phases
//!
//! ```text
//! Idle --begin--> AwaitingSwapOutcome --step--> Resolving { pass } --step--> ... --> Idle
//! ```
//!
//! `AwaitingSwapOutcome` is the swap animation; `Resolving` waits between
//! passes. Each call to [`CascadeResolver::step`] runs exactly one pass:
//!
//! 1. remove every matched token (distinct positions only)
//! 2. refill through the active policy, or with run-free colors once the
//!    cascade has run past its pass limit
//! 3. add `removed * 100 * multiplier` to the score, credit per-color match
//!    units, then grow the multiplier
//! 4. rescan; with no runs left the cascade settles
//!
//! Settling resets the multiplier and spends exactly one move, however many
//! passes ran. Hosts that do not animate call
//! [`CascadeResolver::run_to_completion`].
//!
//! A policy biased toward the colors it just removed can rebuild the same
//! run forever. The pass limit bounds that: past it, every vacated cell gets
//! a color that completes no run, so the next rescan comes back clean
//! whenever the palette leaves each cell a safe color.

use serde::{Deserialize, Serialize};

use crate::board::{find_matches, Board, MatchSet};
use crate::core::{ColorMap, RandomSource, DEFAULT_CASCADE_PASS_LIMIT};
use crate::error::BuildError;
use crate::events::{EngineEvent, EventBus};
use crate::refill::{fill_without_runs, RefillContext, RefillPolicy};
use crate::scoring::ScoreState;

/// Where the resolver is in its cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Ready for a new swap.
    #[default]
    Idle,
    /// A swap was committed; its animation has not finished.
    AwaitingSwapOutcome,
    /// Between cascade passes. `pass` passes have run so far.
    Resolving { pass: u32 },
}

/// Totals for one fully resolved swap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeSummary {
    /// Passes run.
    pub passes: u32,
    /// Tokens removed across all passes.
    pub removed: usize,
    /// Points gained across all passes.
    pub gained: u64,
    /// Whether settling spent the last move.
    pub out_of_moves: bool,
}

/// Status returned by [`CascadeResolver::step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolutionStatus {
    /// More passes are pending.
    Processing,
    /// The cascade settled and the resolver is idle.
    Complete(CascadeSummary),
}

/// Everything one cascade pass mutates.
///
/// The host owns these; the resolver only borrows them for a step.
pub struct ResolveContext<'a> {
    pub board: &'a mut Board,
    pub score: &'a mut ScoreState,
    pub policy: &'a dyn RefillPolicy,
    pub rng: &'a mut dyn RandomSource,
    pub bus: &'a mut EventBus,
}

/// Drives remove, refill, rescan until the board is quiet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CascadeResolver {
    phase: Phase,
    summary: CascadeSummary,
    pass_limit: u32,
}

impl Default for CascadeResolver {
    fn default() -> Self {
        Self::with_pass_limit(DEFAULT_CASCADE_PASS_LIMIT)
    }
}

impl CascadeResolver {
    /// Create an idle resolver.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an idle resolver whose policy refills at most `pass_limit`
    /// passes of one cascade.
    #[must_use]
    pub fn with_pass_limit(pass_limit: u32) -> Self {
        Self {
            phase: Phase::Idle,
            summary: CascadeSummary::default(),
            pass_limit,
        }
    }

    /// Passes the refill policy runs before run-free refill takes over.
    #[must_use]
    pub fn pass_limit(&self) -> u32 {
        self.pass_limit
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Check whether a new swap may start.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.phase == Phase::Idle
    }

    /// Start resolving a committed swap.
    ///
    /// # Panics
    ///
    /// Panics if a cascade is already running.
    pub fn begin(&mut self) {
        assert!(self.is_idle(), "cascade started while {:?}", self.phase);
        self.phase = Phase::AwaitingSwapOutcome;
        self.summary = CascadeSummary::default();
    }

    /// Run one pass, or settle if nothing matches.
    ///
    /// Stepping an idle resolver is a no-op that reports an empty summary.
    pub fn step(&mut self, ctx: &mut ResolveContext<'_>) -> ResolutionStatus {
        let pass = match self.phase {
            Phase::Idle => return ResolutionStatus::Complete(CascadeSummary::default()),
            Phase::AwaitingSwapOutcome => 0,
            Phase::Resolving { pass } => pass,
        };

        let matches = find_matches(ctx.board);
        if !matches.has_matches() {
            return self.settle(ctx);
        }

        self.run_pass(ctx, &matches, pass + 1);

        if find_matches(ctx.board).has_matches() {
            self.phase = Phase::Resolving { pass: pass + 1 };
            ResolutionStatus::Processing
        } else {
            self.settle(ctx)
        }
    }

    /// Step until the cascade settles.
    pub fn run_to_completion(&mut self, ctx: &mut ResolveContext<'_>) -> CascadeSummary {
        loop {
            if let ResolutionStatus::Complete(summary) = self.step(ctx) {
                return summary;
            }
        }
    }

    fn run_pass(&mut self, ctx: &mut ResolveContext<'_>, matches: &MatchSet, pass: u32) {
        let positions = matches.positions();
        let removed = remove_matched(ctx.board, matches);
        ctx.bus.publish(EngineEvent::TilesRemoved {
            positions: positions.clone(),
        });

        let refill = RefillContext::from_matches(matches);
        let motions = if pass > self.pass_limit {
            if pass == self.pass_limit.saturating_add(1) {
                log::warn!(
                    "cascade reached {} pass(es), refilling without runs",
                    self.pass_limit
                );
            }
            fill_without_runs(ctx.board, &refill, ctx.policy.palette(), ctx.rng)
        } else {
            ctx.policy.refill(ctx.board, &refill, ctx.rng)
        };
        debug_assert!(ctx.board.is_full(), "refill left empty cells");
        ctx.bus.publish_all(motions.into_iter().map(EngineEvent::TileMoved));

        let gained = ctx.score.add_score(positions.len());
        ctx.bus.publish(EngineEvent::ScoreChanged {
            score: ctx.score.score(),
            gained,
        });

        for (color, &count) in removed.iter() {
            if ctx.score.record_color_matches(color, count) > 0 {
                ctx.bus.publish(EngineEvent::MatchCountChanged {
                    color,
                    count: ctx.score.match_count(color),
                });
            }
        }

        ctx.score.increase_multiplier();
        ctx.bus.publish(EngineEvent::MultiplierChanged {
            multiplier: ctx.score.multiplier(),
        });

        log::debug!(
            "pass {pass}: removed {} token(s), +{gained} (score {}), multiplier now {}",
            positions.len(),
            ctx.score.score(),
            ctx.score.multiplier()
        );

        self.summary.passes = pass;
        self.summary.removed += positions.len();
        self.summary.gained += gained;
    }

    fn settle(&mut self, ctx: &mut ResolveContext<'_>) -> ResolutionStatus {
        if ctx.score.multiplier() != 1 {
            ctx.score.reset_multiplier();
            ctx.bus.publish(EngineEvent::MultiplierChanged { multiplier: 1 });
        }

        self.summary.out_of_moves = ctx.score.use_move();
        ctx.bus.publish(EngineEvent::MovesLeftChanged {
            moves_left: ctx.score.moves_left(),
        });

        self.phase = Phase::Idle;
        log::debug!(
            "cascade settled after {} pass(es), {} move(s) left",
            self.summary.passes,
            ctx.score.moves_left()
        );
        ResolutionStatus::Complete(std::mem::take(&mut self.summary))
    }
}

/// Empty every matched cell. Returns removed-token counts per color.
fn remove_matched(board: &mut Board, matches: &MatchSet) -> ColorMap<usize> {
    let mut removed = ColorMap::default();
    for pos in matches.positions() {
        if let Some(token) = board.take(pos) {
            removed[token.color] += 1;
        }
    }
    removed
}

/// Run remove and refill until `board` has no runs, with no scoring.
///
/// Used to quiet a board supplied from outside before play starts. Returns
/// the number of passes run.
pub fn stabilize(
    board: &mut Board,
    policy: &dyn RefillPolicy,
    rng: &mut dyn RandomSource,
    pass_limit: u32,
) -> Result<u32, BuildError> {
    let mut passes = 0;

    loop {
        let matches = find_matches(board);
        if !matches.has_matches() {
            return Ok(passes);
        }

        if passes >= pass_limit {
            return Err(BuildError::Unstable {
                rows: board.rows(),
                columns: board.columns(),
                attempts: passes,
                remaining: matches.positions().len(),
            });
        }

        remove_matched(board, &matches);
        policy.refill(board, &RefillContext::from_matches(&matches), rng);
        passes += 1;
    }
}
