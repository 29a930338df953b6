//! The run lifecycle state machine: Idle → Running → Settled.
//!
//! `RunController` owns the single run state for the process: the live
//! arena and token population, the winner record, and the queue of
//! user-visible notices. It drives a cooperative step loop — nothing moves
//! between calls to [`step`](RunController::step) — so contact batches,
//! settlement timers, and perturbations all advance on the same single
//! logical thread and need no synchronization beyond the outcome monitor's
//! one-shot latch.
//!
//! Deferred settlement is data, not a closure: the pending record captures
//! the generation at schedule time, and a record whose generation no longer
//! matches the controller's (because `reset` or `start` intervened) is
//! discarded instead of mutating torn-down state.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use tumble::{ContactPair, RenderHint};

use crate::arena::Arena;
use crate::config::RaffleConfig;
use crate::entry::Entry;
use crate::error::{ConfigError, RaffleError};
use crate::monitor::OutcomeMonitor;
use crate::notice::Notice;
use crate::roster::{spawn_point, TokenSet};
use crate::snapshot::{ParticipantView, RaffleSnapshot, TokenView};

/// Highlight colors applied to the winning token.
const WINNER_FILL: &str = "#FFD93D";
const WINNER_STROKE: &str = "#FFC107";
const WINNER_LINE_WIDTH: f32 = 5.0;

/// Mixing constant for deriving per-run RNG streams from the master seed.
const GENERATION_MIX: u64 = 0x9E37_79B9_7F4A_7C15;

/// The run lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// No run in progress; perturbations are no-ops.
    Idle,
    /// Tokens are live in the arena and the step loop is hot.
    Running,
    /// The run has ended — with a winner, or without one on a timed run.
    Settled,
}

/// Scheduled flip to [`Phase::Settled`], guarded against staleness.
#[derive(Debug, Clone, Copy)]
struct PendingSettle {
    fire_at: u64,
    generation: u64,
}

/// Everything owned by one live run. Dropping it tears down the arena,
/// the world, and any pending settlement in one move.
#[derive(Debug)]
pub(crate) struct Run {
    pub(crate) arena: Arena,
    pub(crate) tokens: TokenSet,
    pub(crate) monitor: OutcomeMonitor,
    pub(crate) entries: Vec<Entry>,
    rng: ChaCha8Rng,
    pub(crate) steps: u64,
    pending_settle: Option<PendingSettle>,
}

/// Owner of the raffle lifecycle.
///
/// # Example
///
/// ```
/// use marblefall_core::{parse_entries, Phase, RaffleConfig, RunController};
///
/// let mut raffle = RunController::new(RaffleConfig::default(), 7).unwrap();
/// assert_eq!(raffle.phase(), Phase::Idle);
///
/// raffle.start(&parse_entries("alice*3")).unwrap();
/// assert_eq!(raffle.phase(), Phase::Running);
/// assert_eq!(raffle.total_tokens(), 3);
///
/// raffle.reset();
/// assert_eq!(raffle.phase(), Phase::Idle);
/// ```
#[derive(Debug)]
pub struct RunController {
    config: RaffleConfig,
    seed: u64,
    /// Bumped on every start and reset; stale deferred work is detected by
    /// comparing against it.
    generation: u64,
    phase: Phase,
    winner: Option<String>,
    run: Option<Run>,
    notices: Vec<Notice>,
}

impl RunController {
    /// Creates an idle controller.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration cannot produce a
    /// playable arena.
    pub fn new(config: RaffleConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            seed,
            generation: 0,
            phase: Phase::Idle,
            winner: None,
            run: None,
            notices: Vec::new(),
        })
    }

    /// Starts a fresh run from `entries`.
    ///
    /// Any prior run is torn down first — arena, world, tokens, and pending
    /// settlement all go with it — then a new arena is built and one token
    /// per unit of weight is spawned above it. Works from any phase.
    ///
    /// # Errors
    ///
    /// [`RaffleError::EmptyRoster`] if `entries` is empty; the current
    /// state is left untouched and an [`Notice::EmptyRoster`] warning is
    /// queued for the user.
    pub fn start(&mut self, entries: &[Entry]) -> Result<(), RaffleError> {
        if entries.is_empty() {
            warn!("start refused: no entries");
            self.notices.push(Notice::EmptyRoster);
            return Err(RaffleError::EmptyRoster);
        }

        self.generation += 1;
        self.winner = None;
        self.run = None; // full teardown before rebuild

        let mut arena = Arena::build(&self.config);
        let mut rng =
            ChaCha8Rng::seed_from_u64(self.seed ^ self.generation.wrapping_mul(GENERATION_MIX));
        let tokens = TokenSet::spawn(arena.world_mut(), entries, &self.config, &mut rng);

        info!(
            generation = self.generation,
            entries = entries.len(),
            tokens = tokens.len(),
            "run started"
        );

        self.run = Some(Run {
            arena,
            tokens,
            monitor: OutcomeMonitor::new(),
            entries: entries.to_vec(),
            rng,
            steps: 0,
            pending_settle: None,
        });
        self.phase = Phase::Running;
        Ok(())
    }

    /// Advances the run by one fixed timestep.
    ///
    /// Steps the physics world, drains the contact batch into the outcome
    /// monitor, and then services deferred settlement and the optional
    /// timed forced stop. No-op outside [`Phase::Running`].
    pub fn step(&mut self) {
        if self.phase != Phase::Running {
            return;
        }
        let Some(run) = self.run.as_mut() else {
            return;
        };

        run.arena.world_mut().step();
        run.steps += 1;
        let contacts = run.arena.world_mut().drain_contacts();

        self.handle_contacts(&contacts);
        self.advance_settlement();
    }

    /// Feeds one contact batch to the outcome monitor and reacts to a
    /// freshly resolved winner: record the name, repaint the token,
    /// announce, and schedule the settle grace period.
    pub(crate) fn handle_contacts(&mut self, contacts: &[ContactPair]) {
        if self.phase != Phase::Running {
            return;
        }
        let Some(run) = self.run.as_mut() else {
            return;
        };

        if let Some(winner) = run.monitor.observe(contacts, &run.arena, &run.tokens) {
            info!(winner = %winner.name, generation = self.generation, "winner decided");
            self.winner = Some(winner.name.clone());
            run.arena.world_mut().set_hint(
                winner.collider,
                RenderHint::new(WINNER_FILL, WINNER_STROKE, WINNER_LINE_WIDTH),
            );
            run.pending_settle = Some(PendingSettle {
                fire_at: run.steps + self.config.settle_grace_ticks,
                generation: self.generation,
            });
            self.notices.push(Notice::Winner(winner.name));
        }
    }

    /// Services the deferred settlement record and the timed forced stop.
    fn advance_settlement(&mut self) {
        let Some(run) = self.run.as_mut() else {
            return;
        };

        if let Some(pending) = run.pending_settle {
            if run.steps >= pending.fire_at {
                run.pending_settle = None;
                if pending.generation == self.generation {
                    debug!(generation = self.generation, "settle grace elapsed");
                    self.phase = Phase::Settled;
                } else {
                    debug!("discarded stale settlement");
                }
            }
            return;
        }

        // Timed variant: force settlement without a winner, reported
        // explicitly rather than swallowed.
        if self.winner.is_none() {
            if let Some(max) = self.config.max_run_ticks {
                if run.steps >= max {
                    warn!(ticks = run.steps, "timed run expired with no winner");
                    self.phase = Phase::Settled;
                    self.notices.push(Notice::NoWinner);
                }
            }
        }
    }

    /// Repositions every token to a fresh spawn point with zero velocity.
    ///
    /// Only allowed in the pre-drop window: a running run on which no step
    /// has been taken yet. Anywhere else this is a silent no-op — no
    /// notice, no error — matching the leniency policy for lifecycle
    /// misuse.
    pub fn shuffle(&mut self) {
        if self.phase != Phase::Running {
            debug!("shuffle ignored outside Running");
            return;
        }
        let Some(run) = self.run.as_mut() else {
            return;
        };
        if run.tokens.is_empty() || run.steps > 0 {
            debug!(steps = run.steps, "shuffle ignored after drop started");
            return;
        }

        for token in run.tokens.iter() {
            let position = spawn_point(&self.config, &mut run.rng);
            run.arena.world_mut().set_position(token.body, position);
            run.arena.world_mut().set_velocity(token.body, glam::Vec2::ZERO);
        }
        self.notices.push(Notice::Shuffled);
    }

    /// Applies a small random impulse to every live token.
    ///
    /// Allowed any time while Running with at least one token; never
    /// touches the winner latch. Silent no-op otherwise.
    pub fn shake(&mut self) {
        if self.phase != Phase::Running {
            debug!("shake ignored outside Running");
            return;
        }
        let Some(run) = self.run.as_mut() else {
            return;
        };
        if run.tokens.is_empty() {
            return;
        }

        let scale = self.config.shake_impulse;
        for token in run.tokens.iter() {
            let impulse = glam::Vec2::new(
                (run.rng.gen::<f32>() - 0.5) * scale,
                (run.rng.gen::<f32>() - 0.5) * scale,
            );
            run.arena.world_mut().apply_impulse(token.body, impulse);
        }
        self.notices.push(Notice::Shaken);
    }

    /// Tears down the run entirely and returns to [`Phase::Idle`].
    ///
    /// The arena, world, tokens, winner record, and any pending settlement
    /// are all discarded; the generation bump additionally invalidates any
    /// deferred work that might still reference the old run.
    pub fn reset(&mut self) {
        debug!(generation = self.generation, "reset");
        self.run = None;
        self.generation += 1;
        self.phase = Phase::Idle;
        self.winner = None;
    }

    /// Drains the queued user-visible notices.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Name of the winner, once decided. Stable for the rest of the run.
    #[must_use]
    pub fn winner_name(&self) -> Option<&str> {
        self.winner.as_deref()
    }

    /// Number of live tokens (zero when idle).
    #[must_use]
    pub fn total_tokens(&self) -> usize {
        self.run.as_ref().map_or(0, |run| run.tokens.len())
    }

    /// Lifecycle generation counter (bumped by every start and reset).
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &RaffleConfig {
        &self.config
    }

    /// Builds a read-only snapshot for the presentation layer.
    ///
    /// The snapshot carries derived state only — phase, winner, the
    /// participant list, and per-token positions and render hints. Nothing
    /// in it can mutate the simulation.
    #[must_use]
    pub fn snapshot(&self) -> RaffleSnapshot {
        let (participants, tokens) = match &self.run {
            Some(run) => {
                let participants = run
                    .entries
                    .iter()
                    .enumerate()
                    .map(|(index, entry)| ParticipantView {
                        name: entry.name.clone(),
                        weight: entry.weight,
                        color_index: index % crate::roster::PALETTE.len(),
                    })
                    .collect();
                let tokens = run
                    .tokens
                    .iter()
                    .filter_map(|token| {
                        let position = run.arena.world().position(token.body)?;
                        Some(TokenView {
                            owner: token.owner.clone(),
                            position,
                            color_index: token.color_index,
                            hint: run.arena.world().hint(token.collider).cloned(),
                        })
                    })
                    .collect();
                (participants, tokens)
            }
            None => (Vec::new(), Vec::new()),
        };

        RaffleSnapshot {
            phase: self.phase,
            winner: self.winner.clone(),
            total_tokens: self.total_tokens(),
            participants,
            tokens,
        }
    }

    /// Test seam: the live run, if any.
    #[cfg(test)]
    pub(crate) fn run(&self) -> Option<&Run> {
        self.run.as_ref()
    }
}
