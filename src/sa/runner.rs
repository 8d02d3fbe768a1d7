//! SA execution loop.
//!
//! # Algorithm
//!
//! For each step `k` in `0..N`:
//!
//! 1. Compute `T_k` from the cooling schedule
//! 2. Snapshot the state, perturb it, evaluate the new cost
//! 3. Metropolis criterion: keep the move if `delta <= 0`, otherwise keep
//!    it with probability `exp(-delta / T_k)`; restore the snapshot on
//!    rejection
//! 4. Record a new best snapshot if the current cost beats the best
//!
//! Cancellation is only observed between steps, so a cancelled run never
//! leaves a half-decided move behind.

use super::config::SaConfig;
use super::error::SaError;
use super::types::SaState;
use crate::random::create_rng;
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, trace};

/// Result of a Simulated Annealing run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaResult<S: Clone> {
    /// Snapshot of the best state found.
    pub best: S,

    /// Cost of the best state.
    pub best_cost: f64,

    /// Cost of the state the run started from.
    pub initial_cost: f64,

    /// Number of steps executed.
    pub iterations: usize,

    /// Temperature of the last executed step.
    pub final_temperature: f64,

    /// Number of accepted moves (including improvements).
    pub accepted_moves: usize,

    /// Number of improving moves.
    pub improving_moves: usize,

    /// Whether cancelled externally.
    pub cancelled: bool,

    /// Best cost sampled at each progress update, starting with the
    /// initial cost and ending with the final best.
    pub cost_history: Vec<f64>,
}

/// Executes the Simulated Annealing algorithm.
pub struct SaRunner;

impl SaRunner {
    /// Runs SA on `state`, seeding the RNG from the configuration.
    ///
    /// The state is left at the last accepted configuration, which may be
    /// worse than the returned best.
    pub fn run<S: SaState>(
        state: &mut S,
        config: &SaConfig,
    ) -> Result<SaResult<S::Snapshot>, SaError<S::Error>> {
        Self::run_with_cancel(state, config, None)
    }

    /// Runs SA with an optional cancellation token.
    pub fn run_with_cancel<S: SaState>(
        state: &mut S,
        config: &SaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SaResult<S::Snapshot>, SaError<S::Error>> {
        let mut rng = create_rng(config.seed);
        Self::run_with_rng(state, config, &mut rng, cancel)
    }

    /// Runs SA drawing every random decision from `rng`.
    ///
    /// `config.seed` is ignored.
    pub fn run_with_rng<S: SaState, R: Rng>(
        state: &mut S,
        config: &SaConfig,
        rng: &mut R,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SaResult<S::Snapshot>, SaError<S::Error>> {
        config.validate().map_err(SaError::Config)?;

        let started = Instant::now();
        let steps = config.steps;

        let mut current_cost = state.cost().map_err(SaError::State)?;
        let initial_cost = current_cost;
        let mut best = state.snapshot();
        let mut best_cost = current_cost;

        let mut temperature = config.initial_temperature;
        let mut iterations = 0usize;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;
        let mut cancelled = false;

        let mut progress = Progress::new(steps, config.progress_updates);
        let mut cost_history = vec![best_cost];

        info!(
            event = "anneal_start",
            steps = steps as u64,
            initial_temperature = config.initial_temperature,
            min_temperature = config.min_temperature,
            cooling = ?config.cooling,
            initial_cost = initial_cost,
        );

        for step in 0..steps {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }

            temperature = config.temperature_at(step);

            let previous = state.snapshot();
            state.perturb(rng);
            let new_cost = match state.cost() {
                Ok(cost) => cost,
                Err(err) => {
                    state.restore(previous);
                    return Err(SaError::State(err));
                }
            };
            let delta = new_cost - current_cost;

            // Metropolis acceptance criterion
            let accept = if delta <= 0.0 {
                true
            } else {
                let probability = (-delta / temperature).exp();
                rng.random_range(0.0..1.0) < probability
            };

            if accept {
                current_cost = new_cost;
                accepted_moves += 1;
                progress.accepted += 1;
                if delta < 0.0 {
                    improving_moves += 1;
                    progress.improved += 1;
                }
            } else {
                state.restore(previous);
            }

            if current_cost < best_cost {
                best = state.snapshot();
                best_cost = current_cost;
                trace!(event = "new_best", step = step as u64, best_cost = best_cost);
            }

            iterations += 1;
            progress.trials += 1;

            if progress.is_due(iterations) {
                debug!(
                    event = "anneal_progress",
                    step = iterations as u64,
                    temperature = temperature,
                    current_cost = current_cost,
                    best_cost = best_cost,
                    accept_rate = progress.accept_rate(),
                    improve_rate = progress.improve_rate(),
                );
                cost_history.push(best_cost);
                progress.reset();
            }
        }

        // Final history entry
        if cost_history
            .last()
            .is_none_or(|&last| (last - best_cost).abs() > 1e-15)
        {
            cost_history.push(best_cost);
        }

        info!(
            event = "anneal_end",
            steps = iterations as u64,
            duration_ms = started.elapsed().as_millis() as u64,
            accepted_moves = accepted_moves as u64,
            improving_moves = improving_moves as u64,
            final_temperature = temperature,
            best_cost = best_cost,
            cancelled = cancelled,
        );

        Ok(SaResult {
            best,
            best_cost,
            initial_cost,
            iterations,
            final_temperature: temperature,
            accepted_moves,
            improving_moves,
            cancelled,
            cost_history,
        })
    }
}

/// Per-interval counters behind the progress reports.
struct Progress {
    interval: Option<usize>,
    trials: usize,
    accepted: usize,
    improved: usize,
}

impl Progress {
    fn new(steps: usize, updates: usize) -> Self {
        let interval = (updates > 0 && steps > 0).then(|| (steps / updates).max(1));
        Self {
            interval,
            trials: 0,
            accepted: 0,
            improved: 0,
        }
    }

    fn is_due(&self, iterations: usize) -> bool {
        self.interval
            .is_some_and(|every| iterations.is_multiple_of(every))
    }

    fn accept_rate(&self) -> f64 {
        self.accepted as f64 / self.trials.max(1) as f64
    }

    fn improve_rate(&self) -> f64 {
        self.improved as f64 / self.trials.max(1) as f64
    }

    fn reset(&mut self) {
        self.trials = 0;
        self.accepted = 0;
        self.improved = 0;
    }
}
