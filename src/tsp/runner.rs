//! Annealing schedule: sweeps at each temperature, then geometric cooling.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::config::AnnealConfig;
use super::point::Point;
use super::simulation::Simulation;
use super::tour::Tour;
use crate::error::AnnealError;
use crate::random::{rng_from_seed, RandomSource};

/// Snapshot emitted once per temperature level, before cooling.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Progress {
    /// Temperature level index, from 0.
    pub step: usize,
    /// Current tour length after the level's sweeps.
    pub length: f64,
    /// Temperature the level ran at.
    pub temperature: f64,
}

/// Receives progress snapshots. Persisting them is up to the implementor.
pub trait ProgressSink {
    fn record(&mut self, progress: Progress);
}

impl ProgressSink for Vec<Progress> {
    fn record(&mut self, progress: Progress) {
        self.push(progress);
    }
}

/// Discards every snapshot.
impl ProgressSink for () {
    fn record(&mut self, _progress: Progress) {}
}

/// Result of an annealing run.
#[derive(Debug, Clone)]
pub struct AnnealResult {
    /// Shortest tour seen at a level boundary, the starting tour included.
    pub best: Tour,

    /// Length of `best`.
    pub best_length: f64,

    /// Tour held when the run stopped.
    pub final_tour: Tour,

    /// Temperature when the run stopped.
    pub final_temperature: f64,

    /// Temperature levels completed.
    pub steps: usize,

    /// Sweeps completed.
    pub sweeps: usize,

    /// Trial moves attempted.
    pub trials: usize,

    /// Number of accepted moves (including improvements).
    pub accepted_moves: usize,

    /// Number of improving moves.
    pub improving_moves: usize,

    /// Whether cancelled externally.
    pub cancelled: bool,
}

/// Executes a full annealing schedule.
pub struct AnnealRunner;

impl AnnealRunner {
    /// Anneals a tour through `points`, in the given order, and discards
    /// progress snapshots.
    pub fn run(points: Vec<Point>, config: &AnnealConfig) -> Result<AnnealResult, AnnealError> {
        Self::run_with_cancel(points, config, &mut (), None)
    }

    /// Anneals and forwards one [`Progress`] per temperature level to `sink`.
    pub fn run_with_sink<S: ProgressSink + ?Sized>(
        points: Vec<Point>,
        config: &AnnealConfig,
        sink: &mut S,
    ) -> Result<AnnealResult, AnnealError> {
        Self::run_with_cancel(points, config, sink, None)
    }

    /// Anneals with an optional cancellation token, checked between sweeps.
    pub fn run_with_cancel<S: ProgressSink + ?Sized>(
        points: Vec<Point>,
        config: &AnnealConfig,
        sink: &mut S,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<AnnealResult, AnnealError> {
        config.validate()?;
        let rng = rng_from_seed(config.seed);
        let mut sim = Simulation::with_start_temperature(points, rng, config.start_temperature)?;
        Self::drive(&mut sim, config, sink, cancel)
    }

    /// Drives a caller-owned engine through the schedule in `config`.
    ///
    /// `config.seed` and `config.start_temperature` are ignored here: the
    /// engine already carries its generator and temperature.
    pub fn drive<R: RandomSource, S: ProgressSink + ?Sized>(
        sim: &mut Simulation<R>,
        config: &AnnealConfig,
        sink: &mut S,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<AnnealResult, AnnealError> {
        config.validate()?;

        let is_cancelled = || cancel.as_ref().is_some_and(|f| f.load(Ordering::Relaxed));
        let trials_before = sim.trials();
        let accepted_before = sim.accepted_moves();
        let improving_before = sim.improving_moves();

        let mut best = sim.current().clone();
        let mut steps = 0usize;
        let mut sweeps = 0usize;
        let mut cancelled = false;

        log::info!(
            "anneal: start cities={} length={:.3} temperature={:.3} steps={} sweeps_per_step={}",
            sim.num_cities(),
            sim.length(),
            sim.temperature(),
            config.temperature_steps,
            config.sweeps_per_step
        );

        'levels: for step in 0..config.temperature_steps {
            if let Some(min) = config.min_temperature {
                if sim.temperature() <= min {
                    log::debug!(
                        "anneal: reached min_temperature={min} at step={step}"
                    );
                    break;
                }
            }

            for _ in 0..config.sweeps_per_step {
                if is_cancelled() {
                    cancelled = true;
                    break 'levels;
                }
                sim.one_sweep();
                sweeps += 1;
            }

            if sim.length() < best.length() {
                best = sim.current().clone();
            }
            sink.record(Progress {
                step,
                length: sim.length(),
                temperature: sim.temperature(),
            });
            log::debug!(
                "anneal: step={} length={:.3} best={:.3} temperature={:.6} acceptance={:.3}",
                step,
                sim.length(),
                best.length(),
                sim.temperature(),
                sim.acceptance_ratio()
            );
            steps += 1;

            if let Err(err) = sim.cool(config.cooling_factor) {
                log::warn!("anneal: stopping after step={step}: {err}");
                break;
            }
        }

        if sim.length() < best.length() {
            best = sim.current().clone();
        }

        log::info!(
            "anneal: finish steps={} sweeps={} length={:.3} best={:.3} temperature={:.6} cancelled={}",
            steps,
            sweeps,
            sim.length(),
            best.length(),
            sim.temperature(),
            cancelled
        );

        Ok(AnnealResult {
            best_length: best.length(),
            best,
            final_tour: sim.current().clone(),
            final_temperature: sim.temperature(),
            steps,
            sweeps,
            trials: sim.trials() - trials_before,
            accepted_moves: sim.accepted_moves() - accepted_before,
            improving_moves: sim.improving_moves() - improving_before,
            cancelled,
        })
    }
}
