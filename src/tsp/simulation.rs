//! The annealing engine: a current tour at a temperature, driven one
//! Metropolis trial at a time.

use super::config::StartTemperature;
use super::point::{Bounds, Point};
use super::tour::Tour;
use crate::error::AnnealError;
use crate::metropolis;
use crate::random::RandomSource;

/// Simulated annealing over tours with segment-reversal moves.
///
/// Holds the active tour, an untouched copy of the starting tour, and the
/// temperature. The random source is injected at construction; pass
/// `&mut rng` to share one generator with other components.
///
/// Not thread-safe. Callers advance it with [`one_trial`](Self::one_trial)
/// or [`one_sweep`](Self::one_sweep) and lower the temperature with
/// [`cool`](Self::cool) at whatever cadence they like.
#[derive(Debug, Clone)]
pub struct Simulation<R> {
    current: Tour,
    initial: Tour,
    temperature: f64,
    start: StartTemperature,
    rng: R,
    trials: usize,
    accepted_moves: usize,
    improving_moves: usize,
}

impl<R: RandomSource> Simulation<R> {
    /// Builds an engine over `points` starting at `n * max(width, height)`.
    ///
    /// # Errors
    ///
    /// [`AnnealError::TooFewCities`] below three points, and
    /// [`AnnealError::InvalidTemperature`] when every point coincides along
    /// both axes (zero extent).
    pub fn new(points: Vec<Point>, rng: R) -> Result<Self, AnnealError> {
        Self::with_start_temperature(points, rng, StartTemperature::default())
    }

    /// Builds an engine with an explicit start-temperature rule.
    pub fn with_start_temperature(
        points: Vec<Point>,
        rng: R,
        start: StartTemperature,
    ) -> Result<Self, AnnealError> {
        let initial = Tour::new(points)?;
        let temperature = checked_temperature(start.for_tour(&initial))?;
        let current = initial.clone();
        Ok(Self {
            current,
            initial,
            temperature,
            start,
            rng,
            trials: 0,
            accepted_moves: 0,
            improving_moves: 0,
        })
    }

    /// Runs `n` trials (one per city) and returns the resulting length.
    pub fn one_sweep(&mut self) -> f64 {
        for _ in 0..self.current.num_cities() {
            self.one_trial();
        }
        self.current.length()
    }

    /// Proposes one segment reversal and applies the Metropolis criterion.
    ///
    /// Returns whether the candidate replaced the current tour.
    pub fn one_trial(&mut self) -> bool {
        let candidate = self.current.propose(&mut self.rng);
        let delta = candidate.length() - self.current.length();
        self.trials += 1;
        if delta < 0.0 {
            self.improving_moves += 1;
        }
        if !metropolis::accept(delta, self.temperature, &mut self.rng) {
            return false;
        }
        self.current = candidate;
        // resync the cache so incremental rounding never accumulates
        self.current.evaluate_length();
        self.accepted_moves += 1;
        true
    }

    /// Multiplies the temperature by `factor` and returns the new value.
    ///
    /// # Errors
    ///
    /// [`AnnealError::InvalidCoolingFactor`] unless `0 < factor < 1`;
    /// [`AnnealError::TemperatureUnderflow`] when the product would no
    /// longer be a positive normal float. The temperature is unchanged on
    /// error.
    pub fn cool(&mut self, factor: f64) -> Result<f64, AnnealError> {
        if !(factor > 0.0 && factor < 1.0) {
            return Err(AnnealError::InvalidCoolingFactor(factor));
        }
        let next = self.temperature * factor;
        if !next.is_normal() {
            return Err(AnnealError::TemperatureUnderflow {
                temperature: self.temperature,
                factor,
            });
        }
        self.temperature = next;
        Ok(next)
    }

    /// Restores the starting tour and temperature, and clears the move
    /// counters.
    pub fn reinitialize(&mut self) {
        self.current = self.initial.clone();
        self.current.evaluate_length();
        // construction already validated this rule against the same bounds
        self.temperature = self.start.for_tour(&self.current);
        self.trials = 0;
        self.accepted_moves = 0;
        self.improving_moves = 0;
        log::debug!(
            "anneal.reinitialize: length={:.3} temperature={:.3}",
            self.current.length(),
            self.temperature
        );
    }
}

impl<R> Simulation<R> {
    pub fn current(&self) -> &Tour {
        &self.current
    }

    pub fn initial(&self) -> &Tour {
        &self.initial
    }

    /// Cached length of the current tour.
    pub fn length(&self) -> f64 {
        self.current.length()
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn start_temperature(&self) -> StartTemperature {
        self.start
    }

    pub fn num_cities(&self) -> usize {
        self.current.num_cities()
    }

    pub fn bounds(&self) -> Bounds {
        self.current.bounds()
    }

    /// Trials since construction or the last reinitialization.
    pub fn trials(&self) -> usize {
        self.trials
    }

    /// Accepted trials, improving ones included.
    pub fn accepted_moves(&self) -> usize {
        self.accepted_moves
    }

    /// Trials whose candidate was strictly shorter.
    pub fn improving_moves(&self) -> usize {
        self.improving_moves
    }

    /// Fraction of trials accepted so far, `0` before the first trial.
    pub fn acceptance_ratio(&self) -> f64 {
        if self.trials == 0 {
            0.0
        } else {
            self.accepted_moves as f64 / self.trials as f64
        }
    }

    pub fn rng(&self) -> &R {
        &self.rng
    }
}

fn checked_temperature(t: f64) -> Result<f64, AnnealError> {
    if t.is_finite() && t > 0.0 {
        Ok(t)
    } else {
        Err(AnnealError::InvalidTemperature(t))
    }
}
