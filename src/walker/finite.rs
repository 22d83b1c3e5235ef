//! Metropolis walk over a finite energy spectrum.

use crate::error::AnnealError;
use crate::metropolis;
use crate::random::RandomSource;

/// Finite-temperature Monte Carlo over a fixed list of energy levels.
///
/// Each step proposes one of the other states uniformly and applies the
/// same Metropolis criterion as the tour annealer. Visit counts therefore
/// converge to the Boltzmann distribution, which
/// [`theoretical_frequencies`](Self::theoretical_frequencies) gives in
/// closed form.
///
/// The visit histogram always sums to `1 + steps since the last clear`:
/// the starting state is recorded once, then every step records exactly
/// one visit.
#[derive(Debug, Clone)]
pub struct FiniteTemperatureWalker<R> {
    energies: Vec<f64>,
    visit_counts: Vec<u64>,
    current: usize,
    temperature: f64,
    rng: R,
}

impl<R: RandomSource> FiniteTemperatureWalker<R> {
    /// Starts at a uniformly drawn state with an effectively infinite
    /// temperature (`f64::MAX`), so every move is accepted until
    /// [`restart`](Self::restart) sets a real one.
    ///
    /// # Errors
    ///
    /// [`AnnealError::TooFewStates`] below two levels,
    /// [`AnnealError::NonFiniteEnergy`] for NaN or infinite energies.
    pub fn new(energies: Vec<f64>, mut rng: R) -> Result<Self, AnnealError> {
        if energies.len() < 2 {
            return Err(AnnealError::TooFewStates(energies.len()));
        }
        if let Some((index, &value)) = energies.iter().enumerate().find(|(_, e)| !e.is_finite()) {
            return Err(AnnealError::NonFiniteEnergy { index, value });
        }
        let current = rng.next_int(energies.len());
        let mut visit_counts = vec![0; energies.len()];
        visit_counts[current] += 1;
        Ok(Self {
            energies,
            visit_counts,
            current,
            temperature: f64::MAX,
            rng,
        })
    }

    /// One Metropolis step; records a visit to the resulting state.
    pub fn step(&mut self) {
        let m = self.energies.len();
        let mut candidate = self.current;
        while candidate == self.current {
            candidate = self.rng.next_int(m);
        }
        let delta = self.energies[candidate] - self.energies[self.current];
        if metropolis::accept(delta, self.temperature, &mut self.rng) {
            self.current = candidate;
        }
        self.visit_counts[self.current] += 1;
    }

    /// Runs `steps` steps.
    pub fn run(&mut self, steps: usize) {
        for _ in 0..steps {
            self.step();
        }
    }

    /// Sets a new temperature and moves the walker back to state 0.
    ///
    /// Visit counts are kept; call [`clear_visits`](Self::clear_visits) to
    /// start a fresh histogram at the new temperature.
    ///
    /// # Errors
    ///
    /// [`AnnealError::InvalidTemperature`] unless `temperature` is positive
    /// and finite. The walker is unchanged on error.
    pub fn restart(&mut self, temperature: f64) -> Result<(), AnnealError> {
        if !(temperature.is_finite() && temperature > 0.0) {
            return Err(AnnealError::InvalidTemperature(temperature));
        }
        log::trace!(
            "walker.restart: temperature={temperature} previous={}",
            self.temperature
        );
        self.temperature = temperature;
        self.current = 0;
        Ok(())
    }

    /// Zeroes the histogram and records the current state once.
    pub fn clear_visits(&mut self) {
        self.visit_counts.fill(0);
        self.visit_counts[self.current] += 1;
    }
}

impl<R> FiniteTemperatureWalker<R> {
    /// Fraction of recorded visits per state.
    pub fn empirical_frequencies(&self) -> Vec<f64> {
        let total = self.total_visits() as f64;
        self.visit_counts
            .iter()
            .map(|&c| c as f64 / total)
            .collect()
    }

    /// Boltzmann distribution `exp(-E_i / T) / sum_j exp(-E_j / T)` at the
    /// current temperature.
    pub fn theoretical_frequencies(&self) -> Vec<f64> {
        boltzmann_distribution(&self.energies, self.temperature)
    }

    pub fn energies(&self) -> &[f64] {
        &self.energies
    }

    pub fn visit_counts(&self) -> &[u64] {
        &self.visit_counts
    }

    pub fn total_visits(&self) -> u64 {
        self.visit_counts.iter().sum()
    }

    pub fn current_state(&self) -> usize {
        self.current
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }
}

/// Boltzmann weights of `energies` at `temperature`, normalised to sum to 1.
///
/// Energies are shifted by their minimum before exponentiating so low
/// temperatures do not underflow every weight to zero.
pub fn boltzmann_distribution(energies: &[f64], temperature: f64) -> Vec<f64> {
    let ground = energies.iter().copied().fold(f64::INFINITY, f64::min);
    let weights: Vec<f64> = energies
        .iter()
        .map(|e| (-(e - ground) / temperature).exp())
        .collect();
    let sum: f64 = weights.iter().sum();
    weights.into_iter().map(|w| w / sum).collect()
}
