//! Temperature dependence of the walker's equilibrium frequencies.

use super::finite::FiniteTemperatureWalker;
use crate::error::AnnealError;
use crate::random::RandomSource;

/// Frequencies measured at one temperature.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScanPoint {
    pub temperature: f64,
    /// Visit frequencies of the walk at this temperature.
    pub empirical: Vec<f64>,
    /// Boltzmann frequencies at this temperature.
    pub theoretical: Vec<f64>,
}

impl ScanPoint {
    /// Largest absolute gap between measured and Boltzmann frequencies.
    pub fn max_deviation(&self) -> f64 {
        self.empirical
            .iter()
            .zip(&self.theoretical)
            .map(|(e, t)| (e - t).abs())
            .fold(0.0, f64::max)
    }
}

/// `from, 2*from, 4*from, ...` up to and including `to`.
///
/// Empty unless both bounds are finite and `from` is positive.
pub fn doubling_temperatures(from: f64, to: f64) -> Vec<f64> {
    let mut temperatures = Vec::new();
    if !(from.is_finite() && from > 0.0 && to.is_finite()) {
        return temperatures;
    }
    let mut t = from;
    while t.is_finite() && t <= to {
        temperatures.push(t);
        t *= 2.0;
    }
    temperatures
}

/// Runs one walker through `temperatures` in order.
///
/// At each temperature the walker restarts from state 0, its histogram is
/// cleared, and it takes `steps` steps before the frequencies are read.
pub fn temperature_scan<R: RandomSource>(
    energies: Vec<f64>,
    temperatures: &[f64],
    steps: usize,
    rng: R,
) -> Result<Vec<ScanPoint>, AnnealError> {
    let mut walker = FiniteTemperatureWalker::new(energies, rng)?;
    let mut points = Vec::with_capacity(temperatures.len());
    for &temperature in temperatures {
        walker.restart(temperature)?;
        walker.clear_visits();
        walker.run(steps);
        let point = ScanPoint {
            temperature,
            empirical: walker.empirical_frequencies(),
            theoretical: walker.theoretical_frequencies(),
        };
        log::debug!(
            "walker.scan: temperature={temperature} deviation={:.4}",
            point.max_deviation()
        );
        points.push(point);
    }
    Ok(points)
}
