//! Annealing schedule configuration and start-temperature heuristics.

use std::str::FromStr;

use super::tour::Tour;
use crate::error::AnnealError;

/// How the starting temperature is derived from the initial tour.
///
/// The same rule is applied on construction and on
/// [`Simulation::reinitialize`](super::Simulation::reinitialize).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StartTemperature {
    /// `n * max(width, height)` of the bounding box.
    ///
    /// A generous upper bound: almost every early move is accepted.
    #[default]
    ScaledExtent,

    /// `max(width, height)` of the bounding box.
    Extent,

    /// An explicit temperature.
    Fixed(f64),
}

impl StartTemperature {
    /// Temperature this rule assigns to `tour`. Not validated.
    pub fn for_tour(&self, tour: &Tour) -> f64 {
        match *self {
            StartTemperature::ScaledExtent => tour.num_cities() as f64 * tour.bounds().extent(),
            StartTemperature::Extent => tour.bounds().extent(),
            StartTemperature::Fixed(t) => t,
        }
    }
}

/// Parses `scaled-extent`, `extent`, or a positive temperature.
impl FromStr for StartTemperature {
    type Err = AnnealError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "scaled-extent" => Ok(StartTemperature::ScaledExtent),
            "extent" => Ok(StartTemperature::Extent),
            other => {
                let t: f64 = other.parse().map_err(|_| {
                    AnnealError::InvalidConfig(format!(
                        "start temperature must be `scaled-extent`, `extent` or a number, got `{other}`"
                    ))
                })?;
                if t.is_finite() && t > 0.0 {
                    Ok(StartTemperature::Fixed(t))
                } else {
                    Err(AnnealError::InvalidTemperature(t))
                }
            }
        }
    }
}

/// Configuration for a full annealing run.
///
/// # Examples
///
/// ```
/// use u_anneal::tsp::{AnnealConfig, StartTemperature};
///
/// let config = AnnealConfig::default()
///     .with_temperature_steps(50)
///     .with_sweeps_per_step(200)
///     .with_cooling_factor(0.95)
///     .with_start_temperature(StartTemperature::Extent)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnnealConfig {
    /// Number of temperature levels. One progress record is emitted per level.
    pub temperature_steps: usize,

    /// Sweeps run at each temperature level. A sweep is `n` trial moves.
    pub sweeps_per_step: usize,

    /// Geometric cooling factor in (0, 1): `T_{k+1} = factor * T_k`.
    pub cooling_factor: f64,

    /// Stop once the temperature is at or below this value.
    pub min_temperature: Option<f64>,

    /// Starting temperature rule.
    pub start_temperature: StartTemperature,

    /// Random seed for reproducibility. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for AnnealConfig {
    fn default() -> Self {
        Self {
            temperature_steps: 200,
            sweeps_per_step: 1000,
            cooling_factor: 0.9,
            min_temperature: None,
            start_temperature: StartTemperature::default(),
            seed: Some(48),
        }
    }
}

impl AnnealConfig {
    pub fn with_temperature_steps(mut self, n: usize) -> Self {
        self.temperature_steps = n;
        self
    }

    pub fn with_sweeps_per_step(mut self, n: usize) -> Self {
        self.sweeps_per_step = n;
        self
    }

    pub fn with_cooling_factor(mut self, factor: f64) -> Self {
        self.cooling_factor = factor;
        self
    }

    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = Some(t);
        self
    }

    pub fn with_start_temperature(mut self, start: StartTemperature) -> Self {
        self.start_temperature = start;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Seeds from OS entropy.
    pub fn without_seed(mut self) -> Self {
        self.seed = None;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), AnnealError> {
        if self.temperature_steps == 0 {
            return Err(AnnealError::InvalidConfig(
                "temperature_steps must be at least 1".into(),
            ));
        }
        if self.sweeps_per_step == 0 {
            return Err(AnnealError::InvalidConfig(
                "sweeps_per_step must be at least 1".into(),
            ));
        }
        if !(self.cooling_factor > 0.0 && self.cooling_factor < 1.0) {
            return Err(AnnealError::InvalidCoolingFactor(self.cooling_factor));
        }
        if let Some(t) = self.min_temperature {
            if !(t.is_finite() && t > 0.0) {
                return Err(AnnealError::InvalidConfig(format!(
                    "min_temperature must be positive and finite, got {t}"
                )));
            }
        }
        if let StartTemperature::Fixed(t) = self.start_temperature {
            if !(t.is_finite() && t > 0.0) {
                return Err(AnnealError::InvalidTemperature(t));
            }
        }
        Ok(())
    }
}
