//! Error type shared by every module of the crate.

use std::path::PathBuf;

use thiserror::Error;

/// Failures raised while building or configuring an annealing run.
///
/// Step operations never fail once their owner is constructed; every
/// variant here comes from construction, configuration, or I/O.
#[derive(Debug, Error)]
pub enum AnnealError {
    /// A tour needs at least three cities for a segment reversal to exist.
    #[error("a tour needs at least 3 cities, got {0}")]
    TooFewCities(usize),

    /// Temperature was zero, negative, or not finite.
    #[error("temperature must be positive and finite, got {0}")]
    InvalidTemperature(f64),

    /// Cooling factor outside the open interval (0, 1).
    #[error("cooling factor must be in (0, 1), got {0}")]
    InvalidCoolingFactor(f64),

    /// Cooling would leave the temperature at zero or subnormal.
    #[error("cooling {temperature} by {factor} underflows the temperature")]
    TemperatureUnderflow {
        /// Temperature before the rejected cooling step.
        temperature: f64,
        /// Factor that was requested.
        factor: f64,
    },

    /// Cut points that do not describe a reversible segment.
    #[error("segment [{p}, {q}] is not a valid reversal for {n} cities")]
    InvalidSegment {
        /// First cut index.
        p: usize,
        /// Last cut index.
        q: usize,
        /// Number of cities in the tour.
        n: usize,
    },

    /// The walker needs at least two states to move between.
    #[error("a walker needs at least 2 states, got {0}")]
    TooFewStates(usize),

    /// An energy level is NaN or infinite.
    #[error("energy level {index} is not finite: {value}")]
    NonFiniteEnergy {
        /// Index of the offending state.
        index: usize,
        /// Its energy.
        value: f64,
    },

    /// Any other configuration value out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The point source could not be read.
    #[error("failed to read point source {}: {source}", .path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Writing a result table failed.
    #[error(transparent)]
    Csv(#[from] csv::Error),
}
