//! Finite-temperature Monte Carlo over a discrete energy spectrum.
//!
//! A small model that runs the same Metropolis kernel as the tour annealer
//! over a handful of states, where the equilibrium distribution is known
//! exactly. Used to check the acceptance rule against Boltzmann
//! frequencies and to study how those frequencies depend on temperature.

mod finite;
mod scan;

pub use finite::{boltzmann_distribution, FiniteTemperatureWalker};
pub use scan::{doubling_temperatures, temperature_scan, ScanPoint};
