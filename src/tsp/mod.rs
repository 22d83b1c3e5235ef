//! Simulated annealing for the Travelling Salesman Problem.
//!
//! A tour is a cyclic ordering of integer-grid cities. Each trial move
//! reverses a random segment (the 2-opt move restricted to segments that
//! leave city 0 in place), its length is derived incrementally from the
//! two boundary edges, and the Metropolis criterion decides whether it
//! replaces the current tour. A sweep is one trial per city; temperature
//! falls geometrically between batches of sweeps.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Cerny (1985), "Thermodynamical Approach to the Travelling Salesman Problem"
//! - Lin (1965), "Computer Solutions of the Traveling Salesman Problem"

mod config;
mod point;
mod runner;
mod simulation;
mod tour;

pub use config::{AnnealConfig, StartTemperature};
pub use point::{Bounds, Point};
pub use runner::{AnnealResult, AnnealRunner, Progress, ProgressSink};
pub use simulation::Simulation;
pub use tour::{cycle_length, Tour};
