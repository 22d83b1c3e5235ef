//! Metropolis simulated annealing for the Travelling Salesman Problem.
//!
//! - **TSP annealing** ([`tsp`]): a cyclic tour over integer-grid cities,
//!   segment-reversal proposals with incremental length tracking, the
//!   Metropolis acceptance rule, and a geometric cooling schedule.
//! - **Finite-temperature walker** ([`walker`]): the same acceptance kernel
//!   over a small discrete energy spectrum, whose equilibrium is the
//!   closed-form Boltzmann distribution. Used to validate the kernel.
//! - **Metropolis kernel** ([`metropolis`]) and **random source**
//!   ([`random`]) shared by both.
//! - **I/O** ([`io`]): point-source parsing and space-separated result
//!   tables.
//!
//! # Example
//!
//! ```
//! use u_anneal::tsp::{AnnealConfig, AnnealRunner, Point};
//!
//! let points: Vec<Point> = (0..12)
//!     .map(|i| Point::new((i * 7) % 12, (i * 5) % 12))
//!     .collect();
//! let config = AnnealConfig::default()
//!     .with_temperature_steps(40)
//!     .with_sweeps_per_step(20)
//!     .with_seed(48);
//! let result = AnnealRunner::run(points, &config).unwrap();
//! assert!(result.best_length <= result.final_tour.length() + 1e-9);
//! ```

pub mod error;
pub mod io;
pub mod metropolis;
pub mod random;
pub mod tsp;
pub mod walker;

pub use error::AnnealError;
