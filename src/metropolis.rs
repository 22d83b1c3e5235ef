//! Metropolis acceptance kernel shared by the tour annealer and the
//! finite-temperature walker.
//!
//! # Reference
//!
//! Metropolis, Rosenbluth, Rosenbluth, Teller & Teller (1953),
//! "Equation of State Calculations by Fast Computing Machines"

use crate::random::RandomSource;

/// Probability of accepting a move that changes the energy by `delta`.
///
/// `1` for strictly improving moves, `exp(-delta / temperature)` otherwise.
#[inline]
pub fn acceptance_probability(delta: f64, temperature: f64) -> f64 {
    if delta < 0.0 {
        1.0
    } else {
        (-delta / temperature).exp()
    }
}

/// Metropolis criterion.
///
/// Improving moves are accepted without consuming randomness. Any other
/// move draws exactly one uniform real and is accepted when it falls below
/// `exp(-delta / temperature)`. `temperature` must be positive.
#[inline]
pub fn accept<R: RandomSource + ?Sized>(delta: f64, temperature: f64, rng: &mut R) -> bool {
    if delta < 0.0 {
        return true;
    }
    rng.next_double() < (-delta / temperature).exp()
}
