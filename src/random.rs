//! Random number source used by every stochastic component.
//!
//! The annealing engine and the walker only ever need two draws: a uniform
//! integer below a bound and a uniform real in `[0, 1)`. [`RandomSource`]
//! captures exactly that, and every [`rand::Rng`] implements it, so callers
//! can hand in a seeded [`StdRng`], a `&mut` borrow of one they share with
//! other components, or a scripted source in tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Uniform draws consumed by proposals and acceptance decisions.
pub trait RandomSource {
    /// Uniform integer in `[0, bound)`. `bound` must be non-zero.
    fn next_int(&mut self, bound: usize) -> usize;

    /// Uniform real in `[0, 1)`.
    fn next_double(&mut self) -> f64;
}

impl<R: Rng> RandomSource for R {
    fn next_int(&mut self, bound: usize) -> usize {
        self.random_range(0..bound)
    }

    fn next_double(&mut self) -> f64 {
        self.random::<f64>()
    }
}

/// Creates a reproducible generator from a seed.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Creates a generator from `seed`, or from OS entropy when `None`.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => create_rng(s),
        None => create_rng(rand::random()),
    }
}

/// Replays fixed integer and real draws, for tests that need exact pivots.
#[cfg(test)]
pub(crate) struct ScriptedSource {
    ints: std::collections::VecDeque<usize>,
    double: f64,
    pub(crate) int_draws: usize,
    pub(crate) double_draws: usize,
}

#[cfg(test)]
impl ScriptedSource {
    /// Integer draws come from `ints` in order; every real draw is `double`.
    pub(crate) fn new(ints: &[usize], double: f64) -> Self {
        Self {
            ints: ints.iter().copied().collect(),
            double,
            int_draws: 0,
            double_draws: 0,
        }
    }
}

#[cfg(test)]
impl RandomSource for ScriptedSource {
    fn next_int(&mut self, bound: usize) -> usize {
        self.int_draws += 1;
        let v = self.ints.pop_front().expect("integer script exhausted");
        assert!(v < bound, "scripted {v} out of bound {bound}");
        v
    }

    fn next_double(&mut self) -> f64 {
        self.double_draws += 1;
        self.double
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_int_within_bound() {
        let mut rng = create_rng(7);
        for _ in 0..1000 {
            assert!(rng.next_int(5) < 5);
        }
    }

    #[test]
    fn test_next_double_unit_interval() {
        let mut rng = create_rng(7);
        for _ in 0..1000 {
            let x = rng.next_double();
            assert!((0.0..1.0).contains(&x), "out of range: {x}");
        }
    }

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = create_rng(48);
        let mut b = create_rng(48);
        for _ in 0..100 {
            assert_eq!(a.next_int(1000), b.next_int(1000));
            assert_eq!(a.next_double().to_bits(), b.next_double().to_bits());
        }
    }

    #[test]
    fn test_borrowed_rng_is_a_source() {
        fn draw<R: RandomSource>(mut source: R) -> usize {
            source.next_int(10)
        }
        let mut rng = create_rng(1);
        let first = draw(&mut rng);
        assert!(first < 10);
        // the shared generator advanced through the borrow
        let mut fresh = create_rng(1);
        let _ = fresh.next_int(10);
        assert_eq!(rng.next_int(10), fresh.next_int(10));
    }
}
