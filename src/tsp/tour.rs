//! Cyclic tour with a cached length and the segment-reversal move.

use std::fmt;

use super::point::{Bounds, Point};
use crate::error::AnnealError;
use crate::random::RandomSource;

/// Total length of the closed cycle through `points`.
pub fn cycle_length(points: &[Point]) -> f64 {
    let n = points.len();
    (0..n)
        .map(|i| points[i].distance(&points[(i + 1) % n]))
        .sum()
}

/// An ordered cyclic sequence of cities.
///
/// The successor of the last city is the first. `length` is a cache: it is
/// set at construction, refreshed by [`Tour::evaluate_length`], and carried
/// incrementally through [`Tour::propose`]. `bounds` is fixed at
/// construction; a reversal permutes the same cities so it never changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Tour {
    sequence: Vec<Point>,
    length: f64,
    bounds: Bounds,
}

impl Tour {
    /// Builds a tour visiting `sequence` in order.
    ///
    /// # Errors
    ///
    /// [`AnnealError::TooFewCities`] for fewer than three cities.
    pub fn new(sequence: Vec<Point>) -> Result<Self, AnnealError> {
        if sequence.len() < 3 {
            return Err(AnnealError::TooFewCities(sequence.len()));
        }
        let bounds = Bounds::of(&sequence).ok_or(AnnealError::TooFewCities(0))?;
        let mut tour = Self {
            sequence,
            length: 0.0,
            bounds,
        };
        tour.evaluate_length();
        Ok(tour)
    }

    /// Recomputes the cycle length from scratch, caches and returns it. O(n).
    pub fn evaluate_length(&mut self) -> f64 {
        self.length = cycle_length(&self.sequence);
        self.length
    }

    /// Cached cycle length.
    #[inline]
    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn num_cities(&self) -> usize {
        self.sequence.len()
    }

    pub fn sequence(&self) -> &[Point] {
        &self.sequence
    }

    /// Bounding box computed at construction.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Proposes a neighbouring tour by reversing a random segment.
    ///
    /// Two integers are drawn from `[0, n - 1)` until they differ; the
    /// segment is `[1 + min, 1 + max]`, so city 0 never moves. The new
    /// tour's length is derived from the four boundary edges only.
    pub fn propose<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Tour {
        let (p, q) = self.draw_cut(rng);
        self.reversed(p, q)
    }

    /// Reverses the cities at positions `p..=q`.
    ///
    /// # Errors
    ///
    /// [`AnnealError::InvalidSegment`] unless `1 <= p < q < n`.
    pub fn reverse_segment(&self, p: usize, q: usize) -> Result<Tour, AnnealError> {
        let n = self.sequence.len();
        if p == 0 || p >= q || q >= n {
            return Err(AnnealError::InvalidSegment { p, q, n });
        }
        Ok(self.reversed(p, q))
    }

    fn draw_cut<R: RandomSource + ?Sized>(&self, rng: &mut R) -> (usize, usize) {
        let span = self.sequence.len() - 1;
        loop {
            let a = rng.next_int(span);
            let b = rng.next_int(span);
            if a != b {
                return (1 + a.min(b), 1 + a.max(b));
            }
        }
    }

    fn reversed(&self, p: usize, q: usize) -> Tour {
        debug_assert!(0 < p && p < q && q < self.sequence.len());
        let n = self.sequence.len();
        let old = &self.sequence;

        let mut next = Vec::with_capacity(n);
        next.extend_from_slice(&old[..p]);
        next.extend(old[p..=q].iter().rev());
        next.extend_from_slice(&old[q + 1..]);

        let wrap = (q + 1) % n;
        let removed = old[p - 1].distance(&old[p]) + old[q].distance(&old[wrap]);
        let added = next[p - 1].distance(&next[p]) + next[q].distance(&next[wrap]);

        Self::with_incremental_length(next, self.bounds, self.length, removed, added)
    }

    /// Second phase of a move: attach a length derived from the parent's.
    ///
    /// Interior edges of a reversed segment keep their lengths, so only the
    /// two boundary edges are swapped out.
    fn with_incremental_length(
        sequence: Vec<Point>,
        bounds: Bounds,
        previous: f64,
        removed: f64,
        added: f64,
    ) -> Tour {
        Tour {
            sequence,
            length: previous - removed + added,
            bounds,
        }
    }
}

impl fmt::Display for Tour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} : [", self.length)?;
        for p in &self.sequence {
            write!(f, "{p}")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{create_rng, ScriptedSource};
    use proptest::prelude::*;

    fn square() -> Tour {
        Tour::new(vec![
            Point::new(0, 0),
            Point::new(0, 1),
            Point::new(1, 1),
            Point::new(1, 0),
        ])
        .unwrap()
    }

    fn ring(n: usize) -> Vec<Point> {
        (0..n)
            .map(|i| {
                let a = i as f64 / n as f64 * std::f64::consts::TAU;
                Point::new((100.0 * a.cos()) as i32, (100.0 * a.sin()) as i32)
            })
            .collect()
    }

    #[test]
    fn test_new_rejects_short_tours() {
        assert!(matches!(Tour::new(vec![]), Err(AnnealError::TooFewCities(0))));
        let two = vec![Point::new(0, 0), Point::new(1, 1)];
        assert!(matches!(Tour::new(two), Err(AnnealError::TooFewCities(2))));
    }

    #[test]
    fn test_square_length() {
        let tour = square();
        assert!((tour.length() - 4.0).abs() < 1e-12);
        assert_eq!(tour.num_cities(), 4);
    }

    #[test]
    fn test_evaluate_length_idempotent() {
        let mut tour = Tour::new(ring(17)).unwrap();
        let a = tour.evaluate_length();
        let b = tour.evaluate_length();
        assert_eq!(a.to_bits(), b.to_bits());
        assert_eq!(a.to_bits(), tour.length().to_bits());
    }

    #[test]
    fn test_square_reversal_crosses_diagonal() {
        let tour = square();
        let next = tour.reverse_segment(1, 2).unwrap();
        assert_eq!(
            next.sequence(),
            &[
                Point::new(0, 0),
                Point::new(1, 1),
                Point::new(0, 1),
                Point::new(1, 0)
            ]
        );
        // two unit sides replaced by two diagonals: 2 + 2*sqrt(2)
        let expected = 2.0 + 2.0 * std::f64::consts::SQRT_2;
        assert!((next.length() - expected).abs() < 1e-12);
        let delta = next.length() - tour.length();
        assert!((delta - 0.828_427_124_746_190_1).abs() < 1e-12, "delta {delta}");
        // the parent is untouched
        assert!((tour.length() - 4.0).abs() < 1e-12);
        assert_eq!(tour.sequence()[1], Point::new(0, 1));
    }

    #[test]
    fn test_reversal_touching_last_city_wraps() {
        let tour = Tour::new(ring(8)).unwrap();
        let mut next = tour.reverse_segment(3, 7).unwrap();
        assert_eq!(next.sequence()[3], tour.sequence()[7]);
        assert_eq!(next.sequence()[7], tour.sequence()[3]);
        let incremental = next.length();
        assert!((incremental - next.evaluate_length()).abs() < 1e-9);
    }

    #[test]
    fn test_reverse_segment_rejects_bad_cuts() {
        let tour = square();
        for (p, q) in [(0, 2), (2, 2), (3, 1), (1, 4)] {
            assert!(
                matches!(
                    tour.reverse_segment(p, q),
                    Err(AnnealError::InvalidSegment { .. })
                ),
                "({p}, {q}) should be rejected"
            );
        }
    }

    #[test]
    fn test_propose_retries_until_distinct() {
        let tour = square();
        // (1, 1) and (0, 0) collide, then (2, 0) gives p = 1, q = 3
        let mut rng = ScriptedSource::new(&[1, 1, 0, 0, 2, 0], 0.0);
        let next = tour.propose(&mut rng);
        assert_eq!(rng.int_draws, 6);
        assert_eq!(
            next.sequence(),
            &[
                Point::new(0, 0),
                Point::new(1, 0),
                Point::new(1, 1),
                Point::new(0, 1)
            ]
        );
    }

    #[test]
    fn test_propose_keeps_anchor_and_cities() {
        let tour = Tour::new(ring(12)).unwrap();
        let mut rng = create_rng(3);
        let mut current = tour.clone();
        for _ in 0..200 {
            current = current.propose(&mut rng);
            assert_eq!(current.sequence()[0], tour.sequence()[0]);
            assert_eq!(current.bounds(), tour.bounds());
        }
        let mut a = current.sequence().to_vec();
        let mut b = tour.sequence().to_vec();
        a.sort_by_key(|p| (p.x, p.y));
        b.sort_by_key(|p| (p.x, p.y));
        assert_eq!(a, b);
    }

    #[test]
    fn test_three_city_tour_always_proposes_one_two() {
        let tour = Tour::new(vec![Point::new(0, 0), Point::new(4, 0), Point::new(0, 3)]).unwrap();
        let mut rng = create_rng(11);
        let next = tour.propose(&mut rng);
        assert_eq!(next.sequence()[1], Point::new(0, 3));
        assert_eq!(next.sequence()[2], Point::new(4, 0));
        assert!((next.length() - 12.0).abs() < 1e-12);
    }

    #[test]
    fn test_display() {
        let s = square().to_string();
        assert_eq!(s, "4 : [(0,0)(0,1)(1,1)(1,0)]");
    }

    proptest! {
        #[test]
        fn test_incremental_matches_full_recompute(
            coords in prop::collection::vec((-1000i32..1000, -1000i32..1000), 3..40),
            a in any::<prop::sample::Index>(),
            b in any::<prop::sample::Index>(),
        ) {
            let points: Vec<Point> = coords.into_iter().map(Point::from).collect();
            let n = points.len();
            let tour = Tour::new(points).unwrap();
            let i = a.index(n - 1);
            let j = b.index(n - 1);
            prop_assume!(i != j);
            let mut next = tour.reverse_segment(1 + i.min(j), 1 + i.max(j)).unwrap();
            let incremental = next.length();
            let full = next.evaluate_length();
            let scale = full.abs().max(1.0);
            prop_assert!((incremental - full).abs() <= 1e-9 * scale,
                "incremental {} vs full {}", incremental, full);
        }

        #[test]
        fn test_chained_proposals_stay_consistent(seed in any::<u64>()) {
            let mut rng = create_rng(seed);
            let mut tour = Tour::new(ring(25)).unwrap();
            for _ in 0..50 {
                tour = tour.propose(&mut rng);
            }
            let incremental = tour.length();
            let full = tour.evaluate_length();
            prop_assert!((incremental - full).abs() <= 1e-9 * full.max(1.0));
        }
    }
}
