//! Random source shared by synthesis and the genetic operators.

use rand::prelude::*;

/// Random number generator wrapper for road operations.
pub struct RoadRng {
    rng: StdRng,
}

impl RoadRng {
    /// Create from seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Bernoulli draw: true with probability `p`.
    pub fn chance(&mut self, p: f64) -> bool {
        self.rng.r#gen::<f64>() <= p
    }

    /// Uniform integer offset in `[-reach, reach]`.
    pub fn offset(&mut self, reach: i64) -> i64 {
        self.rng.gen_range(-reach..=reach)
    }

    /// Two distinct indices drawn uniformly from `0..len`.
    ///
    /// Returns `None` when fewer than two indices exist.
    pub fn distinct_pair(&mut self, len: usize) -> Option<(usize, usize)> {
        if len < 2 {
            return None;
        }
        let picked = rand::seq::index::sample(&mut self.rng, len, 2);
        Some((picked.index(0), picked.index(1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let mut a = RoadRng::new(7);
        let mut b = RoadRng::new(7);
        for _ in 0..20 {
            assert_eq!(a.offset(1000), b.offset(1000));
            assert_eq!(a.chance(0.5), b.chance(0.5));
            assert_eq!(a.distinct_pair(10), b.distinct_pair(10));
        }
    }

    #[test]
    fn test_offset_within_reach() {
        let mut rng = RoadRng::new(1);
        for _ in 0..500 {
            let v = rng.offset(5);
            assert!((-5..=5).contains(&v));
        }
    }

    #[test]
    fn test_distinct_pair() {
        let mut rng = RoadRng::new(3);
        assert_eq!(rng.distinct_pair(1), None);
        for _ in 0..200 {
            let (a, b) = rng.distinct_pair(4).unwrap();
            assert_ne!(a, b);
            assert!(a < 4 && b < 4);
        }
    }

    #[test]
    fn test_chance_extremes() {
        let mut rng = RoadRng::new(5);
        assert!((0..100).all(|_| rng.chance(1.0)));
        assert!((0..100).all(|_| !rng.chance(-1.0)));
    }
}
