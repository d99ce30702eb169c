//! Uniform random draws for every mode

use rand::prelude::*;

use rr_core::{RrError, RrResult};

/// Source of independent uniform draws
///
/// Wraps a standard PRNG seeded from OS entropy. Not cryptographically secure.
#[derive(Debug, Clone)]
pub struct RandomSource {
    rng: StdRng,
}

impl RandomSource {
    /// Create a source seeded from system entropy
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Create a reproducible source
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Integer in `[low, high]`, both ends inclusive
    ///
    /// `high` below `low` is treated as `low`.
    pub fn uniform_int(&mut self, low: i64, high: i64) -> i64 {
        self.rng.random_range(low..=high.max(low))
    }

    /// One element of a non-empty slice, uniformly
    pub fn pick_one<'a, T>(&mut self, items: &'a [T]) -> RrResult<&'a T> {
        items
            .choose(&mut self.rng)
            .ok_or_else(|| RrError::EmptyInput("cannot pick from an empty sequence".into()))
    }

    /// Fair coin
    pub fn coin_flip(&mut self) -> bool {
        self.rng.random_bool(0.5)
    }

    /// Shuffle in place (uniform permutation)
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_int_inclusive_bounds() {
        let mut source = RandomSource::seeded(7);
        let mut seen = [false; 6];
        for _ in 0..1000 {
            let v = source.uniform_int(1, 6);
            assert!((1..=6).contains(&v));
            seen[(v - 1) as usize] = true;
        }
        // Both ends reachable
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_uniform_int_degenerate_range() {
        let mut source = RandomSource::seeded(1);
        assert_eq!(source.uniform_int(4, 4), 4);
        assert_eq!(source.uniform_int(9, 2), 9);
    }

    #[test]
    fn test_pick_one_empty() {
        let mut source = RandomSource::seeded(3);
        let empty: [&str; 0] = [];
        assert!(matches!(source.pick_one(&empty), Err(RrError::EmptyInput(_))));
    }

    #[test]
    fn test_pick_one_member() {
        let mut source = RandomSource::seeded(3);
        let items = ["A", "B", "C"];
        for _ in 0..100 {
            assert!(items.contains(source.pick_one(&items).unwrap()));
        }
    }

    #[test]
    fn test_coin_flip_roughly_fair() {
        let mut source = RandomSource::seeded(42);
        let heads = (0..10_000).filter(|_| source.coin_flip()).count();
        assert!((4_500..=5_500).contains(&heads), "heads = {heads}");
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let mut a = RandomSource::seeded(99);
        let mut b = RandomSource::seeded(99);
        for _ in 0..20 {
            assert_eq!(a.uniform_int(0, 1_000_000), b.uniform_int(0, 1_000_000));
        }
    }
}
