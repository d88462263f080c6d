//! Uniform random source backing every chance event in the engine.
//!
//! ## Draw surface
//!
//! - `draw`: one float in `[0, 1)`
//! - `draw_range`: one integer in `[0, limit)`
//! - `draw_bool`: one weighted boolean
//! - `draw_many`: a batch of draws pushed through a transform
//! - `shuffle`: in-place permutation of a slice
//!
//! The only hard requirement is uniformity. Production use seeds from OS
//! entropy; tests seed explicitly to make tie-breaks and target picks
//! reproducible.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Uniform random source.
///
/// Uses ChaCha8 for speed while maintaining cryptographic quality randomness.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
}

impl GameRng {
    /// Create an RNG seeded from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            inner: ChaCha8Rng::from_entropy(),
        }
    }

    /// Create an RNG with a fixed seed. Same seed, same sequence.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Draw a float uniformly from `[0, 1)`.
    pub fn draw(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    /// Draw an integer uniformly from `[0, limit)`.
    ///
    /// `limit` must be nonzero.
    pub fn draw_range(&mut self, limit: usize) -> usize {
        assert!(limit > 0, "draw_range requires a nonzero limit");
        self.inner.gen_range(0..limit)
    }

    /// Draw a boolean, true with the given probability.
    pub fn draw_bool(&mut self, probability: f64) -> bool {
        self.inner.gen_bool(probability)
    }

    /// Draw `n` floats from `[0, 1)` and map each through `transform`.
    pub fn draw_many<T>(&mut self, n: usize, mut transform: impl FnMut(f64) -> T) -> Vec<T> {
        (0..n).map(|_| transform(self.draw())).collect()
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::seeded(42);
        let mut rng2 = GameRng::seeded(42);

        for _ in 0..100 {
            assert_eq!(rng1.draw_range(1000), rng2.draw_range(1000));
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = GameRng::seeded(1);
        let mut rng2 = GameRng::seeded(2);

        let seq1: Vec<_> = (0..10).map(|_| rng1.draw_range(1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| rng2.draw_range(1000)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_draw_is_unit_interval() {
        let mut rng = GameRng::seeded(42);
        for _ in 0..1000 {
            let v = rng.draw();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn test_draw_range_bounds() {
        let mut rng = GameRng::seeded(42);
        for _ in 0..1000 {
            assert!(rng.draw_range(7) < 7);
        }
        assert_eq!(rng.draw_range(1), 0);
    }

    #[test]
    #[should_panic(expected = "nonzero limit")]
    fn test_draw_range_zero_limit() {
        let mut rng = GameRng::seeded(42);
        let _ = rng.draw_range(0);
    }

    #[test]
    fn test_draw_many_applies_transform() {
        let mut rng = GameRng::seeded(42);
        let values = rng.draw_many(20, |r| (r * 10.0).floor() as usize);

        assert_eq!(values.len(), 20);
        assert!(values.iter().all(|&v| v < 10));
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = GameRng::seeded(42);
        let mut data = vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
        let original = data.clone();

        rng.shuffle(&mut data);

        assert_eq!(data.len(), original.len());
        assert_ne!(data, original);

        data.sort();
        assert_eq!(data, original);
    }

    #[test]
    fn test_draw_bool_extremes() {
        let mut rng = GameRng::seeded(42);
        assert!(rng.draw_bool(1.0));
        assert!(!rng.draw_bool(0.0));
    }
}
