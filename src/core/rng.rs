//! Reproducible rolls for `RANDOM` predicates.
//!
//! Without an RNG in the evaluation context, `RANDOM` rolls on the
//! thread-local generator. Replays and tests put a seeded [`ChanceRng`]
//! there instead, optionally on a separate stream per player so one
//! player's rolls never shift another's.
//!
//! ```
//! use game_predicates::core::ChanceRng;
//!
//! let mut a = ChanceRng::new(42);
//! let mut b = ChanceRng::new(42);
//! assert_eq!(a.roll(), b.roll());
//!
//! let mut other_player = ChanceRng::new(42).with_stream(7);
//! assert_ne!(other_player.roll(), ChanceRng::new(42).roll());
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Seeded ChaCha8 roll source.
#[derive(Clone, Debug)]
pub struct ChanceRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl ChanceRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Switch to an independent stream under the same seed.
    #[must_use]
    pub fn with_stream(mut self, stream: u64) -> Self {
        self.inner.set_stream(stream);
        self
    }

    /// Uniform sample in `[0, 1)`.
    pub fn roll(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    /// One roll against `chance`. `<= 0` never passes, `>= 1` always does.
    pub fn chance(&mut self, chance: f64) -> bool {
        self.roll() < chance
    }

    /// Capture the position in the sequence.
    #[must_use]
    pub fn snapshot(&self) -> ChanceRngState {
        ChanceRngState {
            seed: self.seed,
            stream: self.inner.get_stream(),
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Resume exactly where a snapshot was taken.
    #[must_use]
    pub fn restore(state: &ChanceRngState) -> Self {
        let mut rng = Self::new(state.seed).with_stream(state.stream);
        rng.inner.set_word_pos(state.word_pos);
        rng
    }
}

/// Saved [`ChanceRng`] position, e.g. stored alongside a replay.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChanceRngState {
    pub seed: u64,
    pub stream: u64,
    pub word_pos: u128,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_rolls() {
        let mut a = ChanceRng::new(42);
        let mut b = ChanceRng::new(42);
        for _ in 0..100 {
            assert_eq!(a.roll(), b.roll());
        }
    }

    #[test]
    fn test_rolls_in_unit_interval() {
        let mut rng = ChanceRng::new(7);
        for _ in 0..1000 {
            assert!((0.0..1.0).contains(&rng.roll()));
        }
    }

    #[test]
    fn test_out_of_range_chances() {
        let mut rng = ChanceRng::new(3);
        for _ in 0..100 {
            assert!(!rng.chance(0.0));
            assert!(!rng.chance(-5.0));
            assert!(rng.chance(1.0));
            assert!(rng.chance(2.0));
        }
    }

    #[test]
    fn test_streams_are_independent() {
        let mut base = ChanceRng::new(42);
        let mut stream = ChanceRng::new(42).with_stream(1);
        let base_rolls: Vec<f64> = (0..8).map(|_| base.roll()).collect();
        let stream_rolls: Vec<f64> = (0..8).map(|_| stream.roll()).collect();
        assert_ne!(base_rolls, stream_rolls);
    }

    #[test]
    fn test_restore_resumes_sequence() {
        let mut rng = ChanceRng::new(42).with_stream(3);
        for _ in 0..50 {
            rng.roll();
        }

        let saved = rng.snapshot();
        let expected: Vec<f64> = (0..10).map(|_| rng.roll()).collect();

        let mut resumed = ChanceRng::restore(&saved);
        let actual: Vec<f64> = (0..10).map(|_| resumed.roll()).collect();
        assert_eq!(expected, actual);
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = ChanceRng::new(9).snapshot();
        let json = serde_json::to_string(&state).unwrap();
        let back: ChanceRngState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, back);
    }
}
