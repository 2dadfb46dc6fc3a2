//! Dice rolling for combat resolution.
//!
//! All draws are inclusive-integer uniform. Battles normally run from
//! an entropy-seeded generator; an explicit seed is available for tests
//! and debugging, but no replay guarantee is made across versions.
//!
//! ```
//! use rust_duel::core::CombatRng;
//!
//! let mut rng = CombatRng::new(42);
//! let roll = rng.die(20);
//! assert!((1..=20).contains(&roll));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Random source for dice, magnitudes and policy choices.
///
/// Uses ChaCha8 for speed. Supports forking so repeated battles can
/// each draw from an independent stream.
#[derive(Clone, Debug)]
pub struct CombatRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl CombatRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// Create an RNG seeded from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    /// Create from an optional seed, falling back to entropy.
    #[must_use]
    pub fn from_seed_opt(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::new)
    }

    /// The seed this stream was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Fork this RNG to create an independent stream.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self
            .seed
            .wrapping_add(self.fork_counter.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        Self::new(fork_seed)
    }

    /// Roll an integer uniformly in `[low, high]`.
    ///
    /// Reversed bounds are swapped, so degenerate data never panics.
    pub fn roll(&mut self, low: i64, high: i64) -> i64 {
        let (low, high) = if low <= high { (low, high) } else { (high, low) };
        self.inner.gen_range(low..=high)
    }

    /// Roll a single die with `sides` faces (`1..=sides`).
    pub fn die(&mut self, sides: i64) -> i64 {
        self.roll(1, sides.max(1))
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }
}

impl Default for CombatRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}
