//! Deterministic random number generation.
//!
//! One seed drives every random choice the engine makes. Each consumer
//! (deck shuffle, finding distribution, first player) draws from its own
//! context stream, so adding a draw to one never changes the others.
//!
//! ```
//! use minoan_paths::core::GameRng;
//!
//! let rng = GameRng::new(42);
//! let mut deck_a = rng.for_context("deck");
//! let mut deck_b = GameRng::new(42).for_context("deck");
//!
//! assert_eq!(deck_a.gen_index(100), deck_b.gen_index(100));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::hash::{Hash, Hasher};

/// Context name for the deck shuffle stream.
pub const DECK_STREAM: &str = "deck";
/// Context name for the finding distribution stream.
pub const FINDINGS_STREAM: &str = "findings";
/// Context name for the first player choice.
pub const TURN_ORDER_STREAM: &str = "turn-order";

/// Seeded ChaCha8 generator with named sub-streams.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this generator was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Create an independent stream for a specific context.
    ///
    /// The same context always produces the same stream from the same seed.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;

        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        let context_seed = hasher.finish();

        Self {
            inner: ChaCha8Rng::seed_from_u64(context_seed),
            seed: context_seed,
        }
    }

    /// Uniform index in `0..len`.
    ///
    /// Panics if `len` is zero.
    pub fn gen_index(&mut self, len: usize) -> usize {
        self.inner.gen_range(0..len)
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }
}
