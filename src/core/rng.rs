//! Deterministic random number generation.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical deck orders and hints
//! - **Context streams**: Independent sequences for different purposes
//!
//! The game keeps one stream for deck shuffling and one for hint search, so
//! asking for a hint never changes which cards a later shuffle deals.
//!
//! ```
//! use set_engine::core::GameRng;
//!
//! let root = GameRng::new(42);
//! let mut deck = root.for_context("deck");
//! let mut hint = root.for_context("hint");
//!
//! let mut a: Vec<u32> = (0..10).collect();
//! let mut b = a.clone();
//! deck.shuffle(&mut a);
//! hint.shuffle(&mut b);
//!
//! // Different contexts, different orders (very likely)
//! assert_ne!(a, b);
//! ```

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHasher;
use std::hash::Hasher;

/// Deterministic RNG backed by ChaCha8.
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

    /// Create an independent stream for a specific context.
    ///
    /// The same context always produces the same stream from the same seed.
    /// The context seed comes from `FxHasher`, whose output does not change
    /// between compiler releases, so recorded games replay on any toolchain.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        let mut hasher = FxHasher::default();
        hasher.write_u64(self.seed);
        hasher.write(context.as_bytes());
        let context_seed = hasher.finish();

        Self::new(context_seed)
    }

    /// Seed this stream was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }
}
