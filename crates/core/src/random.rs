//! Shared, injectable source of randomness
//!
//! Every random choice in the crate (cache sampling, curated picks, candidate
//! selection, shuffling) draws from a [`RandomSource`]. Production code uses
//! [`RandomSource::from_entropy`]; tests pass [`RandomSource::seeded`] to get
//! reproducible runs.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Cloneable handle to a single random number generator
///
/// Clones share the generator, so a seeded source handed to several
/// components still produces one deterministic stream.
#[derive(Clone)]
pub struct RandomSource {
    rng: Arc<Mutex<StdRng>>,
}

impl RandomSource {
    /// Generator seeded from the operating system
    pub fn from_entropy() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Deterministic generator for tests and replays
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self { rng: Arc::new(Mutex::new(rng)) }
    }

    /// Run `f` with exclusive access to the generator
    pub fn with<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        let mut rng = self.rng.lock();
        f(&mut rng)
    }

    /// Uniform index in `[0, upper]`
    pub fn index_through(&self, upper: usize) -> usize {
        self.with(|rng| rng.gen_range(0..=upper))
    }

    /// Uniformly chosen element, `None` for an empty slice
    pub fn choose<'a, T>(&self, items: &'a [T]) -> Option<&'a T> {
        self.with(|rng| items.choose(rng))
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl fmt::Debug for RandomSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RandomSource").finish_non_exhaustive()
    }
}
