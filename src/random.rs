use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// The random source injected into expansion and rollouts.
///
/// Every `rand::Rng` is a `RandomGenerator`, so tests can pass a seeded generator and get
/// reproducible searches.
pub trait RandomGenerator {
    /// Returns an index in `0..len`. `len` must be positive.
    fn next_index(&mut self, len: usize) -> usize;

    /// Picks a uniformly random element, or `None` for an empty slice.
    fn choose<'a, K>(&mut self, items: &'a [K]) -> Option<&'a K> {
        if items.is_empty() {
            return None;
        }
        items.get(self.next_index(items.len()))
    }
}

impl<R: Rng> RandomGenerator for R {
    fn next_index(&mut self, len: usize) -> usize {
        self.random_range(0..len)
    }
}

/// The generator used when the caller does not supply one.
pub type DefaultRandomGenerator = ChaCha8Rng;

/// Builds the default generator, seeded from `seed` or from the thread RNG when absent.
pub fn seeded_generator(seed: Option<u64>) -> DefaultRandomGenerator {
    let seed = seed.unwrap_or_else(rand::random);
    ChaCha8Rng::seed_from_u64(seed)
}
