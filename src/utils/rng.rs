//! Random source helpers for reproducible runs.
//!
//! The network never touches global random state on its own: callers that
//! need determinism seed a `StdRng` here and pass it down.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Create an RNG from an explicit seed, or from OS entropy when `seed` is `None`.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Draw `batch_size` indices in [0, population), uniformly and with replacement.
///
/// Returns an empty vector when the population is empty.
pub fn sample_batch_indices<R: Rng + ?Sized>(
    rng: &mut R,
    population: usize,
    batch_size: usize,
) -> Vec<usize> {
    if population == 0 {
        return Vec::new();
    }
    (0..batch_size).map(|_| rng.gen_range(0..population)).collect()
}
