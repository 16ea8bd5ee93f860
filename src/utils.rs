//! Utility functions for the flap32 crate

use rand::{SeedableRng, rngs::StdRng};

/// Build a standard RNG, seeded when a seed is supplied.
///
/// Seeded construction is what makes training runs and tests reproducible;
/// without a seed the RNG is forked from the thread-local generator.
pub fn build_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::seed_from_u64(rand::random::<u64>()),
    }
}
