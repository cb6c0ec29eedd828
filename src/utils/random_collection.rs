use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const MIN_VALUE: i64 = 10;
pub const MAX_VALUE: i64 = 110;
pub const MAX_COLLECTION: usize = 64;

/// Seeded when a seed is configured, otherwise drawn from the thread rng.
pub fn collection_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    }
}

pub fn random_collection(rng: &mut impl Rng, size: usize) -> Vec<i64> {
    let size = size.clamp(1, MAX_COLLECTION);
    (0..size).map(|_| rng.random_range(MIN_VALUE..MAX_VALUE)).collect()
}
