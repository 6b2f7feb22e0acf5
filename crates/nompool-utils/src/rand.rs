//!
//! ChaCha20-backed randomness for scan ordering.
//!
//! Each scan owns its own generator, so there is no shared PRNG state to
//! lock. Seed explicitly for a reproducible order, or from the clock when
//! the order only needs to be unpredictable to an outside observer.
//!
use rand_chacha::{
    ChaCha20Rng,
    rand_core::{RngCore, SeedableRng},
};
use sha2::{Digest, Sha256};
use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::{SystemTime, UNIX_EPOCH},
};
use thiserror::Error as ThisError;

// distinguishes generators seeded within the same clock tick
static SEED_COUNTER: AtomicU64 = AtomicU64::new(0);

// -----------------------------------------------------------------------------
// Errors
// -----------------------------------------------------------------------------

///
/// RngError
/// Errors raised when a generator cannot be seeded.
///

#[derive(Debug, ThisError)]
pub enum RngError {
    #[error("system clock is set before the unix epoch: {0}")]
    ClockBeforeEpoch(String),
}

// -----------------------------------------------------------------------------
// Seeding
// -----------------------------------------------------------------------------

/// Build a generator from a fixed 64-bit seed.
#[must_use]
pub fn rng_from_seed(seed: u64) -> ChaCha20Rng {
    ChaCha20Rng::seed_from_u64(seed)
}

/// Build a generator from a 32-byte seed.
#[must_use]
pub fn rng_from_bytes(seed: [u8; 32]) -> ChaCha20Rng {
    ChaCha20Rng::from_seed(seed)
}

/// Build a generator seeded from wall-clock time, the process id and a
/// process-local counter, hashed with SHA-256.
pub fn rng_from_time() -> Result<ChaCha20Rng, RngError> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|err| RngError::ClockBeforeEpoch(err.to_string()))?;
    let counter = SEED_COUNTER.fetch_add(1, Ordering::Relaxed);

    let mut hasher = Sha256::new();
    hasher.update(now.as_nanos().to_be_bytes());
    hasher.update(std::process::id().to_be_bytes());
    hasher.update(counter.to_be_bytes());
    let seed: [u8; 32] = hasher.finalize().into();

    Ok(rng_from_bytes(seed))
}

// -----------------------------------------------------------------------------
// Sampling
// -----------------------------------------------------------------------------

/// Uniform value in `0..bound`. Returns 0 when `bound` is 0.
///
/// Rejects draws from the incomplete top block of the `u64` range so that
/// every residue is equally likely.
pub fn next_below(rng: &mut ChaCha20Rng, bound: u64) -> u64 {
    if bound == 0 {
        return 0;
    }

    let zone = u64::MAX - (u64::MAX % bound);
    loop {
        let value = rng.next_u64();
        if value < zone {
            return value % bound;
        }
    }
}

/// Fisher–Yates shuffle in place.
#[allow(clippy::cast_possible_truncation)]
pub fn shuffle<T>(rng: &mut ChaCha20Rng, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = next_below(rng, i as u64 + 1) as usize;
        items.swap(i, j);
    }
}

/// Uniformly random ordering of `1..=count`, each value exactly once.
pub fn permutation(rng: &mut ChaCha20Rng, count: u32) -> Vec<u32> {
    let mut ids: Vec<u32> = (1..=count).collect();
    shuffle(rng, &mut ids);
    ids
}

/// Hex-encoded random bytes, handy for scan correlation ids.
pub fn random_hex(rng: &mut ChaCha20Rng, size: usize) -> String {
    let mut buf = vec![0u8; size];
    rng.fill_bytes(&mut buf);
    hex::encode(buf)
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn permutation_visits_every_id_once() {
        let mut rng = rng_from_seed(7);
        let ids = permutation(&mut rng, 500);

        assert_eq!(ids.len(), 500);
        let unique: HashSet<u32> = ids.iter().copied().collect();
        assert_eq!(unique.len(), 500);
        assert!(ids.iter().all(|id| (1..=500).contains(id)));
    }

    #[test]
    fn permutation_is_deterministic_for_fixed_seed() {
        let first = permutation(&mut rng_from_seed(42), 64);
        let second = permutation(&mut rng_from_seed(42), 64);

        assert_eq!(first, second);
    }

    #[test]
    fn permutation_depends_on_seed() {
        let first = permutation(&mut rng_from_seed(1), 64);
        let second = permutation(&mut rng_from_seed(2), 64);

        assert_ne!(
            first, second,
            "different seeds unexpectedly produced the same order"
        );
    }

    #[test]
    fn permutation_is_not_identity() {
        let ids = permutation(&mut rng_from_seed(3), 64);
        let sorted: Vec<u32> = (1..=64).collect();

        assert_ne!(ids, sorted);
    }

    #[test]
    fn permutation_handles_small_counts() {
        assert!(permutation(&mut rng_from_seed(0), 0).is_empty());
        assert_eq!(permutation(&mut rng_from_seed(0), 1), vec![1]);
    }

    #[test]
    fn next_below_stays_in_range() {
        let mut rng = rng_from_seed(9);
        for bound in [1u64, 2, 3, 7, 1000, u64::MAX] {
            for _ in 0..100 {
                assert!(next_below(&mut rng, bound) < bound);
            }
        }
        assert_eq!(next_below(&mut rng, 0), 0);
    }

    // Sanity check only: every position of a 3-element shuffle gets used.
    // This is not a statistical uniformity test.
    #[test]
    fn shuffle_reaches_every_position() {
        let mut rng = rng_from_seed(11);
        let mut seen_first = HashSet::new();
        for _ in 0..200 {
            let mut items = [1, 2, 3];
            shuffle(&mut rng, &mut items);
            seen_first.insert(items[0]);
        }

        assert_eq!(seen_first.len(), 3);
    }

    #[test]
    fn time_seeded_generators_differ() {
        let mut a = rng_from_time().expect("clock after epoch");
        let mut b = rng_from_time().expect("clock after epoch");

        assert_ne!(a.next_u64(), b.next_u64());
    }

    #[test]
    fn random_hex_length() {
        let value = random_hex(&mut rng_from_seed(5), 6);
        assert_eq!(value.len(), 12);
    }
}
