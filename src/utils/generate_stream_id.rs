use crate::utils::now;
use once_cell::sync::Lazy;
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{RngCore, SeedableRng};
use std::cell::RefCell;
use std::sync::atomic::{AtomicU64, Ordering};
use xxhash_rust::xxh3::xxh3_64;

thread_local! {
    static SALT_RNG: RefCell<ChaCha8Rng> = {
        let seed = now();
        RefCell::new(ChaCha8Rng::seed_from_u64(seed))
    };
}

/// A simple counter which is initialized at 0.
static STREAM_ID_COUNTER: Lazy<AtomicU64> = Lazy::new(|| AtomicU64::new(0));

/// Generates the stream id shared by all chunks of one split.
///
/// The process-wide counter keeps ids distinct even when two threads seed
/// their RNG with the same timestamp; the random salt keeps ids from
/// separate processes apart in practice. Not cryptographically secure.
#[inline]
pub fn generate_stream_id() -> i64 {
    let salt = SALT_RNG.with(|rng| rng.borrow_mut().next_u64());
    let count = STREAM_ID_COUNTER.fetch_add(1, Ordering::Relaxed);

    let mut seed = [0u8; 16];
    seed[..8].copy_from_slice(&salt.to_le_bytes());
    seed[8..].copy_from_slice(&count.to_le_bytes());

    xxh3_64(&seed) as i64
}
