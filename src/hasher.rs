//! DJB2 string hash, exposed through the `core::hash` traits so it can be
//! swapped for any other `BuildHasher`.
//!
//! Keys are fed as raw bytes with `Hasher::write`, not through `str::hash`
//! (which appends a terminator byte), so the digest of a key is exactly the
//! classic `v = v * 33 + c` accumulation seeded with 5381.

use core::hash::{BuildHasher, Hasher};

pub const DJB2_SEED: u64 = 5381;

#[derive(Clone, Copy, Debug)]
pub struct Djb2Hasher {
    state: u64,
}

impl Default for Djb2Hasher {
    fn default() -> Self {
        Self { state: DJB2_SEED }
    }
}

impl Hasher for Djb2Hasher {
    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        for &c in bytes {
            self.state = self.state.wrapping_mul(33).wrapping_add(u64::from(c));
        }
    }

    #[inline]
    fn finish(&self) -> u64 {
        self.state
    }
}

/// Builder for `Djb2Hasher`; the default hasher of `ChainedHashMap`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuildDjb2;

impl BuildHasher for BuildDjb2 {
    type Hasher = Djb2Hasher;

    fn build_hasher(&self) -> Self::Hasher {
        Djb2Hasher::default()
    }
}

/// Bucket index of `key` in an array of `capacity` slots.
#[inline]
pub(crate) fn bucket_index<S: BuildHasher>(hasher: &S, key: &str, capacity: usize) -> usize {
    debug_assert!(capacity > 0, "bucket array must never be empty");
    let mut h = hasher.build_hasher();
    h.write(key.as_bytes());
    (h.finish() % capacity as u64) as usize
}
