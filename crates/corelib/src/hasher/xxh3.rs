//! xxh3 hasher.

use crate::hasher::traits::Hasher;
use xxhash_rust::xxh3::xxh3_64;

/// Fast non-cryptographic hasher producing `u64` positions via xxh3-64.
#[derive(Clone, Copy, Debug, Default)]
pub struct Xxh3Hasher;

impl Hasher for Xxh3Hasher {
    type Position = u64;

    fn hash(&self, value: &[u8]) -> Self::Position {
        xxh3_64(value)
    }

    fn name(&self) -> &'static str {
        "Xxh3Hasher"
    }
}
