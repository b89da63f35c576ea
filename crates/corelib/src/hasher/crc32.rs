//! CRC-32 hasher (zlib-compatible, the default).

use crate::hasher::traits::Hasher;

/// CRC-32 (IEEE) hasher producing `u32` positions.
///
/// Matches `zlib.crc32`, which makes ring layouts reproducible against
/// other flexihash implementations.
#[derive(Clone, Copy, Debug, Default)]
pub struct Crc32Hasher;

impl Hasher for Crc32Hasher {
    type Position = u32;

    fn hash(&self, value: &[u8]) -> Self::Position {
        crc32fast::hash(value)
    }

    fn name(&self) -> &'static str {
        "Crc32Hasher"
    }
}
