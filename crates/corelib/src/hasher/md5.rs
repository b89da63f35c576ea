//! MD5 hex-digest hasher.

use crate::hasher::traits::Hasher;
use ::md5::{Digest, Md5};

/// MD5 hasher producing lowercase hex digest strings.
///
/// Positions compare lexicographically, which orders the same way as the
/// underlying 128-bit digest.
#[derive(Clone, Copy, Debug, Default)]
pub struct Md5Hasher;

impl Hasher for Md5Hasher {
    type Position = String;

    fn hash(&self, value: &[u8]) -> Self::Position {
        format!("{:x}", Md5::digest(value))
    }

    fn name(&self) -> &'static str {
        "Md5Hasher"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_md5_known_values() {
        let hasher = Md5Hasher;
        assert_eq!(hasher.hash(b""), "d41d8cd98f00b204e9800998ecf8427e");
        assert_eq!(hasher.hash(b"a"), "0cc175b9c0f1b6a831c399e269772661");
    }

    #[test]
    fn test_md5_deterministic() {
        let hasher = Md5Hasher;
        let first = hasher.hash(b"test");
        assert_eq!(first, hasher.hash(b"test"));
        assert_ne!(first, hasher.hash(b"different"));
        assert_eq!(first.len(), 32);
    }
}
