//! Hasher abstraction for consistent hashing.
//!
//! Hashers convert targets and resources into positions that can be placed
//! on the hash ring.

pub mod crc32;
pub mod md5;
pub mod sip;
pub mod traits;
pub mod xxh3;

pub use self::crc32::Crc32Hasher;
pub use self::md5::Md5Hasher;
pub use self::sip::SipHasher;
pub use self::traits::Hasher;
pub use self::xxh3::Xxh3Hasher;
