//! Position abstraction for the hash ring.
//!
//! A position is whatever a [`Hasher`](crate::hasher::Hasher) produces. The
//! ring never does arithmetic on positions: it only sorts them, compares them
//! and uses them as map keys. That keeps the trait minimal so a 32-bit
//! checksum and a hex digest string can both serve as ring coordinates.

use std::fmt::Debug;
use std::hash::Hash;

/// A totally ordered, hashable point on the ring.
///
/// Blanket-implemented for every type that satisfies the bounds, so `u32`,
/// `u64`, `String` and `Vec<u8>` all work out of the box.
pub trait Position: Clone + Ord + Hash + Debug {}

impl<P> Position for P where P: Clone + Ord + Hash + Debug {}

/// Bounds a ring target must satisfy.
///
/// Targets are hashed as raw bytes (`AsRef<[u8]>`), ordered for
/// deterministic enumeration, and used as map keys.
pub trait Target: AsRef<[u8]> + Clone + Ord + Hash + Debug {}

impl<T> Target for T where T: AsRef<[u8]> + Clone + Ord + Hash + Debug {}
