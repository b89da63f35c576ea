//! Core library for consistent hashing implementation.
//!
//! This crate provides the fundamental abstractions for consistent hashing:
//! - Hasher trait and stock implementations (CRC-32, MD5, xxh3, SipHash)
//! - Position and target bounds
//! - Virtual node placement
//! - The hash ring with its lazily sorted lookup index
//! - Distribution analysis over a ring

pub mod error;
pub mod hasher;
pub mod position;
pub mod ring;
pub mod topology;
pub mod vnode;

pub use error::{Result, RingError};
pub use hasher::{Crc32Hasher, Hasher, Md5Hasher, SipHasher, Xxh3Hasher};
pub use position::{Position, Target};
pub use ring::{HashRing, RingBuilder, SharedRing, DEFAULT_REPLICAS};
pub use topology::Distribution;
pub use vnode::VirtualNode;
