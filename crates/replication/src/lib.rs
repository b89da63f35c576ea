//! Replication strategies for consistent hashing.
//!
//! This crate turns ring lookups into replica placements:
//! - How many replicas to create
//! - Which targets hold them, primary first, fallbacks in ring order

pub mod error;
pub mod placement;
pub mod strategy;

pub use error::ReplicationError;
pub use placement::ReplicaPlacement;
pub use strategy::{ReplicationStrategy, SimpleStrategy};
