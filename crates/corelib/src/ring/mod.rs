//! Consistent hash ring implementation.
//!
//! The ring manages target positions and provides efficient lookup
//! operations for finding the targets responsible for resources.

pub mod index;
#[allow(clippy::module_inception)]
pub mod ring;
pub mod shared;

pub use index::SortedIndex;
pub use ring::{HashRing, RingBuilder, DEFAULT_REPLICAS};
pub use shared::SharedRing;

