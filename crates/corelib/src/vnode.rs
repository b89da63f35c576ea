//! Virtual node abstractions.
//!
//! # Virtual Nodes (VNodes) Concept
//!
//! Instead of placing each target at a single point on the ring, every target
//! owns `replicas × weight` points (virtual nodes). This provides:
//!
//! 1. **Better Load Distribution**: More points = smoother spread of resources
//! 2. **Gradual Rebalancing**: When targets join/leave, only a fraction of resources move
//! 3. **Weighting**: A target with weight 2 owns twice as many points
//!
//! # Replica Keys
//!
//! The point for replica `i` of a target is the hash of the target bytes
//! immediately followed by `i` rendered in decimal, with no separator:
//!
//! ```text
//! target "t-a", replica 0  -> hash("t-a0")
//! target "t-a", replica 12 -> hash("t-a12")
//! ```
//!
//! This exact format is what makes ring layouts reproducible across
//! implementations, so it must never change.
//!
//! # Performance Characteristics
//!
//! - **Memory**: O(v) where v = virtual nodes per target
//! - **Lookup**: O(log n) where n = total virtual nodes

use std::fmt;
use std::io::Write;

/// A virtual node on the hash ring: one position and the target owning it.
///
/// Entries of the sorted lookup index are virtual nodes, ordered by position.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VirtualNode<P, T> {
    /// Position on the ring.
    pub position: P,

    /// The target that owns this position.
    ///
    /// Many virtual nodes share a target; lookup collapses them into a
    /// single logical hit.
    pub target: T,
}

impl<P, T> VirtualNode<P, T> {
    /// Create a new virtual node.
    #[inline]
    pub fn new(position: P, target: T) -> Self {
        Self { position, target }
    }

    /// Get the position.
    #[inline]
    pub fn position(&self) -> &P {
        &self.position
    }

    /// Get the owning target.
    #[inline]
    pub fn target(&self) -> &T {
        &self.target
    }
}

impl<P: fmt::Debug, T: fmt::Debug> fmt::Display for VirtualNode<P, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VNode(position={:?}, target={:?})", self.position, self.target)
    }
}

/// Build the hash input for replica `index` of `target`.
///
/// # Arguments
/// * `target` - Raw target identifier bytes
/// * `index` - Replica index, `0 .. replicas * weight`
///
/// # Returns
/// `target` followed by the decimal digits of `index`
///
/// # Example
/// ```rust
/// use corelib::vnode::replica_key;
///
/// assert_eq!(replica_key(b"t-a", 7), b"t-a7".to_vec());
/// ```
pub fn replica_key(target: &[u8], index: usize) -> Vec<u8> {
    let mut key = Vec::with_capacity(target.len() + 20);
    key.extend_from_slice(target);
    // Writing into a Vec cannot fail.
    let _ = write!(key, "{}", index);
    key
}
