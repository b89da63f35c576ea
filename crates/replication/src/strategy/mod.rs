//! Replication strategy abstractions.
//!
//! Replication strategies determine how many replicas to create and where
//! to place them on the ring.
//!
//! - **SimpleStrategy**: N replicas placed sequentially around the ring

pub mod simple;

pub use simple::SimpleStrategy;

use corelib::{HashRing, Hasher, Target};

use crate::error::ReplicationError;
use crate::placement::ReplicaPlacement;

/// Trait for replication strategies.
///
/// Generic over the ring's target and hasher types, so strategies are used
/// through concrete types rather than trait objects.
pub trait ReplicationStrategy {
    /// Get the number of replicas this strategy creates.
    fn replication_factor(&self) -> usize;

    /// Find replica targets for a given key.
    ///
    /// # Arguments
    /// * `ring` - The hash ring to query
    /// * `key` - The key to find replicas for
    ///
    /// # Returns
    /// The placement, primary first. Holds fewer than
    /// `replication_factor()` replicas when the ring has fewer targets.
    ///
    /// # Errors
    /// [`ReplicationError::Ring`] when the ring is empty.
    fn replicas_for_key<T: Target, H: Hasher>(
        &self,
        ring: &mut HashRing<T, H>,
        key: &[u8],
    ) -> Result<ReplicaPlacement<T>, ReplicationError>;

    /// Get the strategy name (for logging/debugging).
    fn name(&self) -> &'static str;
}
