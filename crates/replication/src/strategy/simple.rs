//! Simple replication strategy.
//!
//! Places N replicas sequentially around the ring (clockwise from the primary).
//! This is the simplest replication strategy and works well for:
//!
//! - Small clusters (< 10 targets)
//! - Single data center deployments
//! - When network topology doesn't matter
//!
//! # Algorithm
//!
//! 1. Find the primary target (clockwise search from the key's position)
//! 2. Continue clockwise to find N-1 more distinct targets
//! 3. Return the placement (primary first)
//!
//! Both steps are a single `lookup_list` call on the ring.
//!
//! # Limitations
//!
//! - Doesn't consider data center/rack placement
//! - May place replicas on targets in the same failure domain

use corelib::{HashRing, Hasher, RingError, Target};
use tracing::warn;

use crate::error::ReplicationError;
use crate::placement::ReplicaPlacement;
use crate::strategy::ReplicationStrategy;

/// Simple replication strategy: N replicas placed sequentially around the ring.
///
/// # Example
///
/// ```rust
/// use corelib::HashRing;
/// use replication::{ReplicationStrategy, SimpleStrategy};
///
/// let strategy = SimpleStrategy::new(3).unwrap();
/// let mut ring = HashRing::new();
/// ring.add_targets(["node1", "node2", "node3", "node4"]).unwrap();
///
/// let placement = strategy.replicas_for_key(&mut ring, b"my-key").unwrap();
/// assert_eq!(placement.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct SimpleStrategy {
    /// Number of replicas to create (including primary).
    replication_factor: usize,
}

impl SimpleStrategy {
    /// Create a new simple strategy with the given replication factor.
    ///
    /// # Arguments
    /// * `replication_factor` - Number of replicas (typically 1-5)
    ///   - 1: No replication (single copy)
    ///   - 3: Standard (primary + 2 replicas)
    ///   - 5: High availability (primary + 4 replicas)
    ///
    /// # Errors
    /// [`ReplicationError::InvalidFactor`] for a factor of 0.
    pub fn new(replication_factor: usize) -> Result<Self, ReplicationError> {
        if replication_factor == 0 {
            return Err(ReplicationError::InvalidFactor(replication_factor));
        }
        Ok(Self { replication_factor })
    }
}

impl Default for SimpleStrategy {
    /// Three replicas.
    fn default() -> Self {
        Self {
            replication_factor: 3,
        }
    }
}

impl ReplicationStrategy for SimpleStrategy {
    fn replication_factor(&self) -> usize {
        self.replication_factor
    }

    fn replicas_for_key<T: Target, H: Hasher>(
        &self,
        ring: &mut HashRing<T, H>,
        key: &[u8],
    ) -> Result<ReplicaPlacement<T>, ReplicationError> {
        let targets = ring.lookup_list(key, self.replication_factor)?;
        let placement = ReplicaPlacement::from_targets(targets).ok_or(RingError::EmptyRing)?;

        let shortfall = placement.shortfall(self.replication_factor);
        if shortfall > 0 {
            warn!(
                factor = self.replication_factor,
                available = placement.len(),
                "ring has too few targets for the replication factor"
            );
        }

        Ok(placement)
    }

    fn name(&self) -> &'static str {
        "SimpleStrategy"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_strategy_replication_factor() {
        let strategy = SimpleStrategy::new(3).unwrap();
        assert_eq!(strategy.replication_factor(), 3);
        assert_eq!(SimpleStrategy::default().replication_factor(), 3);
        assert_eq!(strategy.name(), "SimpleStrategy");
    }

    #[test]
    fn test_zero_factor_rejected() {
        assert_eq!(
            SimpleStrategy::new(0).unwrap_err(),
            ReplicationError::InvalidFactor(0)
        );
    }

    #[test]
    fn test_simple_strategy_replicas() {
        let mut ring = HashRing::new();
        ring.add_targets(["node1", "node2", "node3"]).unwrap();

        let strategy = SimpleStrategy::new(3).unwrap();
        let placement = strategy.replicas_for_key(&mut ring, b"test-key").unwrap();

        assert_eq!(placement.len(), 3);
        assert_eq!(placement.primary, ring.lookup("test-key").unwrap());
        // Should have unique targets
        let unique: std::collections::HashSet<_> = placement.iter().collect();
        assert_eq!(unique.len(), 3);
    }

    #[test]
    fn test_matches_lookup_list_order() {
        let mut ring = HashRing::new();
        ring.add_targets(["a", "b", "c", "d", "e"]).unwrap();

        let strategy = SimpleStrategy::new(4).unwrap();
        for i in 0..20 {
            let key = format!("key-{i}");
            let placement = strategy.replicas_for_key(&mut ring, key.as_bytes()).unwrap();
            assert_eq!(placement.into_vec(), ring.lookup_list(&key, 4).unwrap());
        }
    }

    #[test]
    fn test_under_replicated_ring() {
        let mut ring = HashRing::new();
        ring.add_targets(["a", "b"]).unwrap();

        let strategy = SimpleStrategy::new(3).unwrap();
        let placement = strategy.replicas_for_key(&mut ring, b"k").unwrap();
        assert_eq!(placement.len(), 2);
        assert_eq!(placement.shortfall(3), 1);
    }

    #[test]
    fn test_empty_ring() {
        let mut ring: HashRing<String> = HashRing::new();
        let strategy = SimpleStrategy::default();
        assert_eq!(
            strategy.replicas_for_key(&mut ring, b"k").unwrap_err(),
            ReplicationError::Ring(RingError::EmptyRing)
        );
    }
}
