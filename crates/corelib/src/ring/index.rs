//! Sorted position index used for lookups.
//!
//! The index is a flat vector of virtual nodes sorted by position. A lookup
//! is a lower-bound binary search followed by a circular walk using modular
//! indexing, so resolving `k` distinct targets costs O(log n + steps) and
//! never materializes a rotated copy of the ring.

use std::collections::HashMap;

use crate::position::{Position, Target};
use crate::vnode::VirtualNode;

/// Immutable snapshot of the inverse mapping, sorted by position.
#[derive(Debug, Clone)]
pub struct SortedIndex<P, T> {
    entries: Vec<VirtualNode<P, T>>,
}

impl<P: Position, T: Target> SortedIndex<P, T> {
    /// Build the index from the position → target mapping.
    ///
    /// Positions are unique map keys, so ordering by position alone is a
    /// total order over the entries.
    pub fn build(positions: &HashMap<P, T>) -> Self {
        let mut entries: Vec<VirtualNode<P, T>> = positions
            .iter()
            .map(|(position, target)| VirtualNode::new(position.clone(), target.clone()))
            .collect();
        entries.sort_unstable_by(|a, b| a.position.cmp(&b.position));
        Self { entries }
    }

    /// Number of virtual nodes in the index.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the index holds no virtual nodes.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in ring order.
    pub fn entries(&self) -> &[VirtualNode<P, T>] {
        &self.entries
    }

    /// Index of the first entry whose position is `>= position`.
    ///
    /// Returns `len()` when every entry is smaller; the walk wraps that to 0.
    pub fn lower_bound(&self, position: &P) -> usize {
        self.entries.partition_point(|entry| entry.position < *position)
    }

    /// Collect up to `limit` distinct targets clockwise from `position`.
    ///
    /// Starts at the lower bound, wraps past the end back to the start and
    /// visits each entry at most once. Replicas of an already collected
    /// target are skipped, so the result preserves first-hit ring order.
    pub fn walk(&self, position: &P, limit: usize) -> Vec<T> {
        let len = self.entries.len();
        let mut found: Vec<T> = Vec::with_capacity(limit.min(len));
        if len == 0 || limit == 0 {
            return found;
        }

        let start = self.lower_bound(position);
        for step in 0..len {
            let entry = &self.entries[(start + step) % len];
            if found.contains(&entry.target) {
                continue;
            }
            found.push(entry.target.clone());
            if found.len() == limit {
                break;
            }
        }

        found
    }
}
