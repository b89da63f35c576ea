//! Thread-safe wrapper around [`HashRing`].
//!
//! Lookups on a warm index only take the read lock, so any number of them
//! run in parallel. The first lookup after a mutation upgrades to the write
//! lock once to rebuild the index. Mutations always take the write lock.

use std::borrow::Borrow;

use parking_lot::RwLock;

use crate::error::Result;
use crate::hasher::{Crc32Hasher, Hasher};
use crate::position::Target;
use crate::ring::ring::HashRing;

/// A [`HashRing`] behind a `parking_lot::RwLock`.
pub struct SharedRing<T, H: Hasher = Crc32Hasher> {
    inner: RwLock<HashRing<T, H>>,
}

impl<T: Target, H: Hasher> SharedRing<T, H> {
    /// Wrap an existing ring.
    pub fn new(ring: HashRing<T, H>) -> Self {
        Self {
            inner: RwLock::new(ring),
        }
    }

    /// Add a target with weight 1.
    pub fn add_target(&self, target: T) -> Result<()> {
        self.add_target_weighted(target, 1)
    }

    /// Add a target with an explicit weight.
    pub fn add_target_weighted(&self, target: T, weight: usize) -> Result<()> {
        self.inner.write().add_target_weighted(target, weight)?;
        Ok(())
    }

    /// Add targets in order; earlier insertions survive a failure.
    pub fn add_targets<I>(&self, targets: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        self.inner.write().add_targets(targets)?;
        Ok(())
    }

    /// Remove a target.
    pub fn remove_target<Q>(&self, target: &Q) -> Result<()>
    where
        T: Borrow<Q>,
        Q: Ord + AsRef<[u8]> + ?Sized,
    {
        self.inner.write().remove_target(target)?;
        Ok(())
    }

    /// All member targets in sorted order.
    pub fn all_targets(&self) -> Vec<T> {
        self.inner.read().all_targets()
    }

    /// Number of member targets.
    pub fn target_count(&self) -> usize {
        self.inner.read().target_count()
    }

    /// Resolve a resource to its primary target.
    pub fn lookup(&self, resource: impl AsRef<[u8]>) -> Result<T> {
        let resource = resource.as_ref();
        {
            let ring = self.inner.read();
            if let Some(targets) = ring.cached_lookup_list(resource, 1)? {
                if let Some(target) = targets.into_iter().next() {
                    return Ok(target);
                }
            }
        }
        self.inner.write().lookup(resource)
    }

    /// Resolve a resource to up to `count` distinct targets.
    pub fn lookup_list(&self, resource: impl AsRef<[u8]>, count: usize) -> Result<Vec<T>> {
        let resource = resource.as_ref();
        {
            let ring = self.inner.read();
            if let Some(targets) = ring.cached_lookup_list(resource, count)? {
                return Ok(targets);
            }
        }
        self.inner.write().lookup_list(resource, count)
    }

    /// Run `f` against the ring under the read lock.
    pub fn with_ring<R>(&self, f: impl FnOnce(&HashRing<T, H>) -> R) -> R {
        f(&self.inner.read())
    }

    /// Unwrap the ring.
    pub fn into_inner(self) -> HashRing<T, H> {
        self.inner.into_inner()
    }
}

impl<T: Target, H: Hasher> From<HashRing<T, H>> for SharedRing<T, H> {
    fn from(ring: HashRing<T, H>) -> Self {
        Self::new(ring)
    }
}
