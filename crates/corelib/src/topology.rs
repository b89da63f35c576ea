//! Ring topology analysis.
//!
//! Measures how resources spread over a ring and how much of that spread
//! changes between two ring states. Used for capacity checks and for
//! verifying the consistent-hashing guarantee when membership changes.

use std::borrow::Borrow;
use std::collections::BTreeMap;

use crate::error::Result;
use crate::hasher::Hasher;
use crate::position::Target;
use crate::ring::HashRing;

/// Per-target resource counts for a sample of resources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Distribution<T> {
    counts: BTreeMap<T, usize>,
    total: usize,
}

impl<T: Target> Distribution<T> {
    /// Resolve every resource on `ring` and count hits per target.
    ///
    /// Every member appears in the result, including members with no hits.
    ///
    /// # Errors
    /// Propagates lookup failures, e.g. [`RingError::EmptyRing`](crate::RingError::EmptyRing)
    /// when resources are given for an empty ring.
    pub fn measure<H, I, R>(ring: &mut HashRing<T, H>, resources: I) -> Result<Self>
    where
        H: Hasher,
        I: IntoIterator<Item = R>,
        R: AsRef<[u8]>,
    {
        let mut counts: BTreeMap<T, usize> =
            ring.all_targets().into_iter().map(|t| (t, 0)).collect();
        let mut total = 0;
        for resource in resources {
            *counts.entry(ring.lookup(resource)?).or_insert(0) += 1;
            total += 1;
        }
        Ok(Self { counts, total })
    }

    /// Hits per target, sorted by target.
    pub fn counts(&self) -> &BTreeMap<T, usize> {
        &self.counts
    }

    /// Hits for one target (0 for unknown targets).
    pub fn count<Q>(&self, target: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.counts.get(target).copied().unwrap_or(0)
    }

    /// Number of resources measured.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Fraction of resources owned by `target`, in `0.0..=1.0`.
    pub fn share<Q>(&self, target: &Q) -> f64
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        if self.total == 0 {
            return 0.0;
        }
        self.count(target) as f64 / self.total as f64
    }

    /// Largest share held by any single target.
    pub fn max_share(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let max = self.counts.values().copied().max().unwrap_or(0);
        max as f64 / self.total as f64
    }

    /// Members that received no resources.
    pub fn idle_targets(&self) -> Vec<&T> {
        self.counts
            .iter()
            .filter(|&(_, &count)| count == 0)
            .map(|(target, _)| target)
            .collect()
    }
}

/// Fraction of `resources` whose primary target differs between two rings.
///
/// Returns 0.0 for an empty resource set.
///
/// # Errors
/// Propagates lookup failures from either ring.
pub fn remapped_fraction<T, H1, H2, I, R>(
    before: &mut HashRing<T, H1>,
    after: &mut HashRing<T, H2>,
    resources: I,
) -> Result<f64>
where
    T: Target,
    H1: Hasher,
    H2: Hasher,
    I: IntoIterator<Item = R>,
    R: AsRef<[u8]>,
{
    let mut total = 0usize;
    let mut moved = 0usize;
    for resource in resources {
        let resource = resource.as_ref();
        if before.lookup(resource)? != after.lookup(resource)? {
            moved += 1;
        }
        total += 1;
    }
    if total == 0 {
        return Ok(0.0);
    }
    Ok(moved as f64 / total as f64)
}
