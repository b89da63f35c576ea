//! Hash ring data structure.
//!
//! # Layout
//!
//! ```text
//! target_positions: BTreeMap<Target, Vec<Position>>   deletion candidates per target
//! position_targets: HashMap<Position, Target>         source of truth for ownership
//! sorted:           Option<SortedIndex>               lazy lookup cache
//! ```
//!
//! Every mutation clears `sorted`; the next lookup rebuilds it.

use std::borrow::{Borrow, Cow};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use tracing::{debug, trace, warn};

use crate::error::{Result, RingError};
use crate::hasher::{Crc32Hasher, Hasher};
use crate::position::Target;
use crate::ring::index::SortedIndex;
use crate::vnode::{replica_key, VirtualNode};

/// Virtual nodes per unit of weight when no replica count is given.
pub const DEFAULT_REPLICAS: usize = 64;

/// Consistent hash ring mapping resources to targets.
///
/// Each target owns `replicas × weight` virtual nodes. A resource belongs to
/// the first virtual node at or after its own position, wrapping around past
/// the largest position.
///
/// The ring is a single-threaded structure: lookups refresh a cached index
/// and therefore take `&mut self`. Wrap it in a
/// [`SharedRing`](crate::ring::SharedRing) to share it between threads.
///
/// # Example
///
/// ```rust
/// use corelib::HashRing;
///
/// let mut ring = HashRing::new();
/// ring.add_target("cache-1")?.add_target("cache-2")?;
///
/// let primary = ring.lookup("object-42")?;
/// let fallbacks = ring.lookup_list("object-42", 2)?;
/// assert_eq!(fallbacks[0], primary);
/// # Ok::<(), corelib::RingError>(())
/// ```
#[derive(Clone)]
pub struct HashRing<T, H: Hasher = Crc32Hasher> {
    replicas: usize,
    hasher: H,
    target_positions: BTreeMap<T, Vec<H::Position>>,
    position_targets: HashMap<H::Position, T>,
    sorted: Option<SortedIndex<H::Position, T>>,
}

impl<T: Target> HashRing<T> {
    /// Create an empty ring with the CRC-32 hasher and 64 replicas.
    pub fn new() -> Self {
        Self::with_hasher(Crc32Hasher)
    }

    /// Start a [`RingBuilder`] with default settings.
    pub fn builder() -> RingBuilder<T> {
        RingBuilder::new()
    }
}

impl<T: Target> Default for HashRing<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Target, H: Hasher> HashRing<T, H> {
    /// Create an empty ring with the given hasher and 64 replicas.
    pub fn with_hasher(hasher: H) -> Self {
        Self::with_hasher_and_replicas(hasher, DEFAULT_REPLICAS)
    }

    /// Create an empty ring with the given hasher and replica count.
    ///
    /// A replica count of 0 falls back to [`DEFAULT_REPLICAS`].
    pub fn with_hasher_and_replicas(hasher: H, replicas: usize) -> Self {
        let replicas = if replicas == 0 {
            DEFAULT_REPLICAS
        } else {
            replicas
        };
        Self {
            replicas,
            hasher,
            target_positions: BTreeMap::new(),
            position_targets: HashMap::new(),
            sorted: None,
        }
    }

    /// Add a target with weight 1.
    ///
    /// # Errors
    /// [`RingError::DuplicateTarget`] if the target is already a member.
    pub fn add_target(&mut self, target: T) -> Result<&mut Self> {
        self.add_target_weighted(target, 1)
    }

    /// Add a target owning `replicas × weight` virtual nodes.
    ///
    /// A position already owned by another target is taken over by this one.
    /// The previous owner keeps the position in its own list but no longer
    /// receives lookups for it.
    ///
    /// # Errors
    /// [`RingError::DuplicateTarget`] if the target is already a member.
    /// [`RingError::InvalidWeight`] if `replicas × weight` overflows. The
    /// ring is left unchanged in both cases.
    pub fn add_target_weighted(&mut self, target: T, weight: usize) -> Result<&mut Self> {
        if self.target_positions.contains_key(&target) {
            return Err(RingError::duplicate(target.as_ref()));
        }

        let count = self
            .replicas
            .checked_mul(weight)
            .ok_or(RingError::InvalidWeight(weight))?;
        let mut positions = Vec::with_capacity(count);
        for index in 0..count {
            let position = self.hasher.hash(&replica_key(target.as_ref(), index));
            if let Some(previous) = self
                .position_targets
                .insert(position.clone(), target.clone())
            {
                if previous != target {
                    warn!(
                        ?position,
                        previous = %label(&previous),
                        current = %label(&target),
                        "position collision, later target takes over"
                    );
                }
            }
            positions.push(position);
        }

        debug!(target_id = %label(&target), weight, positions = count, "added target to ring");
        self.target_positions.insert(target, positions);
        self.sorted = None;

        Ok(self)
    }

    /// Add each target in order with weight 1.
    ///
    /// Stops at the first failure. Targets added before it stay in the ring.
    ///
    /// # Errors
    /// [`RingError::DuplicateTarget`] for the first duplicate encountered.
    pub fn add_targets<I>(&mut self, targets: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = T>,
    {
        for target in targets {
            self.add_target(target)?;
        }
        Ok(self)
    }

    /// Remove a target and release the positions it still owns.
    ///
    /// Positions from the target's list that another target has since taken
    /// over are left alone.
    ///
    /// # Errors
    /// [`RingError::UnknownTarget`] if the target is not a member.
    pub fn remove_target<Q>(&mut self, target: &Q) -> Result<&mut Self>
    where
        T: Borrow<Q>,
        Q: Ord + AsRef<[u8]> + ?Sized,
    {
        let positions = self
            .target_positions
            .remove(target)
            .ok_or_else(|| RingError::unknown(target.as_ref()))?;

        let mut released = 0usize;
        for position in &positions {
            let owned = self.position_targets.get(position).is_some_and(|owner| {
                let owner: &Q = owner.borrow();
                owner == target
            });
            if owned {
                self.position_targets.remove(position);
                released += 1;
            }
        }

        debug!(
            target_id = %String::from_utf8_lossy(target.as_ref()),
            released,
            skipped = positions.len() - released,
            "removed target from ring"
        );
        self.sorted = None;

        Ok(self)
    }

    /// All member targets in sorted order.
    pub fn all_targets(&self) -> Vec<T> {
        self.target_positions.keys().cloned().collect()
    }

    /// Resolve a resource to its primary target.
    ///
    /// # Errors
    /// [`RingError::EmptyRing`] if no target owns a position.
    pub fn lookup(&mut self, resource: impl AsRef<[u8]>) -> Result<T> {
        self.lookup_list(resource, 1)?
            .into_iter()
            .next()
            .ok_or(RingError::EmptyRing)
    }

    /// Resolve a resource to up to `count` distinct targets.
    ///
    /// The first element is the primary (what [`lookup`](Self::lookup)
    /// returns); the rest are fallbacks in clockwise ring order. The result
    /// never holds more entries than there are targets.
    ///
    /// # Errors
    /// [`RingError::InvalidCount`] if `count` is 0.
    pub fn lookup_list(&mut self, resource: impl AsRef<[u8]>, count: usize) -> Result<Vec<T>> {
        if let Some(targets) = self.shortcut(count)? {
            return Ok(targets);
        }

        let position = self.hasher.hash(resource.as_ref());
        let limit = count.min(self.target_positions.len());
        Ok(self.index().walk(&position, limit))
    }

    /// Like [`lookup_list`](Self::lookup_list), but only uses an already
    /// built index. Returns `Ok(None)` when the index would need a rebuild.
    pub(crate) fn cached_lookup_list(
        &self,
        resource: &[u8],
        count: usize,
    ) -> Result<Option<Vec<T>>> {
        if let Some(targets) = self.shortcut(count)? {
            return Ok(Some(targets));
        }

        let Some(index) = self.sorted.as_ref() else {
            return Ok(None);
        };
        let position = self.hasher.hash(resource);
        let limit = count.min(self.target_positions.len());
        Ok(Some(index.walk(&position, limit)))
    }

    /// Answers that need no index: bad counts, empty and single-target rings.
    fn shortcut(&self, count: usize) -> Result<Option<Vec<T>>> {
        if count == 0 {
            return Err(RingError::InvalidCount(count));
        }
        match self.target_positions.len() {
            0 => Ok(Some(Vec::new())),
            1 => Ok(Some(self.all_targets())),
            _ => Ok(None),
        }
    }

    /// The sorted index, rebuilt if a mutation cleared it.
    fn index(&mut self) -> &SortedIndex<H::Position, T> {
        let positions = &self.position_targets;
        self.sorted.get_or_insert_with(|| {
            let index = SortedIndex::build(positions);
            trace!(entries = index.len(), "rebuilt sorted ring index");
            index
        })
    }

    /// Build the sorted index now if it is cold.
    #[cfg(test)]
    pub(crate) fn warm_index(&mut self) {
        self.index();
    }

    /// True if the sorted index is currently cached.
    pub fn is_index_warm(&self) -> bool {
        self.sorted.is_some()
    }

    /// All live virtual nodes in ring order, building the index if needed.
    pub fn virtual_nodes(&mut self) -> &[VirtualNode<H::Position, T>] {
        self.index().entries()
    }

    /// Number of member targets.
    pub fn target_count(&self) -> usize {
        self.target_positions.len()
    }

    /// True if the ring has no targets.
    pub fn is_empty(&self) -> bool {
        self.target_positions.is_empty()
    }

    /// True if `target` is a member.
    pub fn contains_target<Q>(&self, target: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.target_positions.contains_key(target)
    }

    /// Positions generated for `target` when it was added.
    ///
    /// May include positions later taken over by other targets.
    pub fn positions_of<Q>(&self, target: &Q) -> Option<&[H::Position]>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.target_positions.get(target).map(Vec::as_slice)
    }

    /// Number of live positions on the ring.
    pub fn position_count(&self) -> usize {
        self.position_targets.len()
    }

    /// Virtual nodes per unit of weight.
    pub fn replicas(&self) -> usize {
        self.replicas
    }

    /// The hasher placing targets and resources.
    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Name of the hasher, for logs and diagnostics.
    pub fn hasher_name(&self) -> &'static str {
        self.hasher.name()
    }
}

impl<T: Target, H: Hasher> fmt::Debug for HashRing<T, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashRing")
            .field("hasher", &self.hasher.name())
            .field("replicas", &self.replicas)
            .field("targets", &self.target_positions.len())
            .field("positions", &self.position_targets.len())
            .field("index_warm", &self.sorted.is_some())
            .finish()
    }
}

fn label<T: Target>(target: &T) -> Cow<'_, str> {
    String::from_utf8_lossy(target.as_ref())
}

/// Builder for a populated [`HashRing`].
///
/// # Example
///
/// ```rust
/// use corelib::{HashRing, Md5Hasher};
///
/// let ring = HashRing::builder()
///     .with_hasher(Md5Hasher)
///     .with_replicas(16)
///     .add_target("node1")
///     .add_target_weighted("node2", 2)
///     .build()?;
/// assert_eq!(ring.position_count(), 48);
/// # Ok::<(), corelib::RingError>(())
/// ```
#[derive(Debug, Clone)]
pub struct RingBuilder<T, H = Crc32Hasher> {
    hasher: H,
    replicas: usize,
    targets: Vec<(T, usize)>,
}

impl<T: Target> RingBuilder<T> {
    /// Create a builder with the CRC-32 hasher and 64 replicas.
    pub fn new() -> Self {
        Self {
            hasher: Crc32Hasher,
            replicas: DEFAULT_REPLICAS,
            targets: Vec::new(),
        }
    }
}

impl<T: Target> Default for RingBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Target, H: Hasher> RingBuilder<T, H> {
    /// Swap the hasher.
    pub fn with_hasher<H2: Hasher>(self, hasher: H2) -> RingBuilder<T, H2> {
        RingBuilder {
            hasher,
            replicas: self.replicas,
            targets: self.targets,
        }
    }

    /// Set the replica count (0 means the default).
    pub fn with_replicas(mut self, replicas: usize) -> Self {
        self.replicas = replicas;
        self
    }

    /// Queue a target with weight 1.
    pub fn add_target(self, target: T) -> Self {
        self.add_target_weighted(target, 1)
    }

    /// Queue a target with an explicit weight.
    pub fn add_target_weighted(mut self, target: T, weight: usize) -> Self {
        self.targets.push((target, weight));
        self
    }

    /// Build the ring, inserting targets in the order they were queued.
    ///
    /// # Errors
    /// [`RingError::DuplicateTarget`] for the first target queued twice.
    pub fn build(self) -> Result<HashRing<T, H>> {
        let mut ring = HashRing::with_hasher_and_replicas(self.hasher, self.replicas);
        for (target, weight) in self.targets {
            ring.add_target_weighted(target, weight)?;
        }
        Ok(ring)
    }
}
