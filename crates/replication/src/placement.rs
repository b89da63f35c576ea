//! Replica placement results.

/// Where the replicas of one key live.
///
/// The primary is the target a plain lookup returns. Fallbacks follow in
/// clockwise ring order and are the failover sequence when the primary is
/// unavailable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplicaPlacement<T> {
    pub primary: T,
    pub fallbacks: Vec<T>,
}

impl<T> ReplicaPlacement<T> {
    /// Split an ordered lookup result into primary and fallbacks.
    ///
    /// Returns `None` for an empty list.
    pub fn from_targets(targets: Vec<T>) -> Option<Self> {
        let mut iter = targets.into_iter();
        let primary = iter.next()?;
        Some(Self {
            primary,
            fallbacks: iter.collect(),
        })
    }

    /// Number of replicas, primary included.
    pub fn len(&self) -> usize {
        1 + self.fallbacks.len()
    }

    /// Always false: a placement has at least its primary.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Replicas missing relative to `factor`.
    pub fn shortfall(&self, factor: usize) -> usize {
        factor.saturating_sub(self.len())
    }

    /// All replicas, primary first.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        std::iter::once(&self.primary).chain(self.fallbacks.iter())
    }

    /// All replicas as a vector, primary first.
    pub fn into_vec(self) -> Vec<T> {
        let mut all = Vec::with_capacity(self.len());
        all.push(self.primary);
        all.extend(self.fallbacks);
        all
    }
}
