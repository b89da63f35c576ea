//! Error types for replication.

use corelib::RingError;

/// Errors that can occur while placing replicas.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReplicationError {
    /// The underlying ring lookup failed.
    #[error(transparent)]
    Ring(#[from] RingError),

    /// A replication factor of zero was requested.
    #[error("invalid replication factor {0}, must be at least 1")]
    InvalidFactor(usize),
}
