//! Error types for the core library.

/// Result type alias for the core library.
pub type Result<T> = std::result::Result<T, RingError>;

/// Errors raised by ring operations.
///
/// Every variant is a caller contract violation. None of them are transient,
/// so nothing inside the ring retries or recovers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RingError {
    /// The target is already a member of the ring.
    #[error("target '{0}' already exists")]
    DuplicateTarget(String),

    /// The target is not a member of the ring.
    #[error("target '{0}' does not exist")]
    UnknownTarget(String),

    /// A lookup was attempted on a ring without targets.
    #[error("no targets exist")]
    EmptyRing,

    /// `lookup_list` was asked for zero targets.
    #[error("invalid count requested: {0}")]
    InvalidCount(usize),

    /// The weight times the replica count does not fit in `usize`.
    #[error("invalid weight: {0}")]
    InvalidWeight(usize),
}

impl RingError {
    /// Creates a `DuplicateTarget` error from raw target bytes.
    pub fn duplicate(target: &[u8]) -> Self {
        RingError::DuplicateTarget(String::from_utf8_lossy(target).into_owned())
    }

    /// Creates an `UnknownTarget` error from raw target bytes.
    pub fn unknown(target: &[u8]) -> Self {
        RingError::UnknownTarget(String::from_utf8_lossy(target).into_owned())
    }
}
