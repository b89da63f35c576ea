//! Core hasher trait definitions.

use crate::position::Position;

/// A hasher converts bytes into positions for placement on the hash ring.
///
/// Implementations must be pure: the same input yields the same position in
/// every process, forever. The ring relies on nothing beyond ordering and
/// equality of the produced positions, so uniformity is a quality concern of
/// the hasher and not a correctness requirement.
pub trait Hasher {
    /// The position type produced by this hasher.
    type Position: Position;

    /// Converts a byte sequence into a ring position.
    ///
    /// # Arguments
    ///
    /// * `value` - Target replica key or resource key
    ///
    /// # Returns
    ///
    /// The position on the ring
    fn hash(&self, value: &[u8]) -> Self::Position;

    /// Returns the name of this hasher.
    fn name(&self) -> &'static str;
}
