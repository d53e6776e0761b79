//! Error type shared by every container in the crate.
//!
//! Only growth can fail: lookups and removals on a missing key or index report
//! absence through `Option`, and fixed-capacity containers hand a rejected
//! element back through `Result<(), T>` instead of dropping it.

use std::collections::TryReserveError;

use thiserror::Error;

/// Failure of a fallible container operation.
///
/// Whenever one of these is returned the container is left exactly as it was
/// before the call: `len` and `capacity` are never updated for a write that did
/// not happen.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionError {
    /// The allocator could not provide room for `requested` slots.
    #[error("failed to allocate room for {requested} slots")]
    AllocationFailed {
        requested: usize,
        #[source]
        source: TryReserveError,
    },

    /// Computing the next capacity overflowed `usize`.
    #[error("capacity computation overflowed")]
    CapacityOverflow,

    /// An index was past the end of the container.
    #[error("index {index} is out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// A fixed-capacity container was configured with no slots.
    #[error("capacity must be at least one slot")]
    ZeroCapacity,
}

impl CollectionError {
    pub(crate) fn alloc(requested: usize, source: TryReserveError) -> Self {
        log::debug!("allocation of {requested} slots failed: {source}");
        CollectionError::AllocationFailed { requested, source }
    }
}

/// Crate-wide result alias.
pub type Result<T, E = CollectionError> = core::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let err = CollectionError::IndexOutOfBounds { index: 4, len: 2 };
        assert_eq!(err.to_string(), "index 4 is out of bounds for length 2");
        assert_eq!(
            CollectionError::ZeroCapacity.to_string(),
            "capacity must be at least one slot"
        );
    }

    #[test]
    fn test_error_allocation_failure_keeps_source() {
        use std::error::Error as _;

        let source = Vec::<u64>::new().try_reserve(usize::MAX).unwrap_err();
        let err = CollectionError::alloc(usize::MAX, source);
        assert!(matches!(err, CollectionError::AllocationFailed { .. }));
        assert!(err.source().is_some());
    }
}
