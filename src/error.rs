//! Error types for allocation operations
//!
//! Allocation failures are routine, expected outcomes that callers must
//! handle locally, so they are expressed as values rather than panics or
//! unwinding.

use thiserror::Error;

/// Result type for allocation operations
pub type AllocResult<T> = Result<T, AllocError>;

/// Allocation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AllocError {
    /// A request asked for more elements than the allocator has left.
    ///
    /// Recoverable: the allocator's state is unchanged and the caller
    /// can retry after releasing memory, or abandon the operation.
    #[error("capacity exhausted: requested {requested} elements, {remaining} remaining")]
    CapacityExhausted {
        /// Number of elements requested.
        requested: usize,
        /// Number of elements still allocatable.
        remaining: usize,
    },

    /// A deallocation would push the free count above the total capacity.
    ///
    /// Indicates a caller bug (double free or mismatched count). The
    /// allocator's accounting is left untouched when this is returned,
    /// but the caller should treat the condition as unrecoverable.
    #[error("accounting overflow: returning {count} elements would exceed capacity {capacity}")]
    AccountingOverflow {
        /// Number of elements the caller tried to return.
        count: usize,
        /// Total element capacity of the allocator.
        capacity: usize,
    },

    /// The backing storage for an allocator could not be reserved.
    ///
    /// Fatal to the instance being constructed: no partially usable
    /// allocator exists after this is returned.
    #[error("storage reservation of {bytes} bytes failed")]
    StorageReservation {
        /// Size of the reservation that failed, in bytes.
        bytes: usize,
    },

    /// The requested arena layout cannot be expressed on this platform.
    #[error("arena layout overflow: {elements} elements of {element_size} bytes each")]
    LayoutOverflow {
        /// Requested element capacity.
        elements: usize,
        /// Size of a single element in bytes.
        element_size: usize,
    },
}

impl AllocError {
    /// Returns `true` if this is a capacity-exhaustion error.
    pub fn is_capacity_exhausted(&self) -> bool {
        matches!(self, Self::CapacityExhausted { .. })
    }

    /// Returns `true` if this is an accounting-overflow error.
    pub fn is_accounting_overflow(&self) -> bool {
        matches!(self, Self::AccountingOverflow { .. })
    }

    /// Returns `true` if this error was fatal to allocator construction.
    pub fn is_reservation_failure(&self) -> bool {
        matches!(
            self,
            Self::StorageReservation { .. } | Self::LayoutOverflow { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_predicates() {
        let exhausted = AllocError::CapacityExhausted {
            requested: 11,
            remaining: 10,
        };
        assert!(exhausted.is_capacity_exhausted());
        assert!(!exhausted.is_accounting_overflow());

        let overflow = AllocError::AccountingOverflow {
            count: 2,
            capacity: 20,
        };
        assert!(overflow.is_accounting_overflow());

        assert!(AllocError::StorageReservation { bytes: 160 }.is_reservation_failure());
        assert!(AllocError::LayoutOverflow {
            elements: usize::MAX,
            element_size: 8
        }
        .is_reservation_failure());
    }

    #[test]
    fn error_display() {
        let err = AllocError::CapacityExhausted {
            requested: 11,
            remaining: 10,
        };
        assert_eq!(
            err.to_string(),
            "capacity exhausted: requested 11 elements, 10 remaining"
        );
    }
}
