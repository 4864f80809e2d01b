/// Errors returned by [`ProbingTable`](crate::ProbingTable) operations.
///
/// Every variant describes a broken caller contract or a broken table invariant. None of them
/// are transient, so nothing in this crate retries an operation that failed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The requested capacity was zero.
    #[error("capacity must be at least 1, got {0}")]
    InvalidCapacity(usize),

    /// The requested load factor was not strictly between 0 and 1.
    #[error("load factor must be between 0 and 1 (exclusive), got {0}")]
    InvalidLoadFactor(f64),

    /// A key was absent where a concrete key is required.
    #[error("keys cannot be null")]
    NullKey,

    /// A bulk insert was given an absent source, or a source containing an absent key.
    #[error("source mapping and its keys cannot be null")]
    NullArgument,

    /// The probe sequence visited every slot without finding an empty or matching one.
    ///
    /// Growth keeps at least one slot free, so this indicates a broken table invariant.
    #[error("probe sequence exhausted all {capacity} slots ({len} entries)")]
    TableFull {
        /// The number of slots in the table.
        capacity: usize,
        /// The number of entries in the table.
        len: usize,
    },
}

impl Error {
    /// Returns `true` if the error came from invalid construction parameters.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidCapacity(_) | Error::InvalidLoadFactor(_))
    }

    /// Returns `true` if the error came from an absent key or source.
    pub fn is_null(&self) -> bool {
        matches!(self, Error::NullKey | Error::NullArgument)
    }
}
