//! Error types shared by the table and the graph builder

use thiserror::Error;

/// Failures surfaced by `ProbingHashtable` and everything built on top of it.
///
/// A missing key is not an error: lookups and traversals report it as `None`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableError {
    /// The table was asked for zero slots.
    #[error("table capacity must be a positive integer")]
    ZeroCapacity,
    /// No empty slot was reached within the probe bound. The table does not resize.
    #[error("no free slot found after {attempts} probes in a table of capacity {capacity}")]
    CapacityExhausted {
        /// Number of slots in the table
        capacity: usize,
        /// Number of probes performed before giving up
        attempts: usize,
    },
    /// The probing function produced an index outside of the backing storage.
    #[error("probing function returned index {index} for a table of capacity {capacity}")]
    ProbeOutOfRange {
        /// The offending index
        index: usize,
        /// Number of slots in the table
        capacity: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_numbers() {
        let err = TableError::CapacityExhausted { capacity: 8, attempts: 8 };
        assert_eq!(err.to_string(), "no free slot found after 8 probes in a table of capacity 8");

        let err = TableError::ProbeOutOfRange { index: 9, capacity: 4 };
        assert!(err.to_string().contains("index 9"));
    }
}
