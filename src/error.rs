//! Errors returned by the fallible map operations.

use std::error::Error;
use std::fmt;

/// The reasons an [`OrdHashMap`](crate::ordhash::OrdHashMap) operation can be
/// refused. Whenever one of these is returned the map is exactly as it was
/// before the call.
///
/// A missing key is not an error, lookups and removals return `None` for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrdHashError {
    /// A new key was inserted while `len == capacity`.
    MapFull {
        /// The capacity of the map that refused the insert.
        capacity: usize,
    },
    /// The key contains the reserved `0xFF` byte.
    InvalidKey {
        /// Offset of the first `0xFF` byte in the key.
        position: usize,
    },
    /// There is no empty slot between the insertion point and the end of the
    /// table, so the displacement chain has nowhere to land. Raise the
    /// overflow margin if your keys cluster at the top of the key space.
    Overflow {
        /// The ideal bucket of the key being inserted.
        bucket: usize,
    },
    /// The requested capacity is zero, not a power of two, or too large.
    InvalidCapacity {
        /// The capacity that was requested.
        capacity: usize,
    },
}

impl fmt::Display for OrdHashError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrdHashError::MapFull { capacity } => {
                write!(f, "map is full ({} entries)", capacity)
            }
            OrdHashError::InvalidKey { position } => {
                write!(f, "key contains reserved byte 0xFF at offset {}", position)
            }
            OrdHashError::Overflow { bucket } => write!(
                f,
                "no free slot after bucket {} before the end of the table",
                bucket
            ),
            OrdHashError::InvalidCapacity { capacity } => write!(
                f,
                "capacity {} must be a non-zero power of two no larger than 2^32",
                capacity
            ),
        }
    }
}

impl Error for OrdHashError {}
