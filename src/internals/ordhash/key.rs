//! Key handling: validation of the reserved byte, the order preserving hash
//! prefix, and the projection of that prefix onto a bucket.

use smallvec::SmallVec;

use crate::error::OrdHashError;

/// The byte value reserved for the empty slot. It may never appear in a key.
pub const RESERVED_BYTE: u8 = 0xFF;

/// How many leading key bytes feed the hash prefix.
pub(crate) const PREFIX_LEN: usize = 4;

/// Keys up to this many bytes are stored inline in the slot.
pub(crate) const KEY_INLINE: usize = 16;

pub(crate) type KeyBuf = SmallVec<[u8; KEY_INLINE]>;

/// Reject keys containing the reserved byte. Such a key would compare at or
/// above the empty slot and break both ordering and probe termination.
pub(crate) fn validate_key(key: &[u8]) -> Result<(), OrdHashError> {
    match key.iter().position(|b| *b == RESERVED_BYTE) {
        Some(position) => Err(OrdHashError::InvalidKey { position }),
        None => Ok(()),
    }
}

/// Pack the first four bytes of the key big-endian into a `u32`, zero padding
/// short keys. Comparing two prefixes gives the same answer as comparing the
/// leading four bytes of the keys, so `a < b` implies `prefix(a) <= prefix(b)`.
#[inline]
pub(crate) fn hash_prefix(key: &[u8]) -> u32 {
    let mut buf = [0u8; PREFIX_LEN];
    let n = key.len().min(PREFIX_LEN);
    buf[..n].copy_from_slice(&key[..n]);
    u32::from_be_bytes(buf)
}

/// Maps a hash prefix to its ideal bucket by keeping the top `log2(capacity)`
/// bits. The shift is fixed when the table is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Projection {
    shift: u32,
}

impl Projection {
    /// `capacity` must be a power of two in `1..=2^32`.
    pub(crate) fn new(capacity: usize) -> Self {
        debug_assert!(capacity.is_power_of_two());
        debug_assert!(capacity.trailing_zeros() <= 32);
        Projection {
            shift: 32 - capacity.trailing_zeros(),
        }
    }

    #[inline]
    pub(crate) fn project(&self, prefix: u32) -> usize {
        // Widen first, a shift of 32 is valid on u64 and yields bucket 0.
        (u64::from(prefix) >> self.shift) as usize
    }

    #[inline]
    pub(crate) fn ideal_bucket(&self, key: &[u8]) -> usize {
        self.project(hash_prefix(key))
    }
}
