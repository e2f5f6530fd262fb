use std::cmp::Ordering;

use crate::internals::ordhash::table::Slot;

/// Walk the slots in order until one is not less than `k`. Returns `Ok(idx)` on
/// an exact match, or `Err(idx)` of the first greater or empty slot. If every
/// slot is less than `k` this is `Err(slice.len())`.
pub(crate) fn slot_search_linear<V>(slice: &[Slot<V>], k: &[u8]) -> Result<usize, usize> {
    for (idx, slot) in slice.iter().enumerate() {
        match slot.cmp_key(k) {
            Ordering::Less => {}
            Ordering::Equal => return Ok(idx),
            Ordering::Greater => return Err(idx),
        }
    }
    Err(slice.len())
}
