//! The slot table. This is where the ordering and displacement invariants are
//! kept, everything above it only validates input and forwards.
//!
//! The table is `capacity + overflow` slots long. At all times:
//!
//! * occupied keys are strictly ascending from left to right,
//! * an entry never sits before its ideal bucket,
//! * at most `capacity` slots are occupied.
//!
//! The empty slot compares greater than every key, so a forward probe from a
//! key's ideal bucket always stops at the key, a greater key, or a hole.

use std::cmp::Ordering;
use std::mem;

use tracing::trace;

use super::key::{KeyBuf, Projection};
use super::states::Locate;
use crate::error::OrdHashError;
use crate::utils::slot_search_linear;

/// A stored K/V in the table.
#[derive(Debug, Clone)]
pub struct Datum<V> {
    /// The K in K:V.
    pub k: KeyBuf,
    /// The V in K:V.
    pub v: V,
}

#[derive(Debug, Clone)]
pub(crate) enum Slot<V> {
    Empty,
    Occupied(Datum<V>),
}

impl<V> Slot<V> {
    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }

    /// Compare the slot against a key. Empty is greater than any key.
    #[inline]
    pub(crate) fn cmp_key(&self, k: &[u8]) -> Ordering {
        match self {
            Slot::Empty => Ordering::Greater,
            Slot::Occupied(d) => d.k.as_slice().cmp(k),
        }
    }

    #[inline]
    pub(crate) fn datum(&self) -> Option<&Datum<V>> {
        match self {
            Slot::Empty => None,
            Slot::Occupied(d) => Some(d),
        }
    }

    #[inline]
    pub(crate) fn datum_mut(&mut self) -> Option<&mut Datum<V>> {
        match self {
            Slot::Empty => None,
            Slot::Occupied(d) => Some(d),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Table<V> {
    slots: Box<[Slot<V>]>,
    projection: Projection,
    capacity: usize,
    len: usize,
}

impl<V> Table<V> {
    /// `capacity` must be a power of two no larger than 2^32, and
    /// `capacity + overflow` must not overflow. The caller checks both.
    pub(crate) fn new(capacity: usize, overflow: usize) -> Self {
        let slots = (0..capacity + overflow).map(|_| Slot::Empty).collect();
        Table {
            slots,
            projection: Projection::new(capacity),
            capacity,
            len: 0,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub(crate) fn slots(&self) -> &[Slot<V>] {
        &self.slots
    }

    #[inline]
    pub(crate) fn ideal_bucket(&self, k: &[u8]) -> usize {
        self.projection.ideal_bucket(k)
    }

    /// Probe forward from the ideal bucket of `k`.
    pub(crate) fn locate(&self, k: &[u8]) -> Locate {
        let start = self.ideal_bucket(k);
        match slot_search_linear(&self.slots[start..], k) {
            Ok(off) => Locate::Found(start + off),
            Err(off) => Locate::Vacant(start + off),
        }
    }

    pub(crate) fn get(&self, k: &[u8]) -> Option<&V> {
        match self.locate(k) {
            Locate::Found(idx) => self.slots[idx].datum().map(|d| &d.v),
            Locate::Vacant(_) => None,
        }
    }

    pub(crate) fn get_mut(&mut self, k: &[u8]) -> Option<&mut V> {
        match self.locate(k) {
            Locate::Found(idx) => self.slots[idx].datum_mut().map(|d| &mut d.v),
            Locate::Vacant(_) => None,
        }
    }

    pub(crate) fn get_index(&self, idx: usize) -> Option<&Datum<V>> {
        self.slots.get(idx).and_then(Slot::datum)
    }

    pub(crate) fn get_index_mut(&mut self, idx: usize) -> Option<&mut Datum<V>> {
        self.slots.get_mut(idx).and_then(Slot::datum_mut)
    }

    /// Insert `k` at the vacant index `at` that `locate` returned for it.
    ///
    /// Every occupied slot from `at` up to the first hole moves one slot to the
    /// right: each displaced entry is carried to the next slot until the hole
    /// absorbs the chain. Since those entries only move forward they stay at or
    /// after their ideal bucket, and since `k` sorts between its neighbours the
    /// order holds. Nothing is touched unless the insert succeeds.
    pub(crate) fn insert_at(&mut self, at: usize, k: &[u8], v: V) -> Result<usize, OrdHashError> {
        self.insert_at_with(at, k, || v)
    }

    /// As `insert_at`, but the value is only built once the insert is known
    /// to succeed.
    pub(crate) fn insert_at_with<F>(&mut self, at: usize, k: &[u8], f: F) -> Result<usize, OrdHashError>
    where
        F: FnOnce() -> V,
    {
        if self.len >= self.capacity {
            return Err(OrdHashError::MapFull {
                capacity: self.capacity,
            });
        }

        let hole = self
            .slots
            .get(at..)
            .and_then(|tail| tail.iter().position(Slot::is_empty))
            .map(|off| at + off)
            .ok_or_else(|| OrdHashError::Overflow {
                bucket: self.ideal_bucket(k),
            })?;

        // Built before anything moves, so a panic in `f` leaves the table as it was.
        let datum = Datum { k: k.into(), v: f() };

        // The hole rotates down to `at`.
        self.slots[at..=hole].rotate_right(1);
        debug_assert!(self.slots[at].is_empty());
        self.slots[at] = Slot::Occupied(datum);
        self.len += 1;

        trace!(at, displaced = hole - at, len = self.len, "insert");
        Ok(at)
    }

    /// Remove the entry at `idx`, closing the gap with a backward shift.
    ///
    /// The entry after the gap moves back one slot only if that keeps it at or
    /// after its ideal bucket. The first entry that is already home, or the
    /// first hole, ends the chain and the gap becomes empty.
    pub(crate) fn remove_at(&mut self, idx: usize) -> Option<V> {
        if !matches!(self.slots.get(idx), Some(Slot::Occupied(_))) {
            return None;
        }

        let mut gap = idx;
        loop {
            let next = match self.slots.get(gap + 1).and_then(Slot::datum) {
                Some(d) => self.projection.ideal_bucket(&d.k),
                None => break,
            };
            if next > gap {
                break;
            }
            // The removed entry rides along to the end of the chain.
            self.slots.swap(gap, gap + 1);
            gap += 1;
        }

        let removed = mem::replace(&mut self.slots[gap], Slot::Empty);
        self.len -= 1;

        trace!(idx, shifted = gap - idx, len = self.len, "remove");
        match removed {
            Slot::Occupied(d) => Some(d.v),
            Slot::Empty => None,
        }
    }

    pub(crate) fn clear(&mut self) {
        self.slots.iter_mut().for_each(|s| *s = Slot::Empty);
        self.len = 0;
    }

    /// Check the ordering, displacement and capacity invariants, that every
    /// entry is reachable from its ideal bucket without crossing a hole, and
    /// that the length matches the occupied slots.
    pub(crate) fn verify(&self) -> bool {
        let mut count = 0;
        let mut prev: Option<&[u8]> = None;
        let mut last_hole: Option<usize> = None;
        for (idx, slot) in self.slots.iter().enumerate() {
            let d = match slot.datum() {
                Some(d) => d,
                None => {
                    last_hole = Some(idx);
                    continue;
                }
            };
            let k = d.k.as_slice();
            if super::key::validate_key(k).is_err() {
                return false;
            }
            if let Some(p) = prev {
                if p >= k {
                    return false;
                }
            }
            let ideal = self.ideal_bucket(k);
            if ideal > idx {
                return false;
            }
            if last_hole.is_some_and(|hole| hole >= ideal) {
                return false;
            }
            prev = Some(k);
            count += 1;
        }
        count == self.len && self.len <= self.capacity
    }
}
