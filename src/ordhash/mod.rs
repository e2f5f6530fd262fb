//! OrdHashMap - A fixed capacity hash map that is always sorted
//!
//! This is an open addressing hash map with linear probing where the hash of
//! a key is its leading four bytes. Because that hash preserves key order, the
//! robin hood displacement that places each key also acts as an insertion
//! sort, and the slot array reads in ascending key order at all times. This
//! gives you `O(1)` expected point operations for well spread keys, and an
//! ordered scan that is a plain walk of one contiguous buffer.
//!
//! The map never resizes. It is built once with a power of two capacity and
//! an overflow margin of extra slots past the end, which gives displacement
//! chains in the last buckets somewhere to land. Inserting a new key when the
//! map holds `capacity` entries fails with [`OrdHashError::MapFull`].
//!
//! Keys are raw bytes. The byte `0xFF` is reserved to mark empty slots and is
//! rejected by every insert. Text keys are handled as their UTF-8 bytes; since
//! UTF-8 byte order matches code point order, the map order is still the
//! natural string order.
//!
//! Since the hash is not randomised, keys sharing a long common prefix all
//! land in one bucket and degrade to a sorted linear scan. This is a map for
//! keys whose leading bytes are spread across the key space.
//!
//! # Examples
//! ```
//! use ordhash::ordhash::OrdHashMap;
//!
//! let mut map = OrdHashMap::with_capacity(16).expect("Invalid capacity!");
//! map.put(b"pear", 3).unwrap();
//! map.put(b"apple", 1).unwrap();
//! map.put(b"fig", 2).unwrap();
//!
//! assert_eq!(map.get(b"fig"), Some(&2));
//! let keys: Vec<&[u8]> = map.keys().collect();
//! assert_eq!(keys, vec![&b"apple"[..], b"fig", b"pear"]);
//!
//! assert_eq!(map.remove(b"apple"), Some(1));
//! assert_eq!(map.len(), 2);
//! ```

use std::fmt::{self, Debug};

use tracing::debug;

use crate::error::OrdHashError;
use crate::internals::ordhash::key::validate_key;
use crate::internals::ordhash::states::Locate;
use crate::internals::ordhash::table::Table;

pub use crate::internals::ordhash::iter::{Iter, Keys, Range, Values};
pub use crate::internals::ordhash::key::RESERVED_BYTE;
pub use crate::internals::ordhash::states::GetOrPut;

/// The largest capacity a map can be built with. The hash prefix is 32 bits
/// wide, so there can be no more buckets than that.
pub const MAX_CAPACITY: u64 = 1 << 32;

/// The overflow margin used when none is configured. Roughly a fifth of the
/// capacity, plus a few slots so tiny maps have room too.
pub fn default_overflow(capacity: usize) -> usize {
    (capacity / 10) * 2 + 8
}

/// A builder for [`OrdHashMap`], allowing the overflow margin to be tuned.
///
/// ```
/// use ordhash::ordhash::OrdHashMapBuilder;
///
/// let map = OrdHashMapBuilder::new()
///     .set_capacity(64)
///     .set_overflow(32)
///     .build::<u64>()
///     .expect("Invalid map parameters!");
/// assert_eq!(map.capacity(), 64);
/// ```
#[derive(Debug, Default, Clone)]
pub struct OrdHashMapBuilder {
    capacity: Option<usize>,
    overflow: Option<usize>,
}

impl OrdHashMapBuilder {
    /// Create a new builder. A capacity must be set before calling `build`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of entries. This must be a power of two.
    pub fn set_capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Set the number of extra slots past the last bucket. If unset this is
    /// [`default_overflow`] of the capacity.
    pub fn set_overflow(mut self, overflow: usize) -> Self {
        self.overflow = Some(overflow);
        self
    }

    /// Consume this builder, returning a map if the parameters are valid.
    pub fn build<V>(self) -> Result<OrdHashMap<V>, OrdHashError> {
        let OrdHashMapBuilder { capacity, overflow } = self;

        let capacity = capacity.unwrap_or(0);
        if !capacity.is_power_of_two() || capacity as u64 > MAX_CAPACITY {
            return Err(OrdHashError::InvalidCapacity { capacity });
        }

        let overflow = overflow.unwrap_or_else(|| default_overflow(capacity));
        if capacity.checked_add(overflow).is_none() {
            return Err(OrdHashError::InvalidCapacity { capacity });
        }

        debug!(capacity, overflow, "building ordered hash map");
        Ok(OrdHashMap {
            table: Table::new(capacity, overflow),
        })
    }
}

/// Displacement statistics of a map, useful to judge how well the keys are
/// spread across the buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapStats {
    /// Number of entries.
    pub len: usize,
    /// Maximum number of entries.
    pub capacity: usize,
    /// Total slots, capacity plus overflow.
    pub slots: usize,
    /// The furthest any entry sits from its ideal bucket.
    pub max_displacement: usize,
    /// The sum of all entries' distances from their ideal buckets.
    pub total_displacement: usize,
}

/// A fixed capacity hash map with byte string keys that keeps its entries
/// in ascending key order.
///
/// All operations take the map by reference; mutation requires `&mut self`
/// so a scan can never observe a half finished insert or remove. If you need
/// to share one between threads, wrap it in a `Mutex`.
#[derive(Clone)]
pub struct OrdHashMap<V> {
    table: Table<V>,
}

impl<V> OrdHashMap<V> {
    /// Create a map holding up to `capacity` entries with the default
    /// overflow margin. `capacity` must be a power of two.
    pub fn with_capacity(capacity: usize) -> Result<Self, OrdHashError> {
        OrdHashMapBuilder::new().set_capacity(capacity).build()
    }

    /// The bucket `key` would occupy with no displacement. This is always in
    /// `0..capacity()`, and never decreases as keys increase.
    pub fn ideal_bucket(&self, key: &[u8]) -> usize {
        self.table.ideal_bucket(key)
    }

    /// Retrieve the value associated with `key`.
    pub fn get(&self, key: &[u8]) -> Option<&V> {
        self.table.get(key)
    }

    /// Retrieve a mutable reference to the value associated with `key`.
    pub fn get_mut(&mut self, key: &[u8]) -> Option<&mut V> {
        self.table.get_mut(key)
    }

    /// Assert if a key exists in the map.
    pub fn contains_key(&self, key: &[u8]) -> bool {
        self.get(key).is_some()
    }

    /// Find the slot for `key`, creating it with `default()` if absent.
    ///
    /// Returns whether the key already existed and the slot index it now
    /// occupies, which can be used with [`get_index`](Self::get_index) and
    /// [`get_index_mut`](Self::get_index_mut) until the next mutation.
    /// `default` is only called if the insert will succeed.
    pub fn get_or_put<F>(&mut self, key: &[u8], default: F) -> Result<GetOrPut, OrdHashError>
    where
        F: FnOnce() -> V,
    {
        validate_key(key)?;
        match self.table.locate(key) {
            Locate::Found(index) => Ok(GetOrPut {
                existed: true,
                index,
            }),
            Locate::Vacant(at) => self
                .table
                .insert_at_with(at, key, default)
                .map(|index| GetOrPut {
                    existed: false,
                    index,
                }),
        }
    }

    /// Insert or update `key` with `value`. If the key was present the previous
    /// value is returned.
    ///
    /// Fails without modifying the map if the key is invalid, or if the key is
    /// new and the map is full.
    pub fn put(&mut self, key: &[u8], value: V) -> Result<Option<V>, OrdHashError> {
        validate_key(key)?;
        match self.table.locate(key) {
            Locate::Found(index) => Ok(self
                .table
                .get_index_mut(index)
                .map(|d| std::mem::replace(&mut d.v, value))),
            Locate::Vacant(at) => self.table.insert_at(at, key, value).map(|_| None),
        }
    }

    /// Remove `key` from the map, returning its value if it was present.
    pub fn remove(&mut self, key: &[u8]) -> Option<V> {
        match self.table.locate(key) {
            Locate::Found(index) => self.table.remove_at(index),
            Locate::Vacant(_) => None,
        }
    }

    /// Access the entry in slot `index`, if that slot is occupied.
    pub fn get_index(&self, index: usize) -> Option<(&[u8], &V)> {
        self.table
            .get_index(index)
            .map(|d| (d.k.as_slice(), &d.v))
    }

    /// Mutably access the value in slot `index`, if that slot is occupied.
    pub fn get_index_mut(&mut self, index: usize) -> Option<&mut V> {
        self.table.get_index_mut(index).map(|d| &mut d.v)
    }

    /// Remove every entry. The table keeps its allocation.
    pub fn clear(&mut self) {
        self.table.clear()
    }

    /// The number of entries in the map.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Determine if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The maximum number of entries the map can hold.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Iterate over all entries in ascending key order. Use `.rev()` for
    /// descending order.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter::new(self.table.slots(), self.len())
    }

    /// Iterate over all entries in ascending key order.
    pub fn scan_ascending(&self) -> Iter<'_, V> {
        self.iter()
    }

    /// Iterate over all entries in descending key order.
    pub fn scan_descending(&self) -> std::iter::Rev<Iter<'_, V>> {
        self.iter().rev()
    }

    /// Iterate over the entries whose keys are greater than or equal to `key`,
    /// in ascending order.
    pub fn range_from(&self, key: &[u8]) -> Range<'_, V> {
        // Nothing at or above `key` can sit before its ideal bucket.
        let start = match self.table.locate(key) {
            Locate::Found(idx) | Locate::Vacant(idx) => idx,
        };
        Range::new(&self.table.slots()[start..])
    }

    /// The entry with the smallest key.
    pub fn first(&self) -> Option<(&[u8], &V)> {
        self.iter().next()
    }

    /// The entry with the largest key.
    pub fn last(&self) -> Option<(&[u8], &V)> {
        self.iter().next_back()
    }

    /// Iterate over the keys in ascending order.
    pub fn keys(&self) -> Keys<'_, V> {
        Keys::new(self.iter())
    }

    /// Iterate over the values in ascending key order.
    pub fn values(&self) -> Values<'_, V> {
        Values::new(self.iter())
    }

    /// Report how far entries have been displaced from their ideal buckets.
    pub fn stats(&self) -> MapStats {
        let (max_displacement, total_displacement) = self
            .table
            .slots()
            .iter()
            .enumerate()
            .filter_map(|(idx, s)| s.datum().map(|d| idx - self.table.ideal_bucket(&d.k)))
            .fold((0, 0), |(max, total), disp| (max.max(disp), total + disp));

        MapStats {
            len: self.len(),
            capacity: self.capacity(),
            slots: self.table.slots().len(),
            max_displacement,
            total_displacement,
        }
    }

    /// Check the internal invariants of the map: keys are strictly ascending,
    /// no entry sits before its ideal bucket, and the length is accurate.
    pub fn verify(&self) -> bool {
        self.table.verify()
    }
}

impl<V: Debug> Debug for OrdHashMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, V> IntoIterator for &'a OrdHashMap<V> {
    type Item = (&'a [u8], &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
