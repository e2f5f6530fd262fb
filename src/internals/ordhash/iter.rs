//! Iterators for the map.

use std::iter::FusedIterator;
use std::slice;

use super::table::Slot;

/// Iterator over the entries of an `OrdHashMap` in key order. It is double
/// ended, so `.rev()` yields them in descending key order.
#[derive(Debug)]
pub struct Iter<'a, V> {
    length: usize,
    inner: slice::Iter<'a, Slot<V>>,
}

impl<V> Clone for Iter<'_, V> {
    fn clone(&self) -> Self {
        Iter {
            length: self.length,
            inner: self.inner.clone(),
        }
    }
}

impl<'a, V> Iter<'a, V> {
    /// `length` must be the number of occupied slots in `slots`.
    pub(crate) fn new(slots: &'a [Slot<V>], length: usize) -> Self {
        Iter {
            length,
            inner: slots.iter(),
        }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a [u8], &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let d = self.inner.by_ref().find_map(Slot::datum)?;
        self.length = self.length.saturating_sub(1);
        Some((d.k.as_slice(), &d.v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.length, Some(self.length))
    }
}

impl<V> DoubleEndedIterator for Iter<'_, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let d = self.inner.by_ref().rev().find_map(Slot::datum)?;
        self.length = self.length.saturating_sub(1);
        Some((d.k.as_slice(), &d.v))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<V> FusedIterator for Iter<'_, V> {}

/// Iterator over the entries from some key upwards, in key order. How many
/// entries remain is not tracked, so the size hint is only an upper bound.
#[derive(Debug)]
pub struct Range<'a, V> {
    inner: slice::Iter<'a, Slot<V>>,
}

impl<V> Clone for Range<'_, V> {
    fn clone(&self) -> Self {
        Range {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, V> Range<'a, V> {
    pub(crate) fn new(slots: &'a [Slot<V>]) -> Self {
        Range {
            inner: slots.iter(),
        }
    }
}

impl<'a, V> Iterator for Range<'a, V> {
    type Item = (&'a [u8], &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let d = self.inner.by_ref().find_map(Slot::datum)?;
        Some((d.k.as_slice(), &d.v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.inner.len()))
    }
}

impl<V> DoubleEndedIterator for Range<'_, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let d = self.inner.by_ref().rev().find_map(Slot::datum)?;
        Some((d.k.as_slice(), &d.v))
    }
}

impl<V> FusedIterator for Range<'_, V> {}

/// Iterator over the keys of an `OrdHashMap` in ascending order.
#[derive(Debug)]
pub struct Keys<'a, V> {
    iter: Iter<'a, V>,
}

impl<V> Clone for Keys<'_, V> {
    fn clone(&self) -> Self {
        Keys {
            iter: self.iter.clone(),
        }
    }
}

impl<'a, V> Keys<'a, V> {
    pub(crate) fn new(iter: Iter<'a, V>) -> Self {
        Keys { iter }
    }
}

impl<'a, V> Iterator for Keys<'a, V> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<V> DoubleEndedIterator for Keys<'_, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter.next_back().map(|(k, _)| k)
    }
}

impl<V> ExactSizeIterator for Keys<'_, V> {}

impl<V> FusedIterator for Keys<'_, V> {}

/// Iterator over the values of an `OrdHashMap`, ordered by their keys.
#[derive(Debug)]
pub struct Values<'a, V> {
    iter: Iter<'a, V>,
}

impl<V> Clone for Values<'_, V> {
    fn clone(&self) -> Self {
        Values {
            iter: self.iter.clone(),
        }
    }
}

impl<'a, V> Values<'a, V> {
    pub(crate) fn new(iter: Iter<'a, V>) -> Self {
        Values { iter }
    }
}

impl<'a, V> Iterator for Values<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<V> DoubleEndedIterator for Values<'_, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter.next_back().map(|(_, v)| v)
    }
}

impl<V> ExactSizeIterator for Values<'_, V> {}

impl<V> FusedIterator for Values<'_, V> {}
