//! The ordered robin hood table. The public face of this is
//! [`OrdHashMap`](crate::ordhash::OrdHashMap), which owns one `Table` and
//! validates keys before they get here.
//!
//! The hash is nothing more than the leading four bytes of the key, so
//! bucket order is key order. That is what lets a single flat array be both a
//! hash table and a sorted run of keys.

pub mod iter;
pub mod key;
pub(crate) mod states;
pub(crate) mod table;
