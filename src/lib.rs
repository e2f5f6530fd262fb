//! ordhash - Ordered Robin Hood Hashing
//!
//! A fixed capacity hash map whose slot array is always in ascending key
//! order. The "hash" of a key is its leading four bytes, so the ideal bucket
//! of a key is also a coarse estimate of its rank. Insertion uses a robin hood
//! displacement chain that doubles as an insertion sort, and deletion closes
//! gaps with a backward shift, so the table never needs a separate sort to be
//! scanned in order.
//!
//! You get hash map point operations and `BTreeMap` style ordered scans from
//! one flat buffer, in exchange for a fixed capacity and a dependency on your
//! keys being well spread across their leading bytes.
//!
//! The map is single threaded. It does no internal locking; mutation takes
//! `&mut self`, so if you need to share it, wrap it in a `Mutex`.
//!
//! ```
//! use ordhash::OrdHashMap;
//!
//! let mut map = OrdHashMap::with_capacity(8).expect("Invalid capacity!");
//! map.put(b"b", 2).unwrap();
//! map.put(b"a", 1).unwrap();
//!
//! let ordered: Vec<_> = map.iter().collect();
//! assert_eq!(ordered, vec![(&b"a"[..], &1), (&b"b"[..], &2)]);
//! ```

#![deny(warnings)]
#![warn(unused_extern_crates)]
#![warn(missing_docs)]
#![allow(clippy::needless_lifetimes)]

pub mod error;
pub use error::OrdHashError;

// This is where the unchecked parts live.
pub(crate) mod internals;
mod utils;

pub mod ordhash;
pub use ordhash::{OrdHashMap, OrdHashMapBuilder};
