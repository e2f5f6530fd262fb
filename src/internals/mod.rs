//! This module contains the internals of the map: the slot table, the key
//! projection and the iterators. Nothing here checks its inputs, that is the
//! job of the public wrapper in [`ordhash`](crate::ordhash).

pub mod ordhash;
