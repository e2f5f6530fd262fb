/// The outcome of probing the table for a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Locate {
    /// The key is stored at this index.
    Found(usize),
    /// The key is absent. This is the first index at or after the ideal bucket
    /// holding a greater key or the empty slot, which is where the key would
    /// be inserted. It may equal the table length if the probe ran off the end.
    Vacant(usize),
}

/// The result of [`get_or_put`](crate::ordhash::OrdHashMap::get_or_put).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetOrPut {
    /// `true` if the key was already present and nothing moved.
    pub existed: bool,
    /// The slot now holding the key. Valid until the next mutation.
    pub index: usize,
}
