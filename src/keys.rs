//! Sequential node keys.
//!
//! Every node in a generated tree carries a key that is unique within one
//! traversal. Keys are handed out by a [`KeyGenerator`] owned by the
//! [`TreeBuilder`](crate::tree::TreeBuilder): the counter starts at zero and is
//! incremented *before* each assignment, so the first key is `1` and a tree of
//! `N` nodes uses exactly `1..=N`.
//!
//! The generator is plain owned state, threaded through the recursion by
//! `&mut`. Two builders never share a counter, so building twice in one process
//! numbers both trees from `1`.

/// Pre-incrementing key counter.
#[derive(Debug, Default, Clone)]
pub struct KeyGenerator {
    last: u64,
}

impl KeyGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the next key. The first call returns `1`.
    pub fn next_key(&mut self) -> u64 {
        self.last += 1;
        self.last
    }

    /// Number of keys handed out so far (equal to the last key issued).
    pub fn issued(&self) -> u64 {
        self.last
    }
}
