//! Sparse set of NFA node ids with O(1) clear.
//!
//! Based on: https://research.swtch.com/sparse
//!
//! The closure computations in subset construction run once per DFA state
//! and input byte, each against the same NFA. Keeping one set sized to the
//! arena and clearing it in O(1) avoids reallocating a visited set every
//! time. Insertion order is preserved, which is the order nodes were
//! discovered in.

use super::arena::StateId;

/// A set of `StateId`s below a fixed capacity.
#[derive(Clone, Debug)]
pub struct StateSet {
    len: usize,
    /// Members in insertion order.
    dense: Vec<StateId>,
    /// An id is a member iff `sparse[id] < len && dense[sparse[id]] == id`.
    sparse: Vec<usize>,
}

impl StateSet {
    /// Create a set able to hold ids in `[0, capacity)`.
    pub fn new(capacity: usize) -> Self {
        StateSet {
            len: 0,
            dense: vec![StateId::from_index(0); capacity],
            sparse: vec![0; capacity],
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.dense.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert an id. Returns true if it was not already present.
    ///
    /// Panics if the id is outside the capacity.
    #[inline]
    pub fn insert(&mut self, id: StateId) -> bool {
        if self.contains(id) {
            return false;
        }
        self.dense[self.len] = id;
        self.sparse[id.index()] = self.len;
        self.len += 1;
        true
    }

    #[inline]
    pub fn contains(&self, id: StateId) -> bool {
        let idx = self.sparse[id.index()];
        idx < self.len && self.dense[idx] == id
    }

    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Members in insertion order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = StateId> + '_ {
        self.dense[..self.len].iter().copied()
    }

    /// Members sorted by id, as an owned identifier.
    pub fn to_sorted(&self) -> Box<[StateId]> {
        let mut ids = self.dense[..self.len].to_vec();
        ids.sort_unstable();
        ids.into_boxed_slice()
    }
}
