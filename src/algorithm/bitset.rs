//! Fixed-size membership set over small indices

use bitvec::prelude::*;

/// Fixed-size bitset tracking which tiles or slots are taken
///
/// Indices are zero-based; inserting past the capacity is ignored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexBitset {
    bits: BitVec,
}

impl IndexBitset {
    /// Create a bitset with nothing present
    pub fn new(capacity: usize) -> Self {
        Self {
            bits: bitvec![0; capacity],
        }
    }

    /// Insert an index
    pub fn insert(&mut self, index: usize) {
        if index < self.bits.len() {
            self.bits.set(index, true);
        }
    }

    /// Remove an index
    pub fn remove(&mut self, index: usize) {
        if index < self.bits.len() {
            self.bits.set(index, false);
        }
    }

    /// Test membership
    pub fn contains(&self, index: usize) -> bool {
        self.bits.get(index).as_deref() == Some(&true)
    }
}
