use crate::data::{base::Base, encoded::EncodedSequence};
use bitvec::prelude::*;
use std::ops::Range;

/// Per-base occupancy of a window of length `k`: bit `i` of the vector for
/// base `b` is set when local offset `i` holds `b`. Exactly one of the four
/// vectors has each bit set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonomerWindowBitset {
    bits: [BitVec; 4],
    k:    usize,
}

impl MonomerWindowBitset {
    /// Builds the bitset for `seq[start..start + k]`.
    ///
    /// ## Panics
    ///
    /// Panics if the window runs past the end of `seq`.
    #[must_use]
    pub fn from_window(seq: &EncodedSequence, start: usize, k: usize) -> Self {
        let mut bits: [BitVec; 4] = std::array::from_fn(|_| bitvec![0; k]);
        for c in 0..k {
            bits[usize::from(seq.code(start + c))].set(c, true);
        }
        MonomerWindowBitset { bits, k }
    }

    #[inline]
    #[must_use]
    pub fn k(&self) -> usize {
        self.k
    }

    /// Whether local offset `i` holds `base`.
    #[inline]
    #[must_use]
    pub fn get(&self, base: Base, i: usize) -> bool {
        self.holds(base.code(), i)
    }

    #[inline]
    pub(crate) fn holds(&self, code: u8, i: usize) -> bool {
        self.bits[usize::from(code)][i]
    }

    /// Slides the window by one base: every offset moves one step towards
    /// zero, the base at offset 0 leaves, and `code` enters at offset `k - 1`.
    #[inline]
    pub fn advance(&mut self, code: u8) {
        for v in &mut self.bits {
            v.shift_left(1);
        }
        self.bits[usize::from(code)].set(self.k - 1, true);
    }

    /// Occurrences of `code` within the local offsets in `range`.
    #[inline]
    pub(crate) fn count_in(&self, code: u8, range: Range<usize>) -> usize {
        self.bits[usize::from(code)][range].count_ones()
    }

    /// Occurrences per base code over the whole window.
    #[inline]
    #[must_use]
    pub fn counts(&self) -> [usize; 4] {
        std::array::from_fn(|b| self.bits[b].count_ones())
    }
}
