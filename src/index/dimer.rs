use crate::data::encoded::EncodedSequence;
use bitvec::prelude::*;

#[cfg(test)]
mod test;

/// Number of distinct dimer codes.
pub const DIMER_CODES: usize = 16;

/// Combines two adjacent 2-bit base codes into a dimer code. The earlier base
/// occupies bits 0-1 and the later base bits 2-3, matching the nibble a pair
/// of bases occupies in the packed layout.
#[inline]
#[must_use]
pub const fn dimer_code(prev: u8, cur: u8) -> u8 {
    (prev & 0b11) | ((cur & 0b11) << 2)
}

/// Inverted index from dimer code to the offsets at which that dimer starts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DimerIndex {
    sets: [BitVec; DIMER_CODES],
    len:  usize,
}

impl DimerIndex {
    /// Scans `seq` once, recording the start offset of every adjacent pair.
    /// Offsets skipped by lenient encoding break the pair tracking, so no
    /// dimer spans them.
    #[must_use]
    pub fn new(seq: &EncodedSequence) -> Self {
        let len = seq.len();
        let mut sets: [BitVec; DIMER_CODES] = std::array::from_fn(|_| bitvec![0; len]);
        let mut skipped = seq.skipped().iter().copied().peekable();

        let mut mask = 0u8;
        let mut primed = false;
        for i in 0..len {
            if skipped.next_if_eq(&i).is_some() {
                mask = 0;
                primed = false;
                continue;
            }

            mask >>= 2;
            mask |= seq.code(i) << 2;
            if primed {
                sets[mask as usize].set(i - 1, true);
            }
            primed = true;
        }

        DimerIndex { sets, len }
    }

    /// Length of the indexed sequence.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether dimer `code` starts at `pos`. Offsets past the end are never
    /// members.
    #[inline]
    #[must_use]
    pub fn contains(&self, code: u8, pos: usize) -> bool {
        self.sets[usize::from(code)].get(pos).is_some_and(|bit| *bit)
    }

    /// Start offsets of dimer `code` in increasing order.
    #[inline]
    pub fn iter(&self, code: u8) -> impl Iterator<Item = usize> + '_ {
        self.iter_from(code, 0)
    }

    /// Start offsets of dimer `code` that are `>= from`, in increasing
    /// order. Lets a scan resume part way through the sequence.
    #[inline]
    pub fn iter_from(&self, code: u8, from: usize) -> impl Iterator<Item = usize> + '_ {
        let from = from.min(self.len);
        self.sets[usize::from(code)][from..].iter_ones().map(move |i| i + from)
    }

    /// Number of occurrences of dimer `code`.
    #[inline]
    #[must_use]
    pub fn count(&self, code: u8) -> usize {
        self.sets[usize::from(code)].count_ones()
    }
}
