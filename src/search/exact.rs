use crate::{
    data::{
        base::{Orientation, code_at, pack_pattern, packed_len, set_code},
        encoded::EncodedSequence,
        err::{NessieError, check_interval},
    },
    index::{DimerIndex, dimer_code},
    kmer::KmerRecord,
};
use bitvec::prelude::*;
use log::trace;

/// Number of candidate start positions examined per batch.
pub const DEFAULT_BATCH_STEP: usize = 5_000_000;

/// Exact substring search over one encoded sequence, backed by a
/// [`DimerIndex`] built once at construction.
///
/// The searcher also keeps a whole-sequence bitset, initially all ones, in
/// which every confirmed start position is cleared. It is exposed through
/// [`ExactSearcher::indexes_checked`] and never read by the search itself.
#[derive(Clone, Debug)]
pub struct ExactSearcher<'a> {
    seq:             &'a EncodedSequence,
    index:           DimerIndex,
    indexes_checked: BitVec,
    batch_step:      usize,
}

impl<'a> ExactSearcher<'a> {
    #[must_use]
    pub fn new(seq: &'a EncodedSequence) -> Self {
        ExactSearcher {
            seq,
            index: DimerIndex::new(seq),
            indexes_checked: bitvec![1; seq.len()],
            batch_step: DEFAULT_BATCH_STEP,
        }
    }

    /// Sets how many candidate starts each batch covers. A step of zero is
    /// treated as one; a step past the interval length means one batch.
    #[must_use]
    pub fn with_batch_step(mut self, step: usize) -> Self {
        self.batch_step = step.max(1);
        self
    }

    #[inline]
    #[must_use]
    pub fn index(&self) -> &DimerIndex {
        &self.index
    }

    /// Start positions that have not been confirmed as a match by any
    /// search so far.
    #[inline]
    #[must_use]
    pub fn indexes_checked(&self) -> &BitSlice {
        &self.indexes_checked
    }

    /// Finds every occurrence of the `k` packed bases in `packed` that lies
    /// entirely within `[start, end]`.
    ///
    /// # Errors
    ///
    /// - [`NessieError::InvalidInterval`] for a malformed interval.
    /// - [`NessieError::InvalidRange`] if `k` is zero, longer than the
    ///   interval, or longer than `packed` holds.
    /// - [`NessieError::KmerNotFound`] if there is no occurrence.
    pub fn check_kmer_bit(&mut self, packed: &[u8], k: usize, start: usize, end: usize) -> Result<KmerRecord, NessieError> {
        check_interval(start, end, self.seq.len())?;
        if k == 0 {
            return Err(NessieError::InvalidRange("pattern must not be empty"));
        }
        if k > end - start + 1 {
            return Err(NessieError::InvalidRange("pattern is longer than the interval"));
        }
        if packed.len() < packed_len(k) {
            return Err(NessieError::InvalidRange("packed pattern holds fewer than k bases"));
        }

        // Equal k-mers must compare equal byte for byte, so unused slots are
        // cleared.
        let mut content = vec![0u8; packed_len(k)];
        for i in 0..k {
            set_code(&mut content, i, code_at(packed, i));
        }

        let positions = if k == 1 {
            self.scan_single(code_at(&content, 0), start, end)
        } else {
            self.scan_batched(&content, k, start, end)
        };

        if positions.is_empty() {
            return Err(NessieError::KmerNotFound);
        }
        for &n in &positions {
            self.indexes_checked.set(n, false);
        }

        Ok(KmerRecord::from_positions(content, k, positions))
    }

    /// Encodes `pattern` strictly, optionally as its reverse complement, and
    /// searches for it with [`ExactSearcher::check_kmer_bit`].
    ///
    /// # Errors
    ///
    /// [`NessieError::UnsupportedBase`] if the pattern holds a non-canonical
    /// character, otherwise as [`ExactSearcher::check_kmer_bit`].
    pub fn check_kmer_char(
        &mut self, pattern: &[u8], start: usize, end: usize, orientation: Orientation,
    ) -> Result<KmerRecord, NessieError> {
        let packed = pack_pattern(pattern, orientation)?;
        self.check_kmer_bit(&packed, pattern.len(), start, end)
    }

    /// One base spans no dimer, so single bases are matched directly.
    fn scan_single(&self, code: u8, start: usize, end: usize) -> Vec<usize> {
        let skipped = self.seq.skipped();
        (start..=end)
            .filter(|&n| self.seq.code(n) == code && skipped.binary_search(&n).is_err())
            .collect()
    }

    fn scan_batched(&self, content: &[u8], k: usize, start: usize, end: usize) -> Vec<usize> {
        let dimers = pattern_dimers(content, k);
        let step = self.batch_step;
        let mut positions = Vec::new();

        let mut i = start;
        loop {
            let end_i = end.min(i.saturating_add(step).saturating_add(k - 2));
            if end - end_i > step.saturating_add(k - 1) {
                trace!("exact search batch [{i}, {end_i}]");
                self.scan_window(&dimers, k, i, end_i, &mut positions);
                i += step;
            } else {
                trace!("exact search batch [{i}, {end}]");
                self.scan_window(&dimers, k, i, end, &mut positions);
                break;
            }
        }
        positions
    }

    /// Candidates come from the first dimer; every other dimer must start at
    /// its fixed offset from the candidate.
    fn scan_window(&self, dimers: &[(u8, usize)], k: usize, from: usize, to: usize, out: &mut Vec<usize>) {
        let Some((&(first, _), rest)) = dimers.split_first() else {
            return;
        };
        let last_start = to + 1 - k;

        for n in self.index.iter_from(first, from).take_while(|&n| n <= last_start) {
            if rest.iter().all(|&(code, offset)| self.index.contains(code, n + offset)) {
                out.push(n);
            }
        }
    }
}

/// Splits a packed pattern into `(dimer code, offset)` pairs: one per
/// nibble, plus a final overlapping dimer over the last two bases when `k`
/// is odd.
fn pattern_dimers(content: &[u8], k: usize) -> Vec<(u8, usize)> {
    let mut dimers: Vec<(u8, usize)> = (0..k >> 1)
        .map(|i| ((content[i >> 1] >> ((i & 1) << 2)) & 0xF, i << 1))
        .collect();
    if k & 1 == 1 {
        dimers.push((dimer_code(code_at(content, k - 2), code_at(content, k - 1)), k - 2));
    }
    dimers
}
