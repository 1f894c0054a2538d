use crate::{
    data::{
        encoded::EncodedSequence,
        err::{NessieError, check_interval},
    },
    kmer::{KmerIndex, KmerRecord, ResultSet},
    search::{Hit, MaxMotifScanner, MotifCheck},
    symmetry::{
        SymmetryKind, Tolerance, check_global_alignment, check_symmetry, check_triplex, check_triplex_gap,
    },
    window::SlidingWindowScanner,
};
use log::debug;
use std::ops::RangeInclusive;

/// Search drivers over a range of window lengths.
///
/// Every driver validates its arguments before scanning. `k_max` defaults to
/// `k_min` when absent, and mismatch, gap and purine limits are percentages
/// of each window length (see [`Tolerance::caps`]). Records are grouped per
/// length, shortest first, and in bucket order within a length.
impl EncodedSequence {
    /// Windows equal to their own reversal, allowing `mismatch` percent
    /// mismatching pairs.
    ///
    /// # Errors
    ///
    /// [`NessieError::InvalidInterval`] for a malformed interval and
    /// [`NessieError::InvalidRange`] for an unusable length range.
    pub fn get_kmers_mirror(
        &self, k_min: usize, k_max: Option<usize>, mismatch: usize, start: usize, end: usize,
    ) -> Result<ResultSet, NessieError> {
        self.get_kmers_exact(SymmetryKind::Mirror, k_min, k_max, mismatch, start, end)
    }

    /// Windows equal to their own reverse complement, allowing `mismatch`
    /// percent mismatching pairs.
    ///
    /// # Errors
    ///
    /// As [`EncodedSequence::get_kmers_mirror`].
    pub fn get_kmers_palindrome(
        &self, k_min: usize, k_max: Option<usize>, mismatch: usize, start: usize, end: usize,
    ) -> Result<ResultSet, NessieError> {
        self.get_kmers_exact(SymmetryKind::Palindrome, k_min, k_max, mismatch, start, end)
    }

    /// Mirror repeats with gaps. Lengths whose caps allow no gaps are checked
    /// exactly; the others go through the aligner and carry a trace.
    ///
    /// # Errors
    ///
    /// As [`EncodedSequence::get_kmers_mirror`].
    pub fn get_kmers_mirror_gap(
        &self, k_min: usize, k_max: Option<usize>, tolerance: Tolerance, start: usize, end: usize,
    ) -> Result<ResultSet, NessieError> {
        self.get_kmers_gap(SymmetryKind::Mirror, k_min, k_max, tolerance, start, end)
    }

    /// Palindromes with gaps, dispatched per length as
    /// [`EncodedSequence::get_kmers_mirror_gap`].
    ///
    /// # Errors
    ///
    /// As [`EncodedSequence::get_kmers_mirror`].
    pub fn get_kmers_palindrome_gap(
        &self, k_min: usize, k_max: Option<usize>, tolerance: Tolerance, start: usize, end: usize,
    ) -> Result<ResultSet, NessieError> {
        self.get_kmers_gap(SymmetryKind::Palindrome, k_min, k_max, tolerance, start, end)
    }

    /// Triplex-forming windows: purine or pyrimidine rich mirror repeats.
    ///
    /// # Errors
    ///
    /// As [`EncodedSequence::get_kmers_mirror`].
    pub fn get_kmers_triplex(
        &self, k_min: usize, k_max: Option<usize>, tolerance: Tolerance, start: usize, end: usize,
    ) -> Result<ResultSet, NessieError> {
        let range = self.k_range(k_min, k_max, start, end)?;
        let mut results = ResultSet::new();

        for k in range {
            let caps = tolerance.caps(k);
            let mut found = if caps.needs_alignment() {
                self.scan_k(k, start, end, false, |w| {
                    check_triplex_gap(w.mask(), k, caps).map(Hit::Aligned)
                })?
            } else {
                self.scan_k(k, start, end, true, |w| {
                    w.monomers().is_some_and(|m| check_triplex(m, caps)).then_some(Hit::Exact)
                })?
            };
            results.append(&mut found);
        }

        debug!("triplex search k={k_min}..={k_max:?} over [{start}, {end}]: {} records", results.len());
        Ok(results)
    }

    /// Longest non-overlapping mirror repeats between `k_min` and `k_max`.
    ///
    /// # Errors
    ///
    /// As [`MaxMotifScanner::new`] and [`MaxMotifScanner::scan`].
    pub fn get_max_kmers_mirror(
        &self, k_min: Option<usize>, k_max: usize, tolerance: Tolerance, start: usize, end: usize,
    ) -> Result<ResultSet, NessieError> {
        MaxMotifScanner::new(self, MotifCheck::Symmetry(SymmetryKind::Mirror), tolerance, k_min, k_max)?
            .scan_records(start, end)
    }

    /// Longest non-overlapping palindromes between `k_min` and `k_max`.
    ///
    /// # Errors
    ///
    /// As [`MaxMotifScanner::new`] and [`MaxMotifScanner::scan`].
    pub fn get_max_kmers_palindrome(
        &self, k_min: Option<usize>, k_max: usize, tolerance: Tolerance, start: usize, end: usize,
    ) -> Result<ResultSet, NessieError> {
        MaxMotifScanner::new(self, MotifCheck::Symmetry(SymmetryKind::Palindrome), tolerance, k_min, k_max)?
            .scan_records(start, end)
    }

    /// Longest non-overlapping triplex-forming windows between `k_min` and
    /// `k_max`.
    ///
    /// # Errors
    ///
    /// As [`MaxMotifScanner::new`] and [`MaxMotifScanner::scan`].
    pub fn get_max_kmers_triplex(
        &self, k_min: Option<usize>, k_max: usize, tolerance: Tolerance, start: usize, end: usize,
    ) -> Result<ResultSet, NessieError> {
        MaxMotifScanner::new(self, MotifCheck::Triplex, tolerance, k_min, k_max)?.scan_records(start, end)
    }

    /// Every distinct k-mer of each length with its positions and count.
    ///
    /// # Errors
    ///
    /// As [`EncodedSequence::get_kmers_mirror`].
    pub fn get_all_kmers(
        &self, k_min: usize, k_max: Option<usize>, start: usize, end: usize,
    ) -> Result<ResultSet, NessieError> {
        let range = self.k_range(k_min, k_max, start, end)?;
        let mut results = ResultSet::new();

        for k in range {
            let mut found = self.scan_k(k, start, end, false, |_| Some(Hit::Exact))?;
            results.append(&mut found);
        }

        debug!("kmer listing k={k_min}..={k_max:?} over [{start}, {end}]: {} records", results.len());
        Ok(results)
    }

    fn get_kmers_exact(
        &self, kind: SymmetryKind, k_min: usize, k_max: Option<usize>, mismatch: usize, start: usize, end: usize,
    ) -> Result<ResultSet, NessieError> {
        let range = self.k_range(k_min, k_max, start, end)?;
        let tolerance = Tolerance {
            mismatch,
            ..Tolerance::default()
        };
        let mut results = ResultSet::new();

        for k in range {
            let max_mm = tolerance.caps(k).max_mm;
            let mut found = self.scan_k(k, start, end, true, |w| {
                w.monomers()
                    .is_some_and(|m| check_symmetry(m, kind, max_mm))
                    .then_some(Hit::Exact)
            })?;
            results.append(&mut found);
        }

        debug!("{kind:?} search k={k_min}..={k_max:?} over [{start}, {end}]: {} records", results.len());
        Ok(results)
    }

    fn get_kmers_gap(
        &self, kind: SymmetryKind, k_min: usize, k_max: Option<usize>, tolerance: Tolerance, start: usize, end: usize,
    ) -> Result<ResultSet, NessieError> {
        let range = self.k_range(k_min, k_max, start, end)?;
        let mut results = ResultSet::new();

        for k in range {
            let caps = tolerance.caps(k);
            let mut found = if caps.needs_alignment() {
                self.scan_k(k, start, end, false, |w| {
                    check_global_alignment(w.mask(), k, caps, kind).map(Hit::Aligned)
                })?
            } else {
                self.scan_k(k, start, end, true, |w| {
                    w.monomers()
                        .is_some_and(|m| check_symmetry(m, kind, caps.max_mm))
                        .then_some(Hit::Exact)
                })?
            };
            results.append(&mut found);
        }

        debug!(
            "gapped {kind:?} search k={k_min}..={k_max:?} over [{start}, {end}]: {} records",
            results.len()
        );
        Ok(results)
    }

    /// Validates the interval and the length range.
    fn k_range(
        &self, k_min: usize, k_max: Option<usize>, start: usize, end: usize,
    ) -> Result<RangeInclusive<usize>, NessieError> {
        check_interval(start, end, self.len())?;
        let k_max = k_max.unwrap_or(k_min);

        if k_min == 0 {
            return Err(NessieError::InvalidRange("k_min must be positive"));
        }
        if k_min > k_max {
            return Err(NessieError::InvalidRange("k_min is larger than k_max"));
        }
        if k_max > end - start + 1 {
            return Err(NessieError::InvalidRange("k_max is longer than the interval"));
        }
        Ok(k_min..=k_max)
    }

    /// Slides a window of length `k` over `[start, end]` and collects the
    /// windows `check` accepts into a fresh fixed-length index.
    fn scan_k<F>(&self, k: usize, start: usize, end: usize, track_monomers: bool, mut check: F) -> Result<ResultSet, NessieError>
    where
        F: FnMut(&SlidingWindowScanner) -> Option<Hit>, {
        let mut index = KmerIndex::for_fixed_k(k);
        let mut window = SlidingWindowScanner::new(self, k, start, end, track_monomers)?;

        loop {
            if let Some(hit) = check(&window) {
                let record = KmerRecord::new(window.mask().to_vec(), k, window.position());
                index.insert(match hit.into_trace() {
                    Some(trace) => record.with_trace(trace),
                    None => record,
                });
            }
            if !window.advance() {
                break;
            }
        }

        Ok(index.drain())
    }
}
