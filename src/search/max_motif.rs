use crate::{
    data::{
        encoded::EncodedSequence,
        err::{NessieError, check_interval},
    },
    kmer::{KmerIndex, KmerRecord, ResultSet},
    search::Hit,
    symmetry::{
        AlignmentTrace, SymmetryKind, Tolerance, check_global_alignment_interval, check_symmetry_interval,
        check_triplex_gap_interval, check_triplex_interval,
    },
    window::SlidingWindowScanner,
};
use log::debug;

/// The test a [`MaxMotifScanner`] applies to candidate windows.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum MotifCheck {
    Symmetry(SymmetryKind),
    Triplex,
}

/// One accepted motif: its absolute start, length, and the alignment trace
/// when gaps were allowed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MotifHit {
    pub start: usize,
    pub k:     usize,
    pub trace: Option<AlignmentTrace>,
}

impl MotifHit {
    /// Absolute offset of the last base.
    #[inline]
    #[must_use]
    pub fn end(&self) -> usize {
        self.start + self.k - 1
    }
}

/// Greedy longest-first motif search.
///
/// At each start the lengths are tried from `k_max` down to `k_min` and the
/// first one accepted wins. Once a motif ends at `covered`, later starts only
/// try lengths reaching past `covered`, so no accepted motif lies entirely
/// inside an earlier one. Starts too close to the end for a `k_max` window
/// are handled by a final pass over the trailing bases.
///
/// Gapped alignment is used when the tolerance allows gaps at all; the caps
/// are then scaled to each candidate length.
#[derive(Clone, Debug)]
pub struct MaxMotifScanner<'a> {
    seq:       &'a EncodedSequence,
    check:     MotifCheck,
    tolerance: Tolerance,
    gapped:    bool,
    k_min:     usize,
    k_max:     usize,
}

impl<'a> MaxMotifScanner<'a> {
    /// A missing or zero `k_min` means only `k_max` long motifs are sought.
    ///
    /// # Errors
    ///
    /// [`NessieError::InvalidRange`] if `k_max` is zero or smaller than
    /// `k_min`.
    pub fn new(
        seq: &'a EncodedSequence, check: MotifCheck, tolerance: Tolerance, k_min: Option<usize>, k_max: usize,
    ) -> Result<Self, NessieError> {
        if k_max == 0 {
            return Err(NessieError::InvalidRange("k_max must be positive"));
        }
        let k_min = k_min.filter(|&k| k > 0).unwrap_or(k_max);
        if k_min > k_max {
            return Err(NessieError::InvalidRange("k_min is larger than k_max"));
        }

        Ok(MaxMotifScanner {
            seq,
            check,
            tolerance,
            gapped: tolerance.allows_gaps(),
            k_min,
            k_max,
        })
    }

    #[inline]
    #[must_use]
    pub fn is_gapped(&self) -> bool {
        self.gapped
    }

    /// Accepted motifs within `[start, end]`, in increasing start order.
    ///
    /// # Errors
    ///
    /// [`NessieError::InvalidInterval`] for a malformed interval and
    /// [`NessieError::InvalidRange`] if `k_max` is longer than it.
    pub fn scan(&self, start: usize, end: usize) -> Result<Vec<MotifHit>, NessieError> {
        check_interval(start, end, self.seq.len())?;
        if self.k_max > end - start + 1 {
            return Err(NessieError::InvalidRange("k_max is longer than the interval"));
        }

        let track_monomers = !self.gapped;
        let mut hits = Vec::new();
        let mut covered = None;

        let mut window = SlidingWindowScanner::new(self.seq, self.k_max, start, end, track_monomers)?;
        self.longest_at(&window, 0, self.k_max, start, &mut covered, &mut hits)?;

        let mut last = start;
        while window.advance() {
            let i = window.position();
            self.longest_at(&window, 0, self.k_max, i, &mut covered, &mut hits)?;
            last = i;
        }

        // Starts after `last` never had a full k_max window
        let tail_len = end - last;
        if tail_len >= self.k_min {
            let tail = SlidingWindowScanner::new(self.seq, tail_len, last + 1, end, track_monomers)?;
            for offset in 0..=tail_len - self.k_min {
                self.longest_at(&tail, offset, tail_len - offset, last + 1 + offset, &mut covered, &mut hits)?;
            }
        }

        debug!(
            "max {:?} search k={}..={} over [{start}, {end}]: {} motifs",
            self.check,
            self.k_min,
            self.k_max,
            hits.len()
        );
        Ok(hits)
    }

    /// Runs [`MaxMotifScanner::scan`] and merges the motifs into a
    /// variable-length index.
    ///
    /// # Errors
    ///
    /// As [`MaxMotifScanner::scan`].
    pub fn scan_records(&self, start: usize, end: usize) -> Result<ResultSet, NessieError> {
        let mut index = KmerIndex::variable(self.k_max);
        for hit in self.scan(start, end)? {
            let record = KmerRecord::new(self.seq.pack_window(hit.start, hit.k), hit.k, hit.start);
            index.insert(match hit.trace {
                Some(trace) => record.with_trace(trace),
                None => record,
            });
        }
        Ok(index.drain())
    }

    /// Tries lengths `k_top` down to `k_min` at local `offset` of `window`,
    /// which is absolute position `abs_start`, and records the first
    /// accepted one.
    fn longest_at(
        &self, window: &SlidingWindowScanner, offset: usize, k_top: usize, abs_start: usize,
        covered: &mut Option<usize>, hits: &mut Vec<MotifHit>,
    ) -> Result<(), NessieError> {
        for k in (self.k_min..=k_top).rev() {
            let abs_end = abs_start + k - 1;
            if covered.is_some_and(|c| abs_end <= c) {
                break;
            }
            if let Some(hit) = self.test(window, offset, offset + k - 1)? {
                hits.push(MotifHit {
                    start: abs_start,
                    k,
                    trace: hit.into_trace(),
                });
                *covered = Some(abs_end);
                break;
            }
        }
        Ok(())
    }

    /// Checks the local offsets `[lo, hi]` with caps scaled to their length.
    fn test(&self, window: &SlidingWindowScanner, lo: usize, hi: usize) -> Result<Option<Hit>, NessieError> {
        let caps = self.tolerance.caps(hi - lo + 1);
        let (mask, k) = (window.mask(), window.k());

        // Monomers are tracked only for ungapped scans
        let hit = match (self.check, window.monomers()) {
            (MotifCheck::Symmetry(kind), Some(m)) => {
                check_symmetry_interval(m, kind, caps.max_mm, lo, hi)?.then_some(Hit::Exact)
            }
            (MotifCheck::Symmetry(kind), None) => {
                check_global_alignment_interval(mask, k, caps, kind, lo, hi)?.map(Hit::Aligned)
            }
            (MotifCheck::Triplex, Some(m)) => check_triplex_interval(m, caps, lo, hi)?.then_some(Hit::Exact),
            (MotifCheck::Triplex, None) => check_triplex_gap_interval(mask, k, caps, lo, hi)?.map(Hit::Aligned),
        };
        Ok(hit)
    }
}
