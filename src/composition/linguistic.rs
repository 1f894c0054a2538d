use crate::data::{
    encoded::EncodedSequence,
    err::{NessieError, check_interval},
};

/// Longest k-mer whose packed content fits a `u64`.
pub const MAX_LINGUISTIC_K: usize = 32;

/// Default upper bound on `k` and default sliding interval.
pub const DEFAULT_LINGUISTIC_SPAN: usize = 20;

/// Default sliding step.
pub const DEFAULT_LINGUISTIC_SHIFT: usize = 10;

impl EncodedSequence {
    /// Linguistic complexity of `[start, end]`: distinct k-mers observed over
    /// every `k` in `[k_min, k_max]`, divided by the most that could be
    /// observed, `Σ min(4^k, len - k + 1)`.
    ///
    /// `k_min` defaults to 1 and `k_max` to the interval length capped at 20.
    ///
    /// # Errors
    ///
    /// - [`NessieError::InvalidInterval`] for a malformed interval.
    /// - [`NessieError::InvalidRange`] if `k_min > k_max`, `k_max` is longer
    ///   than the interval, or `k_max` exceeds 32.
    pub fn linguistic_complexity_interval(
        &self, start: usize, end: usize, k_min: Option<usize>, k_max: Option<usize>,
    ) -> Result<f64, NessieError> {
        check_interval(start, end, self.len())?;
        let len = end - start + 1;
        let k_min = k_min.unwrap_or(1).max(1);
        let k_max = k_max.unwrap_or(len.min(DEFAULT_LINGUISTIC_SPAN));
        check_k_range(k_min, k_max, len)?;

        Ok(self.complexity(start, end, k_min, k_max))
    }

    /// Linguistic complexity of every window of `interval_len` bases in
    /// `[start, end]`, moving `shift` bases at a time. Returns each window's
    /// start with its score.
    ///
    /// Defaults: interval 20, shift 10, `k_min` 1 and `k_max` the interval
    /// capped at 20.
    ///
    /// # Errors
    ///
    /// As [`EncodedSequence::linguistic_complexity_interval`], and
    /// [`NessieError::InvalidRange`] if the sliding interval does not fit
    /// `[start, end]`.
    pub fn linguistic_complexity_sliding(
        &self, interval_len: Option<usize>, shift: Option<usize>, start: usize, end: usize, k_min: Option<usize>,
        k_max: Option<usize>,
    ) -> Result<Vec<(usize, f64)>, NessieError> {
        check_interval(start, end, self.len())?;
        let interval_len = interval_len.filter(|&l| l > 0).unwrap_or(DEFAULT_LINGUISTIC_SPAN);
        let shift = shift.filter(|&s| s > 0).unwrap_or(DEFAULT_LINGUISTIC_SHIFT);
        let k_min = k_min.unwrap_or(1).max(1);
        let k_max = k_max.unwrap_or(interval_len.min(DEFAULT_LINGUISTIC_SPAN));

        if interval_len > end - start + 1 {
            return Err(NessieError::InvalidRange("sliding interval is longer than the interval"));
        }
        check_k_range(k_min, k_max, interval_len)?;

        let last_start = end + 1 - interval_len;
        Ok((start..=last_start)
            .step_by(shift)
            .map(|i| (i, self.complexity(i, i + interval_len - 1, k_min, k_max)))
            .collect())
    }

    #[allow(clippy::cast_precision_loss)]
    fn complexity(&self, start: usize, end: usize, k_min: usize, k_max: usize) -> f64 {
        let len = end - start + 1;
        let mut observed = 0usize;
        let mut possible = 0usize;

        for k in k_min..=k_max {
            let windows = len - k + 1;
            possible += if 2 * k >= usize::BITS as usize {
                windows
            } else {
                windows.min(1 << (2 * k))
            };
            observed += self.distinct_kmers(start, end, k);
        }

        observed as f64 / possible as f64
    }

    /// Distinct k-mers of `[start, end]`, each packed into a `u64` with the
    /// first base in the lowest bits.
    #[allow(clippy::cast_possible_truncation)]
    fn distinct_kmers(&self, start: usize, end: usize, k: usize) -> usize {
        let top = 2 * (k - 1) as u32;
        let mut kmers = Vec::with_capacity(end + 2 - start - k);
        let mut packed = 0u64;

        for i in start..=end {
            packed = (packed >> 2) | (u64::from(self.code(i)) << top);
            if i + 1 >= start + k {
                kmers.push(packed);
            }
        }

        kmers.sort_unstable();
        kmers.dedup();
        kmers.len()
    }
}

fn check_k_range(k_min: usize, k_max: usize, len: usize) -> Result<(), NessieError> {
    if k_min > k_max {
        return Err(NessieError::InvalidRange("k_min is larger than k_max"));
    }
    if k_max > len {
        return Err(NessieError::InvalidRange("k_max is longer than the interval"));
    }
    if k_max > MAX_LINGUISTIC_K {
        return Err(NessieError::InvalidRange("k_max does not fit a 64-bit k-mer"));
    }
    Ok(())
}
