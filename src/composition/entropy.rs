use crate::data::{
    base::count_codes,
    encoded::EncodedSequence,
    err::{NessieError, check_interval},
};

/// Normalised Shannon entropy of a composition over `len` bases: `-0.5 ·
/// Σ p·log2(p)`, so four equally frequent bases score 1 and a single base
/// scores 0. Absent bases contribute nothing.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn entropy_from_counts(counts: [usize; 4], len: usize) -> f64 {
    if len == 0 {
        return 0.0;
    }
    let sum: f64 = counts
        .iter()
        .filter(|&&c| c > 0)
        .map(|&c| {
            let p = c as f64 / len as f64;
            p * p.log2()
        })
        .sum();
    // -0.0 for single-base windows
    let entropy = -0.5 * sum;
    if entropy > 0.0 { entropy } else { 0.0 }
}

/// One position of a sliding entropy scan.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct EntropyWindow {
    /// Offset of the window's first base.
    pub start:   usize,
    /// Occurrences per base code within the window.
    pub counts:  [usize; 4],
    pub entropy: f64,
}

impl EncodedSequence {
    /// Entropy of the whole sequence from the stored counts.
    #[inline]
    #[must_use]
    pub fn shannon_entropy(&self) -> f64 {
        entropy_from_counts(self.counts(), self.len())
    }

    /// Entropy of `[start, end]`.
    ///
    /// # Errors
    ///
    /// [`NessieError::InvalidInterval`] for a malformed interval.
    pub fn shannon_entropy_interval(&self, start: usize, end: usize) -> Result<f64, NessieError> {
        check_interval(start, end, self.len())?;
        Ok(entropy_from_counts(
            count_codes(self.as_packed(), start, end),
            end - start + 1,
        ))
    }

    /// Entropy of every window of `interval_len` bases in `[start, end]`,
    /// moving `shift` bases at a time. Counts are carried from one window to
    /// the next rather than recomputed.
    ///
    /// # Errors
    ///
    /// - [`NessieError::InvalidInterval`] for a malformed interval.
    /// - [`NessieError::InvalidRange`] if `interval_len` or `shift` is zero,
    ///   or the window does not fit the interval.
    pub fn shannon_entropy_sliding(
        &self, interval_len: usize, shift: usize, start: usize, end: usize,
    ) -> Result<Vec<EntropyWindow>, NessieError> {
        check_interval(start, end, self.len())?;
        if interval_len == 0 {
            return Err(NessieError::InvalidRange("sliding interval must be positive"));
        }
        if shift == 0 {
            return Err(NessieError::InvalidRange("shift must be positive"));
        }
        if interval_len > end - start + 1 {
            return Err(NessieError::InvalidRange("sliding interval is longer than the interval"));
        }

        let packed = self.as_packed();
        let last_start = end + 1 - interval_len;
        let mut counts = count_codes(packed, start, start + interval_len - 1);
        let mut windows = Vec::with_capacity((last_start - start) / shift + 1);

        let mut i = start;
        loop {
            windows.push(EntropyWindow {
                start: i,
                counts,
                entropy: entropy_from_counts(counts, interval_len),
            });

            let next = i + shift;
            if next > last_start {
                break;
            }
            if shift < interval_len {
                let left = count_codes(packed, i, next - 1);
                let entered = count_codes(packed, i + interval_len, next + interval_len - 1);
                for b in 0..4 {
                    counts[b] = counts[b] - left[b] + entered[b];
                }
            } else {
                counts = count_codes(packed, next, next + interval_len - 1);
            }
            i = next;
        }

        Ok(windows)
    }
}
