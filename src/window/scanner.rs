use crate::{
    data::{
        base::{set_code, shift_2_right},
        encoded::EncodedSequence,
        err::{NessieError, check_interval},
    },
    window::MonomerWindowBitset,
};

/// Walks every window of length `k` in `[start, end]` of an encoded
/// sequence, one base at a time.
#[derive(Clone, Debug)]
pub struct SlidingWindowScanner<'a> {
    seq:        &'a EncodedSequence,
    k:          usize,
    position:   usize,
    last_start: usize,
    mask:       Vec<u8>,
    monomers:   Option<MonomerWindowBitset>,
}

impl<'a> SlidingWindowScanner<'a> {
    /// Positions the scanner on the first window, `seq[start..start + k]`.
    /// With `track_monomers`, a [`MonomerWindowBitset`] is maintained
    /// alongside the mask.
    ///
    /// # Errors
    ///
    /// - [`NessieError::InvalidInterval`] for a malformed interval.
    /// - [`NessieError::InvalidRange`] if `k` is zero or longer than the
    ///   interval.
    pub fn new(
        seq: &'a EncodedSequence, k: usize, start: usize, end: usize, track_monomers: bool,
    ) -> Result<Self, NessieError> {
        check_interval(start, end, seq.len())?;
        if k == 0 {
            return Err(NessieError::InvalidRange("window length must be positive"));
        }
        if k > end - start + 1 {
            return Err(NessieError::InvalidRange("window is longer than the interval"));
        }

        Ok(SlidingWindowScanner {
            seq,
            k,
            position: start,
            last_start: end + 1 - k,
            mask: seq.pack_window(start, k),
            monomers: track_monomers.then(|| MonomerWindowBitset::from_window(seq, start, k)),
        })
    }

    /// Start offset of the current window.
    #[inline]
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    #[inline]
    #[must_use]
    pub fn k(&self) -> usize {
        self.k
    }

    /// Packed content of the current window, aligned at offset 0.
    #[inline]
    #[must_use]
    pub fn mask(&self) -> &[u8] {
        &self.mask
    }

    #[inline]
    #[must_use]
    pub fn monomers(&self) -> Option<&MonomerWindowBitset> {
        self.monomers.as_ref()
    }

    /// Moves to the next window. Returns `false`, leaving the state
    /// untouched, once the last window of the interval has been reached.
    pub fn advance(&mut self) -> bool {
        if self.position >= self.last_start {
            return false;
        }

        self.position += 1;
        let code = self.seq.code(self.position + self.k - 1);

        shift_2_right(&mut self.mask);
        set_code(&mut self.mask, self.k - 1, code);

        if let Some(monomers) = &mut self.monomers {
            monomers.advance(code);
        }
        true
    }
}
