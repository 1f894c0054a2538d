use crate::data::{
    base::{Base, Orientation, code_at, packed_len, set_code, unpack},
    err::{NessieError, check_interval},
};
use std::fmt;


/// A DNA interval packed at 2 bits per base with per-case base statistics.
///
/// Base `i` lives in byte `i / 4` at bit offset `2 * (i % 4)`, so lower
/// offsets occupy the lower bits of each byte. Counts are case sensitive and
/// indexed by base code; in reverse-complement orientation they count the
/// complemented bases.
#[derive(Clone, PartialEq, Debug)]
pub struct EncodedSequence {
    data:         Vec<u8>,
    len:          usize,
    counts_upper: [usize; 4],
    counts_lower: [usize; 4],
    freqs_upper:  [f64; 4],
    freqs_lower:  [f64; 4],
    skipped:      Vec<usize>,
}

#[derive(Copy, Clone, Eq, PartialEq)]
enum Strictness {
    Strict,
    Lenient,
}

impl EncodedSequence {
    /// Strictly encodes `seq[start..=end]` in the given orientation.
    ///
    /// # Errors
    ///
    /// - [`NessieError::InvalidInterval`] if `start > end` or `end` lies
    ///   outside `seq`.
    /// - [`NessieError::UnsupportedBase`] on any character outside
    ///   `ACGTacgt`. The reported position is the offset in `seq`.
    #[inline]
    pub fn new(seq: &[u8], start: usize, end: usize, orientation: Orientation) -> Result<Self, NessieError> {
        Self::build(seq, start, end, orientation, Strictness::Strict)
    }

    /// Encodes the whole of `seq` strictly.
    ///
    /// # Errors
    ///
    /// See [`EncodedSequence::new`]. An empty `seq` is an invalid interval.
    #[inline]
    pub fn from_seq(seq: &[u8], orientation: Orientation) -> Result<Self, NessieError> {
        let Some(end) = seq.len().checked_sub(1) else {
            return Err(NessieError::InvalidInterval {
                start: 0,
                end:   0,
                len:   0,
            });
        };
        Self::new(seq, 0, end, orientation)
    }

    /// Encodes `seq[start..=end]`, skipping non-canonical characters instead
    /// of failing. A skipped position keeps the zero code, is left out of
    /// the statistics, and breaks dimer tracking when a
    /// [`DimerIndex`](crate::index::DimerIndex) is built from the result.
    ///
    /// # Errors
    ///
    /// Returns [`NessieError::InvalidInterval`] if `start > end` or `end` lies
    /// outside `seq`.
    #[inline]
    pub fn new_lenient(seq: &[u8], start: usize, end: usize, orientation: Orientation) -> Result<Self, NessieError> {
        Self::build(seq, start, end, orientation, Strictness::Lenient)
    }

    fn build(
        seq: &[u8], start: usize, end: usize, orientation: Orientation, strictness: Strictness,
    ) -> Result<Self, NessieError> {
        check_interval(start, end, seq.len())?;

        let len = end - start + 1;
        let mut data = vec![0u8; packed_len(len)];
        let mut counts_upper = [0usize; 4];
        let mut counts_lower = [0usize; 4];
        let mut skipped = Vec::new();

        for i in 0..len {
            let src = match orientation {
                Orientation::Forward => start + i,
                Orientation::ReverseComplement => end - i,
            };
            let c = seq[src];

            let Some(mut base) = Base::from_ascii(c) else {
                if strictness == Strictness::Strict {
                    return Err(NessieError::UnsupportedBase { base: c, position: src });
                }
                skipped.push(i);
                continue;
            };

            if orientation == Orientation::ReverseComplement {
                base = base.complement();
            }

            set_code(&mut data, i, base.code());
            if c.is_ascii_uppercase() {
                counts_upper[base as usize] += 1;
            } else {
                counts_lower[base as usize] += 1;
            }
        }

        #[allow(clippy::cast_precision_loss)]
        let freq = |counts: &[usize; 4]| counts.map(|c| if c == 0 { 0.0 } else { c as f64 / len as f64 });

        Ok(EncodedSequence {
            freqs_upper: freq(&counts_upper),
            freqs_lower: freq(&counts_lower),
            data,
            len,
            counts_upper,
            counts_lower,
            skipped,
        })
    }

    /// Number of encoded bases.
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

    /// Offset of the last base. The interval is never empty once built.
    #[inline]
    #[must_use]
    pub fn last_index(&self) -> usize {
        self.len - 1
    }

    /// The base at logical offset `i`.
    ///
    /// ## Panics
    ///
    /// Panics if `i >= self.len()`.
    #[inline]
    #[must_use]
    pub fn decode(&self, i: usize) -> Base {
        assert!(i < self.len, "offset {i} out of bounds for length {}", self.len);
        Base::from_code(code_at(&self.data, i))
    }

    #[inline]
    pub(crate) fn code(&self, i: usize) -> u8 {
        code_at(&self.data, i)
    }

    /// The packed 2-bit buffer.
    #[inline]
    #[must_use]
    pub fn as_packed(&self) -> &[u8] {
        &self.data
    }

    /// Uppercase occurrence counts per base code.
    #[inline]
    #[must_use]
    pub fn counts_upper(&self) -> [usize; 4] {
        self.counts_upper
    }

    /// Lowercase occurrence counts per base code.
    #[inline]
    #[must_use]
    pub fn counts_lower(&self) -> [usize; 4] {
        self.counts_lower
    }

    /// Case-insensitive occurrence counts per base code.
    #[inline]
    #[must_use]
    pub fn counts(&self) -> [usize; 4] {
        std::array::from_fn(|i| self.counts_upper[i] + self.counts_lower[i])
    }

    #[inline]
    #[must_use]
    pub fn frequencies_upper(&self) -> [f64; 4] {
        self.freqs_upper
    }

    #[inline]
    #[must_use]
    pub fn frequencies_lower(&self) -> [f64; 4] {
        self.freqs_lower
    }

    /// Offsets skipped by lenient encoding, ascending. Always empty for
    /// strict encodings.
    #[inline]
    #[must_use]
    pub fn skipped(&self) -> &[usize] {
        &self.skipped
    }

    /// Uppercase string for the inclusive interval `[start, end]`.
    ///
    /// # Errors
    ///
    /// Returns [`NessieError::InvalidInterval`] for an empty or out of bounds
    /// interval.
    pub fn interval_to_string(&self, start: usize, end: usize) -> Result<String, NessieError> {
        check_interval(start, end, self.len)?;
        Ok((start..=end).map(|i| self.decode(i).to_ascii() as char).collect())
    }

    /// Copies `k` bases starting at `start` into a freshly packed buffer
    /// aligned at offset 0.
    pub(crate) fn pack_window(&self, start: usize, k: usize) -> Vec<u8> {
        let mut mask = vec![0u8; packed_len(k)];
        for c in 0..k {
            set_code(&mut mask, c, self.code(start + c));
        }
        mask
    }
}

impl fmt::Display for EncodedSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ascii = unpack(&self.data, self.len);
        // Decoded bytes are always ASCII uppercase.
        f.write_str(&String::from_utf8_lossy(&ascii))
    }
}
