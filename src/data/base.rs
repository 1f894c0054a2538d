use crate::data::err::NessieError;
use std::fmt;

/// Mask selecting a single 2-bit base code within a byte.
pub(crate) const BASE_MASK: u8 = 0b11;

/// One of the four canonical DNA bases, stored as its 2-bit code.
///
/// The discriminants are the on-disk bit layout: `A = 00`, `C = 01`, `G =
/// 10`, `T = 11`. Watson-Crick complementation is therefore `3 - code`.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "fuzzing", derive(arbitrary::Arbitrary))]
#[repr(u8)]
pub enum Base {
    A = 0,
    C = 1,
    G = 2,
    T = 3,
}

impl Base {
    /// All bases in code order.
    pub const ALL: [Base; 4] = [Base::A, Base::C, Base::G, Base::T];

    /// Maps an ASCII character to its base, ignoring case. Returns [`None`]
    /// for anything outside `ACGTacgt`.
    #[inline]
    #[must_use]
    pub const fn from_ascii(b: u8) -> Option<Self> {
        match b {
            b'A' | b'a' => Some(Base::A),
            b'C' | b'c' => Some(Base::C),
            b'G' | b'g' => Some(Base::G),
            b'T' | b't' => Some(Base::T),
            _ => None,
        }
    }

    /// Decodes the lowest two bits of `code`.
    #[inline]
    #[must_use]
    pub const fn from_code(code: u8) -> Self {
        match code & BASE_MASK {
            0 => Base::A,
            1 => Base::C,
            2 => Base::G,
            _ => Base::T,
        }
    }

    #[inline]
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    #[inline]
    #[must_use]
    pub const fn complement(self) -> Self {
        Base::from_code(3 - self as u8)
    }

    /// Returns `true` for the purines `A` and `G`.
    #[inline]
    #[must_use]
    pub const fn is_purine(self) -> bool {
        matches!(self, Base::A | Base::G)
    }

    /// Uppercase ASCII for the base.
    #[inline]
    #[must_use]
    pub const fn to_ascii(self) -> u8 {
        match self {
            Base::A => b'A',
            Base::C => b'C',
            Base::G => b'G',
            Base::T => b'T',
        }
    }
}

impl TryFrom<u8> for Base {
    type Error = NessieError;

    /// Strict conversion from an ASCII character.
    ///
    /// # Errors
    ///
    /// Returns [`NessieError::UnsupportedBase`] for characters outside
    /// `ACGTacgt`. The reported position is `0`; callers scanning a buffer
    /// should build the error themselves with the real offset.
    #[inline]
    fn try_from(b: u8) -> Result<Self, Self::Error> {
        Base::from_ascii(b).ok_or(NessieError::UnsupportedBase { base: b, position: 0 })
    }
}

impl fmt::Display for Base {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_ascii() as char)
    }
}

/// Which strand to encode: the input as written, or its reverse complement.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "fuzzing", derive(arbitrary::Arbitrary))]
pub enum Orientation {
    #[default]
    Forward,
    ReverseComplement,
}

impl Orientation {
    #[inline]
    #[must_use]
    pub const fn from_complement_flag(complement: bool) -> Self {
        if complement {
            Orientation::ReverseComplement
        } else {
            Orientation::Forward
        }
    }
}

/// Number of bytes needed to pack `len` bases at 4 bases per byte.
#[inline]
#[must_use]
pub const fn packed_len(len: usize) -> usize {
    len.div_ceil(4)
}

/// Reads the 2-bit code stored at logical offset `i` of a packed buffer.
///
/// ## Panics
///
/// Panics if `i / 4` is out of bounds for `packed`.
#[inline]
#[must_use]
pub(crate) fn code_at(packed: &[u8], i: usize) -> u8 {
    let shift = (i & 3) << 1;
    (packed[i >> 2] >> shift) & BASE_MASK
}

/// ORs the 2-bit `code` into logical offset `i` of a packed buffer. The slot
/// must already be zero.
#[inline]
pub(crate) fn set_code(packed: &mut [u8], i: usize, code: u8) {
    let shift = (i & 3) << 1;
    packed[i >> 2] |= (code & BASE_MASK) << shift;
}

/// Shifts a packed buffer down by one base with carry between bytes. The
/// base at offset 0 is dropped and the highest slot of the last byte is
/// cleared.
#[inline]
#[cfg_attr(feature = "multiversion", multiversion::multiversion(targets = "simd"))]
pub(crate) fn shift_2_right(packed: &mut [u8]) {
    let n = packed.len();
    for i in 0..n {
        let carry = if i + 1 < n { (packed[i + 1] & BASE_MASK) << 6 } else { 0 };
        packed[i] = (packed[i] >> 2) | carry;
    }
}

/// Counts each base code over the offsets `[start, end]` of a packed buffer.
#[cfg_attr(feature = "multiversion", multiversion::multiversion(targets = "simd"))]
pub(crate) fn count_codes(mask: &[u8], start: usize, end: usize) -> [usize; 4] {
    let mut counts = [0usize; 4];
    for i in start..=end {
        counts[usize::from(code_at(mask, i))] += 1;
    }
    counts
}

/// Encodes an ASCII pattern into a packed buffer, optionally reverse
/// complementing it first.
///
/// # Errors
///
/// Returns [`NessieError::UnsupportedBase`] if the pattern contains a
/// non-canonical character.
pub fn pack_pattern(pattern: &[u8], orientation: Orientation) -> Result<Vec<u8>, NessieError> {
    let k = pattern.len();
    let mut packed = vec![0u8; packed_len(k)];

    for i in 0..k {
        let (src, base) = match orientation {
            Orientation::Forward => (i, pattern[i]),
            Orientation::ReverseComplement => (k - 1 - i, pattern[k - 1 - i]),
        };
        let Some(mut base) = Base::from_ascii(base) else {
            return Err(NessieError::UnsupportedBase { base, position: src });
        };
        if orientation == Orientation::ReverseComplement {
            base = base.complement();
        }
        set_code(&mut packed, i, base.code());
    }

    Ok(packed)
}

/// Decodes the first `k` bases of a packed buffer to uppercase ASCII.
#[must_use]
pub fn unpack(packed: &[u8], k: usize) -> Vec<u8> {
    (0..k).map(|i| Base::from_code(code_at(packed, i)).to_ascii()).collect()
}
