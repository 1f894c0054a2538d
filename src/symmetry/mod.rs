//! ## Mirror, palindrome, and triplex checks.
//!
//! A window of length `k` is *mirror symmetric* when it reads the same
//! forwards and backwards, and a *palindrome* when it equals its own reverse
//! complement. Both come in two flavours:
//!
//! - **Exact** checks compare offset `i` against offset `k - 1 - i` using a
//!   [`MonomerWindowBitset`] and tolerate a number of mismatches.
//! - **Gapped** checks align the first half of the window against the
//!   reversed second half with a global alignment (match `+1`, mismatch and
//!   indel `-1`), and return the [`AlignmentTrace`] of accepted windows.
//!
//! Every check first requires the two outermost bases to pair; a window whose
//! anchor fails is rejected regardless of the tolerance.
//!
//! *Triplex-forming* windows are mirror symmetric windows biased towards
//! purines or pyrimidines.
//!
//! ```
//! # use nessie::prelude::*;
//! let seq = EncodedSequence::from_seq(b"AAGCTT", Orientation::Forward).unwrap();
//! let window = MonomerWindowBitset::from_window(&seq, 0, 6);
//! assert!(check_symmetry(&window, SymmetryKind::Palindrome, 0));
//! assert!(!check_symmetry(&window, SymmetryKind::Mirror, 0));
//!
//! let trace = check_global_alignment(seq.as_packed(), 6, Caps::default(), SymmetryKind::Palindrome);
//! assert_eq!(trace.unwrap().to_string(), "010101");
//! ```
//!
//! [`MonomerWindowBitset`]: crate::window::MonomerWindowBitset

use crate::data::err::NessieError;

mod exact;
mod gapped;
mod triplex;

pub use exact::*;
pub use gapped::*;
pub use triplex::*;


/// The symmetry a window is tested for.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "fuzzing", derive(arbitrary::Arbitrary))]
pub enum SymmetryKind {
    /// Offset `i` equals offset `k - 1 - i`.
    Mirror,
    /// Offset `i` is the complement of offset `k - 1 - i`.
    Palindrome,
}

impl SymmetryKind {
    /// The code that pairs with `code` under this symmetry.
    #[inline]
    #[must_use]
    pub const fn partner(self, code: u8) -> u8 {
        match self {
            SymmetryKind::Mirror => code,
            SymmetryKind::Palindrome => 3 - (code & 0b11),
        }
    }

    /// Whether the two codes pair under this symmetry.
    #[inline]
    #[must_use]
    pub const fn pairs(self, left: u8, right: u8) -> bool {
        self.partner(left) == right
    }
}

impl TryFrom<i32> for SymmetryKind {
    type Error = NessieError;

    /// Decodes the numeric kind used on the command line and in output
    /// parsers: `0` for mirror and `1` for palindrome.
    ///
    /// # Errors
    ///
    /// Any other value is [`NessieError::InvalidAlignmentType`].
    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(SymmetryKind::Mirror),
            1 => Ok(SymmetryKind::Palindrome),
            other => Err(NessieError::InvalidAlignmentType(other)),
        }
    }
}

/// Absolute tolerances for a single window length.
///
/// `max_gapmm` is a combined cap on gaps plus mismatches; zero means no
/// combined cap. `max_purine` bounds the minority class of a triplex window.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Caps {
    pub max_mm:     usize,
    pub max_gap:    usize,
    pub max_gapmm:  usize,
    pub max_purine: usize,
}

impl Caps {
    /// Whether the gapped aligner is needed to honour these caps.
    #[inline]
    #[must_use]
    pub const fn needs_alignment(&self) -> bool {
        self.max_gap > 0 || self.max_gapmm > 0
    }
}

/// Tolerances as whole percentages of the window length, turned into
/// [`Caps`] per length by [`Tolerance::caps`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "fuzzing", derive(arbitrary::Arbitrary))]
pub struct Tolerance {
    pub mismatch: usize,
    pub gap:      usize,
    pub total:    usize,
    pub purine:   usize,
}

impl Tolerance {
    /// Caps for windows of length `k`, each `⌊k · pct / 100⌋`.
    #[inline]
    #[must_use]
    pub const fn caps(&self, k: usize) -> Caps {
        Caps {
            max_mm:     k * self.mismatch / 100,
            max_gap:    k * self.gap / 100,
            max_gapmm:  k * self.total / 100,
            max_purine: k * self.purine / 100,
        }
    }

    /// Whether gaps are permitted at all, independently of any window
    /// length.
    #[inline]
    #[must_use]
    pub const fn allows_gaps(&self) -> bool {
        self.gap > 0 || self.total > 0
    }
}
