//! ## Exact and symmetric k-mer search.
//!
//! [`ExactSearcher`] answers exact substring queries through a
//! [`DimerIndex`](crate::index::DimerIndex). The symmetric drivers on
//! [`EncodedSequence`](crate::data::encoded::EncodedSequence) slide a window
//! of every length in a range across an interval, test each window, and
//! collect accepted windows into a [`ResultSet`](crate::kmer::ResultSet).
//! [`MaxMotifScanner`] keeps only the longest motif at each start.
//!
//! ```
//! # use nessie::prelude::*;
//! let seq = EncodedSequence::from_seq(b"AAGCTTAAGCTT", Orientation::Forward).unwrap();
//!
//! let mut searcher = ExactSearcher::new(&seq);
//! let record = searcher.check_kmer_char(b"AGC", 0, 11, Orientation::Forward).unwrap();
//! assert_eq!(record.positions(), &[1, 7]);
//!
//! let palindromes = seq.get_kmers_palindrome(6, None, 0, 0, 11).unwrap();
//! let found: Vec<_> = palindromes.iter().map(|r| r.sequence()).collect();
//! assert_eq!(found, vec!["CTTAAG", "AAGCTT"]);
//! ```

use crate::symmetry::AlignmentTrace;

mod exact;
mod max_motif;
mod symmetric;

pub use exact::*;
pub use max_motif::*;

#[cfg(test)]
mod test;

/// Outcome of an accepted window check.
enum Hit {
    Exact,
    Aligned(AlignmentTrace),
}

impl Hit {
    #[inline]
    fn into_trace(self) -> Option<AlignmentTrace> {
        match self {
            Hit::Exact => None,
            Hit::Aligned(trace) => Some(trace),
        }
    }
}
