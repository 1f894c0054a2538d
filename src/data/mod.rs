//! ## Sequence data: encoding, records, and errors.
//!
//! Everything downstream works on an [`EncodedSequence`], a 2-bit packed copy
//! of one canonical interval of a record. The layout is fixed: four bases per
//! byte, with lower sequence offsets in the lower bits, and the codes `A =
//! 00`, `C = 01`, `G = 10`, `T = 11`.
//!
//! ```
//! # use nessie::prelude::*;
//! let seq = EncodedSequence::from_seq(b"ACGTacgt", Orientation::Forward).unwrap();
//! assert_eq!(seq.as_packed(), &[0b1110_0100, 0b1110_0100]);
//! assert_eq!(seq.to_string(), "ACGTACGT");
//! assert_eq!(seq.counts_lower(), [1, 1, 1, 1]);
//!
//! let rc = EncodedSequence::from_seq(b"AACG", Orientation::ReverseComplement).unwrap();
//! assert_eq!(rc.to_string(), "CGTT");
//! ```
//!
//! Records come from [`FastaReader`], which also records the offsets of every
//! character outside `ACGTacgt`. [`canonical_intervals`] turns those offsets
//! into the runs that can be encoded strictly.
//!
//! [`EncodedSequence`]: encoded::EncodedSequence
//! [`FastaReader`]: fasta::FastaReader
//! [`canonical_intervals`]: intervals::canonical_intervals

pub mod base;
pub mod encoded;
pub mod err;
pub mod fasta;
pub mod intervals;
