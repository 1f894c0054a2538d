//! ## Whole-sequence dimer index.
//!
//! A [`DimerIndex`] holds one position set per ordered pair of adjacent
//! bases. It is built once per [`EncodedSequence`] and answers the membership
//! and ascending-iteration queries that exact substring search needs.
//!
//! ```
//! # use nessie::prelude::*;
//! # use nessie::index::dimer_code;
//! let seq = EncodedSequence::from_seq(b"ACGTAC", Orientation::Forward).unwrap();
//! let index = DimerIndex::new(&seq);
//!
//! let ac = dimer_code(Base::A.code(), Base::C.code());
//! assert_eq!(index.iter(ac).collect::<Vec<_>>(), vec![0, 4]);
//! assert!(index.contains(ac, 4));
//! assert_eq!(index.iter_from(ac, 1).collect::<Vec<_>>(), vec![4]);
//! ```
//!
//! [`EncodedSequence`]: crate::data::encoded::EncodedSequence

mod dimer;

pub use dimer::*;
