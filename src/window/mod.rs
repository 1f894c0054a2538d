//! ## Incremental window state.
//!
//! Symmetry searches visit every window of length `k` in an interval. Rather
//! than re-reading each window, a [`SlidingWindowScanner`] keeps the packed
//! content of the current window (its *mask*) and, optionally, a
//! [`MonomerWindowBitset`] recording where each base sits in it. Both are
//! updated in constant time per base as the window advances by one.
//!
//! ```
//! # use nessie::prelude::*;
//! let seq = EncodedSequence::from_seq(b"AACGT", Orientation::Forward).unwrap();
//! let mut scanner = SlidingWindowScanner::new(&seq, 3, 0, 4, true).unwrap();
//! assert_eq!(nessie::data::base::unpack(scanner.mask(), 3), b"AAC");
//!
//! assert!(scanner.advance());
//! assert_eq!(scanner.position(), 1);
//! assert_eq!(nessie::data::base::unpack(scanner.mask(), 3), b"ACG");
//! assert!(scanner.monomers().unwrap().get(Base::G, 2));
//! ```

mod monomer;
mod scanner;

pub use monomer::*;
pub use scanner::*;
