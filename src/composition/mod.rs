//! ## Sequence complexity metrics.
//!
//! Shannon entropy and linguistic complexity over an interval of an
//! [`EncodedSequence`](crate::data::encoded::EncodedSequence), either as a
//! single score or for a series of windows.
//!
//! ```
//! # use nessie::prelude::*;
//! let seq = EncodedSequence::from_seq(b"AAAAACGT", Orientation::Forward).unwrap();
//! assert_eq!(seq.shannon_entropy_interval(0, 3).unwrap(), 0.0);
//! assert_eq!(seq.shannon_entropy_interval(4, 7).unwrap(), 1.0);
//!
//! let windows = seq.shannon_entropy_sliding(4, 2, 0, 7).unwrap();
//! assert_eq!(windows.iter().map(|w| w.start).collect::<Vec<_>>(), vec![0, 2, 4]);
//!
//! let lc = seq.linguistic_complexity_interval(0, 3, Some(1), Some(1)).unwrap();
//! assert_eq!(lc, 0.25);
//! ```

mod entropy;
mod linguistic;

pub use entropy::*;
pub use linguistic::*;
