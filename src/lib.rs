#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]
#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::wildcard_imports,
    clippy::enum_glob_use
)]

/// Shannon entropy and linguistic complexity.
pub mod composition;
/// Sequence encoding, FASTA records, and errors.
pub mod data;
/// Dimer position index used by exact search.
pub mod index;
/// Deduplicated k-mer records and result sets.
pub mod kmer;
/// Text output of results.
pub mod output;
/// Per-record processing driven by a run configuration.
pub mod pipeline;
/// Exact, symmetric, and longest-motif searches.
pub mod search;
/// Mirror, palindrome, and triplex window checks.
pub mod symmetry;
/// Sliding window state.
pub mod window;

/// Generate sequences and other data.
#[cfg(feature = "rand")]
pub mod generate;

/// Common structures and traits re-exported
pub mod prelude {
    pub use crate::composition::EntropyWindow;
    pub use crate::data::{
        base::{Base, Orientation, pack_pattern},
        encoded::EncodedSequence,
        err::{NessieError, OrFail},
        fasta::{FastaReader, FastaSeq},
        intervals::canonical_intervals,
    };
    #[cfg(feature = "rand")]
    pub use crate::generate::rand_sequence;
    pub use crate::index::DimerIndex;
    pub use crate::kmer::{KmerIndex, KmerRecord, ResultSet};
    pub use crate::output::RecordFormat;
    pub use crate::pipeline::{KmerSearch, Mode, RunConfig, process_record};
    pub use crate::search::{ExactSearcher, MaxMotifScanner, MotifCheck};
    pub use crate::symmetry::{
        AlignmentTrace, Caps, SymmetryKind, Tolerance, check_global_alignment, check_symmetry, check_triplex,
    };
    pub use crate::window::{MonomerWindowBitset, SlidingWindowScanner};
}
