//! ## Per-record processing for the `nessie` tool.
//!
//! A [`RunConfig`] holds one run's arguments. It is validated once with
//! [`RunConfig::validate`], and then [`process_record`] is applied to every
//! FASTA record in turn. The selected interval `[begin, end]` of a record is
//! split into runs of canonical bases with [`canonical_intervals`]. Each run
//! is encoded on its own, and positions in the output are reported against
//! the whole record.
//!
//! ```
//! # use nessie::prelude::*;
//! let mut config = RunConfig::new(Mode::Kmer(KmerSearch::Palindrome));
//! config.k_min = Some(6);
//!
//! let record = FastaSeq::new("chr", b"AAGCTTNNAAGCTT".to_vec());
//! let mut out = Vec::new();
//! process_record(&mut out, &record, &config, &[]).unwrap();
//! assert_eq!(
//!     String::from_utf8(out).unwrap(),
//!     ">chr\n$|6|AAGCTT\n@counts: 1\n@indexes: 0|\n$|6|AAGCTT\n@counts: 1\n@indexes: 8|\n"
//! );
//! ```

use crate::{
    composition::DEFAULT_LINGUISTIC_SPAN,
    data::{
        base::Orientation,
        encoded::EncodedSequence,
        err::{NessieError, check_interval},
        fasta::{FastaReader, FastaSeq},
        intervals::{canonical_intervals, run_len},
    },
    kmer::ResultSet,
    output::{RecordFormat, write_entropy_window, write_interval_header, write_position_value},
    search::ExactSearcher,
    symmetry::Tolerance,
};
use log::{debug, error, warn};
use std::io::{self, Read, Write};

mod errors;
pub use errors::*;


/// The k-mer searches, which share their length and output handling.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "fuzzing", derive(arbitrary::Arbitrary))]
pub enum KmerSearch {
    Palindrome,
    Mirror,
    Triplex,
    /// Every k-mer, without any symmetry test.
    AllKmer,
}

/// What a run computes for each record.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "fuzzing", derive(arbitrary::Arbitrary))]
pub enum Mode {
    Kmer(KmerSearch),
    /// Exact occurrences of each motif from a motif file.
    Motif,
    Entropy,
    Linguistic,
}

/// Arguments of one run.
///
/// `end` defaults to the last base of each record. The sliding metrics are
/// used when `interval` and `shift` are both set; otherwise a single score
/// per canonical run is reported.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct RunConfig {
    pub mode:        Mode,
    pub begin:       usize,
    pub end:         Option<usize>,
    /// Write the `@counts` line of each k-mer record.
    pub counts:      bool,
    /// Write the `@indexes` line of each k-mer record.
    pub indexes:     bool,
    pub k_min:       Option<usize>,
    pub k_max:       Option<usize>,
    pub tolerance:   Tolerance,
    /// Report only the longest non-overlapping motifs.
    pub longest:     bool,
    pub interval:    Option<usize>,
    pub shift:       Option<usize>,
    pub orientation: Orientation,
}

impl RunConfig {
    /// A configuration for `mode` over whole records with every output line
    /// enabled and no tolerances.
    #[must_use]
    pub fn new(mode: Mode) -> Self {
        RunConfig {
            mode,
            begin:       0,
            end:         None,
            counts:      true,
            indexes:     true,
            k_min:       None,
            k_max:       None,
            tolerance:   Tolerance::default(),
            longest:     false,
            interval:    None,
            shift:       None,
            orientation: Orientation::Forward,
        }
    }

    /// Checks the arguments that do not depend on any record.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if matches!(self.mode, Mode::Kmer(_)) && !self.k_min.is_some_and(|k| k > 0) {
            return Err(ConfigError::MissingKmin);
        }

        if let Some(end) = self.end
            && self.begin > end
        {
            return Err(ConfigError::BeginAfterEnd { begin: self.begin, end });
        }

        if let (Some(k_min), Some(k_max)) = (self.k_min, self.k_max)
            && k_min > k_max
        {
            return Err(ConfigError::KminAboveKmax { k_min, k_max });
        }

        match (self.interval, self.shift) {
            (Some(0), _) => return Err(ConfigError::ZeroLength("sliding interval [-l]")),
            (_, Some(0)) => return Err(ConfigError::ZeroLength("shift [-s]")),
            (Some(_), None) | (None, Some(_)) => return Err(ConfigError::IntervalWithoutShift),
            (Some(interval), Some(_)) => {
                if let Some(k_max) = self.k_max
                    && k_max > interval
                {
                    return Err(ConfigError::KmaxAboveInterval { k_max, interval });
                }
            }
            (None, None) => {}
        }

        if self.longest && self.k_max.is_none() {
            return Err(ConfigError::LongestWithoutKmax);
        }

        let Tolerance { mismatch, gap, total, .. } = self.tolerance;
        if total > 0 {
            if mismatch > total {
                return Err(ConfigError::ToleranceAboveTotal("mismatches [-m]"));
            }
            if gap > total {
                return Err(ConfigError::ToleranceAboveTotal("gaps [-g]"));
            }
            if mismatch + gap > total {
                return Err(ConfigError::ToleranceAboveTotal("mismatches and gaps"));
            }
        }

        Ok(())
    }

    /// Output lines to write for k-mer records of a run starting at `offset`.
    #[inline]
    #[must_use]
    pub fn record_format(&self, offset: usize) -> RecordFormat {
        RecordFormat {
            counts: self.counts,
            indexes: self.indexes,
            offset,
        }
    }

    fn sliding(&self) -> Option<(usize, usize)> {
        self.interval.zip(self.shift)
    }
}

/// Counts of records handled by [`run`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct RunSummary {
    pub processed: usize,
    pub failed:    usize,
}

/// Processes every record of `records`, writing results to `out`.
///
/// A record that fails is reported to `failures` as `>name` followed by the
/// message, and processing moves on to the next record. Output already
/// written for the failed record is kept.
///
/// # Errors
///
/// Stops at the first error reading `records` or writing `failures`.
pub fn run<R, W, L>(
    records: FastaReader<R>, out: &mut W, failures: &mut L, config: &RunConfig, motifs: &[FastaSeq],
) -> io::Result<RunSummary>
where
    R: Read,
    W: Write,
    L: Write, {
    let mut summary = RunSummary::default();

    for record in records {
        let record = record?;
        summary.processed += 1;

        if let Err(e) = process_record(out, &record, config, motifs) {
            error!("{}: {e}", record.name);
            writeln!(failures, ">{}\n{e}", record.name)?;
            summary.failed += 1;
        }
    }

    Ok(summary)
}

/// Checks `record` against `config` and writes its results to `out`,
/// starting with a `>name` line.
///
/// # Errors
///
/// - [`NessieError::InvalidInterval`] if the selected interval does not fit
///   the record.
/// - [`NessieError::InvalidRange`] if a length argument is longer than the
///   selected interval, or a search rejects its arguments.
/// - Any error writing to `out`.
pub fn process_record<W: Write>(
    out: &mut W, record: &FastaSeq, config: &RunConfig, motifs: &[FastaSeq],
) -> Result<(), RecordError> {
    let len = record.len();
    let begin = config.begin;
    let end = config.end.unwrap_or(len.saturating_sub(1));
    check_interval(begin, end, len)?;

    let span = end - begin + 1;
    if config.interval.is_some_and(|l| l > span) {
        return Err(NessieError::InvalidRange("sliding interval is longer than the selected interval").into());
    }
    if config.k_max.is_some_and(|k| k > span) {
        return Err(NessieError::InvalidRange("k_max is longer than the selected interval").into());
    }
    if matches!(config.mode, Mode::Kmer(_)) && config.k_max.is_none() && config.k_min.is_some_and(|k| k > span) {
        return Err(NessieError::InvalidRange("k_min is longer than the selected interval").into());
    }

    writeln!(out, ">{}", record.name)?;
    let runs = canonical_intervals(begin, end, record.unknown_positions());
    debug!("{}: {} canonical runs in [{begin}, {end}]", record.name, runs.len());

    match config.mode {
        Mode::Kmer(search) => write_kmers(out, record, config, search, &runs),
        Mode::Motif => write_motifs(out, record, config, motifs, begin, end),
        Mode::Entropy => write_entropy(out, record, config, &runs),
        Mode::Linguistic => write_linguistic(out, record, config, &runs),
    }
}

/// Runs of at least `min_len` bases; shorter ones are logged and dropped.
fn long_runs<'a>(
    record: &'a FastaSeq, runs: &'a [(usize, usize)], min_len: usize,
) -> impl Iterator<Item = (usize, usize)> + 'a {
    runs.iter().copied().filter(move |&run| {
        let keep = run_len(run) >= min_len;
        if !keep {
            warn!(
                "{}: skipping run [{}, {}], shorter than {min_len}",
                record.name, run.0, run.1
            );
        }
        keep
    })
}

fn encode_run(
    record: &FastaSeq, (start, end): (usize, usize), config: &RunConfig,
) -> Result<EncodedSequence, NessieError> {
    EncodedSequence::new(&record.sequence, start, end, config.orientation)
}

fn write_kmers<W: Write>(
    out: &mut W, record: &FastaSeq, config: &RunConfig, search: KmerSearch, runs: &[(usize, usize)],
) -> Result<(), RecordError> {
    let k_min = config.k_min.ok_or(NessieError::InvalidRange("k_min is required"))?;
    let k_max = config.k_max.unwrap_or(k_min);

    for run in long_runs(record, runs, k_max) {
        let seq = encode_run(record, run, config)?;
        let results = search_run(&seq, config, search, k_min, k_max)?;
        config.record_format(run.0).write_results(out, &results)?;
    }
    Ok(())
}

fn search_run(
    seq: &EncodedSequence, config: &RunConfig, search: KmerSearch, k_min: usize, k_max: usize,
) -> Result<ResultSet, NessieError> {
    let last = seq.last_index();
    let tolerance = config.tolerance;

    match (search, config.longest) {
        (KmerSearch::Palindrome, false) => seq.get_kmers_palindrome_gap(k_min, Some(k_max), tolerance, 0, last),
        (KmerSearch::Palindrome, true) => seq.get_max_kmers_palindrome(Some(k_min), k_max, tolerance, 0, last),
        (KmerSearch::Mirror, false) => seq.get_kmers_mirror_gap(k_min, Some(k_max), tolerance, 0, last),
        (KmerSearch::Mirror, true) => seq.get_max_kmers_mirror(Some(k_min), k_max, tolerance, 0, last),
        (KmerSearch::Triplex, false) => seq.get_kmers_triplex(k_min, Some(k_max), tolerance, 0, last),
        (KmerSearch::Triplex, true) => seq.get_max_kmers_triplex(Some(k_min), k_max, tolerance, 0, last),
        (KmerSearch::AllKmer, _) => seq.get_all_kmers(k_min, Some(k_max), 0, last),
    }
}

fn write_motifs<W: Write>(
    out: &mut W, record: &FastaSeq, config: &RunConfig, motifs: &[FastaSeq], begin: usize, end: usize,
) -> Result<(), RecordError> {
    let seq = EncodedSequence::new_lenient(&record.sequence, begin, end, config.orientation)?;
    let mut searcher = ExactSearcher::new(&seq);
    let format = config.record_format(begin);

    for motif in motifs {
        match searcher.check_kmer_char(&motif.sequence, 0, seq.last_index(), config.orientation) {
            Ok(found) => {
                writeln!(out, "!{}", motif.name)?;
                format.write_record(out, &found)?;
            }
            Err(e) => debug!("{}: motif {} skipped: {e}", record.name, motif.name),
        }
    }
    Ok(())
}

fn write_entropy<W: Write>(
    out: &mut W, record: &FastaSeq, config: &RunConfig, runs: &[(usize, usize)],
) -> Result<(), RecordError> {
    if let Some((interval, shift)) = config.sliding() {
        for run in long_runs(record, runs, interval) {
            let seq = encode_run(record, run, config)?;
            let windows = seq.shannon_entropy_sliding(interval, shift, 0, seq.last_index())?;

            write_interval_header(out, run.0, run.1)?;
            out.write_all(b"\n")?;
            for window in windows {
                write_entropy_window(out, run.0 + window.start, window.entropy, window.counts)?;
            }
        }
    } else {
        for run in long_runs(record, runs, 2) {
            let seq = encode_run(record, run, config)?;
            write_interval_header(out, run.0, run.1)?;
            writeln!(out, ": {}", seq.shannon_entropy())?;
        }
    }
    Ok(())
}

fn write_linguistic<W: Write>(
    out: &mut W, record: &FastaSeq, config: &RunConfig, runs: &[(usize, usize)],
) -> Result<(), RecordError> {
    if let Some((interval, shift)) = config.sliding() {
        for run in long_runs(record, runs, interval) {
            let seq = encode_run(record, run, config)?;
            let scores = seq.linguistic_complexity_sliding(
                Some(interval),
                Some(shift),
                0,
                seq.last_index(),
                config.k_min,
                config.k_max,
            )?;

            write_interval_header(out, run.0, run.1)?;
            out.write_all(b"\n")?;
            for (start, score) in scores {
                write_position_value(out, run.0 + start, score)?;
            }
        }
    } else {
        let k_max = config.k_max.unwrap_or(record.len().min(DEFAULT_LINGUISTIC_SPAN));
        for run in long_runs(record, runs, k_max) {
            let seq = encode_run(record, run, config)?;
            let score = seq.linguistic_complexity_interval(0, seq.last_index(), config.k_min, Some(k_max))?;
            write_interval_header(out, run.0, run.1)?;
            writeln!(out, ": {score}")?;
        }
    }
    Ok(())
}
