//! ## Text output for search results.
//!
//! A k-mer record is written as a `$|k|SEQ` line, with `|trace` appended when
//! gapped alignment produced it, followed by optional `@counts: n` and
//! `@indexes: p|p|...|` lines. Positions are shifted by a caller-supplied
//! offset so that hits in a sub-interval are reported against the whole
//! record.

use crate::kmer::{KmerRecord, ResultSet};
use std::io::{self, Write};

/// Which optional lines to write, and the offset added to every position.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct RecordFormat {
    pub counts:  bool,
    pub indexes: bool,
    pub offset:  usize,
}

impl Default for RecordFormat {
    fn default() -> Self {
        RecordFormat {
            counts:  true,
            indexes: true,
            offset:  0,
        }
    }
}

impl RecordFormat {
    #[inline]
    #[must_use]
    pub fn with_offset(self, offset: usize) -> Self {
        RecordFormat { offset, ..self }
    }

    /// Writes one record.
    ///
    /// # Errors
    ///
    /// Propagates any error from `out`.
    pub fn write_record<W: Write>(&self, out: &mut W, record: &KmerRecord) -> io::Result<()> {
        let mut buff = itoa::Buffer::new();

        out.write_all(b"$|")?;
        out.write_all(buff.format(record.k()).as_bytes())?;
        out.write_all(b"|")?;
        out.write_all(record.sequence().as_bytes())?;
        if let Some(trace) = record.trace() {
            write!(out, "|{trace}")?;
        }
        out.write_all(b"\n")?;

        if self.counts {
            out.write_all(b"@counts: ")?;
            out.write_all(buff.format(record.count()).as_bytes())?;
            out.write_all(b"\n")?;
        }

        if self.indexes {
            out.write_all(b"@indexes: ")?;
            for &p in record.positions() {
                out.write_all(buff.format(p + self.offset).as_bytes())?;
                out.write_all(b"|")?;
            }
            out.write_all(b"\n")?;
        }
        Ok(())
    }

    /// Writes every record of `results` in order.
    ///
    /// # Errors
    ///
    /// Propagates any error from `out`.
    pub fn write_results<W: Write>(&self, out: &mut W, results: &ResultSet) -> io::Result<()> {
        for record in results {
            self.write_record(out, record)?;
        }
        Ok(())
    }
}

/// Writes the `@begin-end` header that opens a metric block.
///
/// # Errors
///
/// Propagates any error from `out`.
pub fn write_interval_header<W: Write>(out: &mut W, begin: usize, end: usize) -> io::Result<()> {
    let mut buff = itoa::Buffer::new();
    out.write_all(b"@")?;
    out.write_all(buff.format(begin).as_bytes())?;
    out.write_all(b"-")?;
    out.write_all(buff.format(end).as_bytes())?;
    Ok(())
}

/// Writes a `position\tvalue` line of a sliding metric.
///
/// # Errors
///
/// Propagates any error from `out`.
pub fn write_position_value<W: Write>(out: &mut W, position: usize, value: f64) -> io::Result<()> {
    let mut buff = itoa::Buffer::new();
    out.write_all(buff.format(position).as_bytes())?;
    writeln!(out, "\t{value}")
}

/// Writes a sliding entropy line: the position, the score, and the window's
/// base counts as `A:n C:n G:n T:n`, all tab separated.
///
/// # Errors
///
/// Propagates any error from `out`.
pub fn write_entropy_window<W: Write>(
    out: &mut W, position: usize, entropy: f64, counts: [usize; 4],
) -> io::Result<()> {
    let mut buff = itoa::Buffer::new();
    out.write_all(buff.format(position).as_bytes())?;
    write!(out, "\t{entropy}")?;
    for (label, count) in [b"\tA:", b"\tC:", b"\tG:", b"\tT:"].into_iter().zip(counts) {
        out.write_all(label)?;
        out.write_all(buff.format(count).as_bytes())?;
    }
    out.write_all(b"\n")
}
