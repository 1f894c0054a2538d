use crate::data::base::Base;
use std::{
    fs::File,
    io::{BufRead, BufReader, Error as IOError, ErrorKind, Read},
    path::Path,
};

#[cfg(test)]
mod test;

/// A [FASTA](https://en.wikipedia.org/wiki/FASTA_format) record together
/// with the offsets of every character outside `ACGTacgt`.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct FastaSeq {
    pub name:     String,
    pub sequence: Vec<u8>,
    unknown:      Vec<usize>,
}

impl FastaSeq {
    /// Builds a record, scanning `sequence` once for non-canonical
    /// characters.
    #[must_use]
    pub fn new(name: impl Into<String>, sequence: Vec<u8>) -> Self {
        let unknown = sequence
            .iter()
            .enumerate()
            .filter_map(|(i, &b)| Base::from_ascii(b).is_none().then_some(i))
            .collect();

        FastaSeq {
            name: name.into(),
            sequence,
            unknown,
        }
    }

    /// Ascending offsets of non-canonical characters.
    #[inline]
    #[must_use]
    pub fn unknown_positions(&self) -> &[usize] {
        &self.unknown
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

/// Structure for buffered reading of `FASTA` files.
#[derive(Debug)]
pub struct FastaReader<R: Read> {
    reader:       BufReader<R>,
    buffer:       Vec<u8>,
    first_record: bool,
    finished:     bool,
}

impl<R: Read> FastaReader<R> {
    /// Creates an iterator over FASTA data, wrapping the input in a buffered
    /// reader. No data is read until the first call to `next`.
    pub fn new(inner: R) -> Self {
        FastaReader {
            reader:       BufReader::new(inner),
            buffer:       Vec::new(),
            first_record: true,
            finished:     false,
        }
    }

    fn get_error(&mut self, msg: &str, header: Option<&str>) -> Option<std::io::Result<FastaSeq>> {
        self.finished = true;
        let err = if let Some(header) = header {
            IOError::new(ErrorKind::InvalidData, format!("{msg} See header: {header}"))
        } else {
            IOError::new(ErrorKind::InvalidData, msg)
        };
        Some(Err(err))
    }

    /// Consumes everything up to and including the first `>`, which must be
    /// preceded by whitespace only.
    fn skip_to_first_header(&mut self) -> Option<std::io::Result<FastaSeq>> {
        self.first_record = false;
        self.buffer.clear();

        let bytes = match self.reader.read_until(b'>', &mut self.buffer) {
            Ok(bytes) => bytes,
            Err(e) => return Some(Err(e)),
        };

        let leading = self.buffer.strip_suffix(b">").unwrap_or(&self.buffer);
        if !leading.iter().all(u8::is_ascii_whitespace) {
            return self.get_error("The FASTA file must start with a '>' symbol!", None);
        }

        if bytes == 0 || !self.buffer.ends_with(b">") {
            return self.get_error("No FASTA data found!", None);
        }

        None
    }
}

impl FastaReader<File> {
    /// Reads a fasta file into an iterator backed by a buffered reader.
    ///
    /// ## Errors
    ///
    /// Will return `Err` if the file cannot be opened or is empty. The file
    /// path is included in the error message.
    pub fn from_filename<P>(filename: P) -> std::io::Result<FastaReader<File>>
    where
        P: AsRef<Path>, {
        let path = filename.as_ref();
        let file = File::open(path).map_err(|err| {
            IOError::new(
                err.kind(),
                format!("file open error for FASTA: '{path}': {err}", path = path.display()),
            )
        })?;

        if file.metadata()?.len() == 0 {
            return Err(IOError::new(
                ErrorKind::InvalidInput,
                format!("file empty for FASTA: '{path}'", path = path.display()),
            ));
        }

        Ok(FastaReader::new(file))
    }
}

/// An iterator over records. Line breaks are removed from sequences; every
/// other byte is kept as written.
impl<R: Read> Iterator for FastaReader<R> {
    type Item = std::io::Result<FastaSeq>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        if self.first_record
            && let Some(err) = self.skip_to_first_header()
        {
            return Some(err);
        }

        // Read the full record, up to and including the next '>'
        self.buffer.clear();
        match self.reader.read_until(b'>', &mut self.buffer) {
            Ok(0) => {
                self.finished = true;
                return None;
            }
            Ok(_) => {}
            Err(e) => return Some(Err(e)),
        }

        if self.buffer.ends_with(b">") {
            self.buffer.pop();
        } else {
            self.finished = true;
        }

        let mut lines = self.buffer.split(|b| *b == b'\n');
        let header = lines.next().unwrap_or_default();
        let header = header.strip_suffix(b"\r").unwrap_or(header);
        if header.is_empty() {
            return self.get_error("Missing FASTA header!", None);
        }
        let name = String::from_utf8_lossy(header).into_owned();

        let mut sequence = Vec::with_capacity(self.buffer.len());
        for line in lines {
            sequence.extend_from_slice(line.strip_suffix(b"\r").unwrap_or(line));
        }

        if sequence.is_empty() {
            return self.get_error("Missing FASTA sequence!", Some(&name));
        }

        Some(Ok(FastaSeq::new(name, sequence)))
    }
}

impl std::fmt::Display for FastaSeq {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, ">{}\n{}\n", self.name, String::from_utf8_lossy(&self.sequence))
    }
}
