use std::{error::Error, fmt};

/// Trait for specifying getting exit codes from errors.
pub trait GetCode {
    fn get_code(&self) -> i32 {
        1
    }
}

impl GetCode for std::io::Error {
    #[must_use]
    #[inline]
    fn get_code(&self) -> i32 {
        self.raw_os_error().unwrap_or(1)
    }
}

/// Trait for providing more graceful [`expect()`](std::result::Result::expect)
/// behavior but with a status code provided by [`GetCode`].
pub trait OrFail<T> {
    fn unwrap_or_fail(self) -> T;
    fn unwrap_or_die(self, msg: &str) -> T;
}

impl<T, E> OrFail<T> for Result<T, E>
where
    E: GetCode + fmt::Display,
{
    fn unwrap_or_fail(self) -> T {
        match self {
            Ok(result) => result,
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(e.get_code());
            }
        }
    }

    fn unwrap_or_die(self, msg: &str) -> T {
        match self {
            Ok(result) => result,
            Err(e) => {
                eprintln!("Error: {msg}\n\n{e}");
                std::process::exit(e.get_code());
            }
        }
    }
}

/// Errors raised by encoding, indexing and search routines. All of them are
/// raised before any index state is mutated.
#[non_exhaustive]
#[derive(Clone, PartialEq, Eq)]
pub enum NessieError {
    /// `start > end`, or an index past the end of the sequence.
    InvalidInterval { start: usize, end: usize, len: usize },
    /// A character outside `ACGTacgt` under strict encoding.
    UnsupportedBase { base: u8, position: usize },
    /// A length parameter that does not fit the interval or range.
    InvalidRange(&'static str),
    /// Exact search confirmed zero occurrences.
    KmerNotFound,
    /// A symmetry kind code that the aligner does not recognise.
    InvalidAlignmentType(i32),
}

impl fmt::Display for NessieError {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            NessieError::InvalidInterval { start, end, len } => write!(
                f,
                "invalid interval [{start}, {end}] for a sequence of length {len}"
            ),
            NessieError::UnsupportedBase { base, position } => {
                if base.is_ascii_graphic() {
                    write!(f, "unsupported base '{}' at position {position}", *base as char)
                } else {
                    write!(f, "unsupported byte 0x{base:02x} at position {position}")
                }
            }
            NessieError::InvalidRange(reason) => write!(f, "invalid range: {reason}"),
            NessieError::KmerNotFound => write!(f, "kmer not found"),
            NessieError::InvalidAlignmentType(kind) => {
                write!(f, "alignment type {kind} is not valid (0 = mirror, 1 = palindrome)")
            }
        }
    }
}

impl fmt::Debug for NessieError {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{self}")
    }
}

impl Error for NessieError {}

impl GetCode for NessieError {}

/// Validates an inclusive interval against a sequence of length `len`.
///
/// # Errors
///
/// Returns [`NessieError::InvalidInterval`] if `start > end` or `end` is not
/// a valid offset.
#[inline]
pub(crate) fn check_interval(start: usize, end: usize, len: usize) -> Result<(), NessieError> {
    if start > end || end >= len {
        Err(NessieError::InvalidInterval { start, end, len })
    } else {
        Ok(())
    }
}
