use crate::data::err::{GetCode, NessieError};
use std::{error::Error, fmt, io};

/// Inconsistent run arguments, detected before any record is read.
#[non_exhaustive]
#[derive(Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The k-mer searches need a positive `--kmin`.
    MissingKmin,
    BeginAfterEnd { begin: usize, end: usize },
    KminAboveKmax { k_min: usize, k_max: usize },
    /// `--interval` and `--shift` must be given together.
    IntervalWithoutShift,
    /// A zero sliding interval or shift.
    ZeroLength(&'static str),
    KmaxAboveInterval { k_max: usize, interval: usize },
    LongestWithoutKmax,
    /// A mismatch or gap percentage above the combined `--total`.
    ToleranceAboveTotal(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::MissingKmin => write!(f, "missing [-k/--kmin N] argument"),
            ConfigError::BeginAfterEnd { begin, end } => write!(
                f,
                "selected begin index [-b] {begin} is larger than selected ending index [-e] {end}"
            ),
            ConfigError::KminAboveKmax { k_min, k_max } => {
                write!(f, "selected kmin [-k] {k_min} is larger than selected kmax [-K] {k_max}")
            }
            ConfigError::IntervalWithoutShift => write!(f, "missing interval [-l] or shift [-s] argument"),
            ConfigError::ZeroLength(what) => write!(f, "{what} must be positive"),
            ConfigError::KmaxAboveInterval { k_max, interval } => write!(
                f,
                "selected kmax [-K] {k_max} is larger than selected sliding interval [-l] {interval}"
            ),
            ConfigError::LongestWithoutKmax => write!(f, "kmax [-K] is needed to search patterns with --max"),
            ConfigError::ToleranceAboveTotal(which) => write!(
                f,
                "allowed {which} percentage is higher than allowed mismatches and gaps total percentage [-t]"
            ),
        }
    }
}

impl fmt::Debug for ConfigError {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{self}")
    }
}

impl Error for ConfigError {}
impl GetCode for ConfigError {}

/// Failure while processing one record. The run continues with the next
/// record.
#[derive(Debug)]
pub enum RecordError {
    Search(NessieError),
    Io(io::Error),
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RecordError::Search(e) => write!(f, "{e}"),
            RecordError::Io(e) => write!(f, "{e}"),
        }
    }
}

impl Error for RecordError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            RecordError::Search(e) => Some(e),
            RecordError::Io(e) => Some(e),
        }
    }
}

impl GetCode for RecordError {
    fn get_code(&self) -> i32 {
        match self {
            RecordError::Search(e) => e.get_code(),
            RecordError::Io(e) => e.get_code(),
        }
    }
}

impl From<NessieError> for RecordError {
    fn from(e: NessieError) -> Self {
        RecordError::Search(e)
    }
}

impl From<io::Error> for RecordError {
    fn from(e: io::Error) -> Self {
        RecordError::Io(e)
    }
}
