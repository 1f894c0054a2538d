
/// Splits the inclusive interval `[begin, end]` into maximal runs that hold no
/// non-canonical position.
///
/// `unknown` must be sorted ascending, as produced by
/// [`FastaSeq::unknown_positions`](crate::data::fasta::FastaSeq::unknown_positions).
/// Positions outside the interval are ignored, so leading and trailing
/// non-canonical characters are trimmed. Runs are returned in order as
/// inclusive `(start, end)` pairs. An interval with `begin > end` yields
/// nothing.
#[must_use]
pub fn canonical_intervals(begin: usize, end: usize, unknown: &[usize]) -> Vec<(usize, usize)> {
    let mut runs = Vec::new();
    if begin > end {
        return runs;
    }

    let mut run_start = begin;
    for &p in unknown.iter().filter(|&&p| (begin..=end).contains(&p)) {
        if p > run_start {
            runs.push((run_start, p - 1));
        }
        run_start = p + 1;
    }

    if run_start <= end {
        runs.push((run_start, end));
    }

    runs
}

/// Length of an inclusive `(start, end)` run.
#[inline]
#[must_use]
pub const fn run_len((start, end): (usize, usize)) -> usize {
    end - start + 1
}
