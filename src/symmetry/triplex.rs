use crate::{
    data::{
        base::{Base, count_codes},
        err::{NessieError, check_interval},
    },
    symmetry::{
        AlignmentTrace, Caps, SymmetryKind, check_global_alignment_interval, check_symmetry, check_symmetry_interval,
    },
    window::MonomerWindowBitset,
};

/// Purine-rich or pyrimidine-rich: the smaller class holds at most
/// `max_purine` bases.
#[inline]
fn biased(counts: [usize; 4], max_purine: usize) -> bool {
    let purines = counts[0] + counts[2];
    let pyrimidines = counts[1] + counts[3];
    purines <= max_purine || pyrimidines <= max_purine
}

/// Triplex check on a whole window: composition first, then an exact mirror
/// check with up to `caps.max_mm` mismatches.
#[must_use]
pub fn check_triplex(window: &MonomerWindowBitset, caps: Caps) -> bool {
    biased(window.counts(), caps.max_purine) && check_symmetry(window, SymmetryKind::Mirror, caps.max_mm)
}

/// Triplex check on the local offsets `[start, end]` of a window.
///
/// # Errors
///
/// [`NessieError::InvalidInterval`] if `start > end` or `end` lies outside
/// the window.
pub fn check_triplex_interval(
    window: &MonomerWindowBitset, caps: Caps, start: usize, end: usize,
) -> Result<bool, NessieError> {
    check_interval(start, end, window.k())?;
    let counts = Base::ALL.map(|b| window.count_in(b.code(), start..end + 1));
    if !biased(counts, caps.max_purine) {
        return Ok(false);
    }
    check_symmetry_interval(window, SymmetryKind::Mirror, caps.max_mm, start, end)
}

/// Gapped triplex check on a packed window: composition first, then a
/// gapped mirror alignment.
#[must_use]
pub fn check_triplex_gap(mask: &[u8], k: usize, caps: Caps) -> Option<AlignmentTrace> {
    if k == 0 {
        return None;
    }
    check_triplex_gap_interval(mask, k, caps, 0, k - 1).ok().flatten()
}

/// Gapped triplex check on the offsets `[start, end]` of a packed window.
///
/// # Errors
///
/// [`NessieError::InvalidInterval`] if `start > end` or `end` lies outside
/// the window.
pub fn check_triplex_gap_interval(
    mask: &[u8], k: usize, caps: Caps, start: usize, end: usize,
) -> Result<Option<AlignmentTrace>, NessieError> {
    check_interval(start, end, k)?;
    if !biased(count_codes(mask, start, end), caps.max_purine) {
        return Ok(None);
    }
    check_global_alignment_interval(mask, k, caps, SymmetryKind::Mirror, start, end)
}
