use crate::{
    data::err::{NessieError, check_interval},
    symmetry::SymmetryKind,
    window::MonomerWindowBitset,
};

/// Checks a whole window for `kind` symmetry, allowing up to `max_mm`
/// mismatching pairs. The outermost pair must always match.
#[must_use]
pub fn check_symmetry(window: &MonomerWindowBitset, kind: SymmetryKind, max_mm: usize) -> bool {
    symmetric_within(window, kind, max_mm, 0, window.k() - 1)
}

/// Checks the local offsets `[start, end]` of a window for `kind` symmetry.
///
/// # Errors
///
/// [`NessieError::InvalidInterval`] if `start > end` or `end` lies outside
/// the window.
pub fn check_symmetry_interval(
    window: &MonomerWindowBitset, kind: SymmetryKind, max_mm: usize, start: usize, end: usize,
) -> Result<bool, NessieError> {
    check_interval(start, end, window.k())?;
    Ok(symmetric_within(window, kind, max_mm, start, end))
}

fn symmetric_within(window: &MonomerWindowBitset, kind: SymmetryKind, max_mm: usize, start: usize, end: usize) -> bool {
    let half = (end - start + 1) >> 1;
    let mut mismatches = 0;

    for code in 0..4u8 {
        let partner = kind.partner(code);
        if window.holds(code, start) && !window.holds(partner, end) {
            return false;
        }
        for j in 1..half {
            if window.holds(code, start + j) && !window.holds(partner, end - j) {
                mismatches += 1;
            }
        }
    }

    mismatches <= max_mm
}
