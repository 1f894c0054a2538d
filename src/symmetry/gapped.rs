use crate::{
    data::{
        base::code_at,
        err::{NessieError, check_interval},
    },
    symmetry::{Caps, SymmetryKind},
};
use std::fmt;

const MATCH: i64 = 1;
const MISMATCH: i64 = -1;
const INDEL: i64 = -1;

/// One step of an alignment backtrack.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TraceOp {
    Match,
    Mismatch,
    /// A base of the first half without a counterpart.
    GapUp,
    /// A base of the second half without a counterpart.
    GapLeft,
}

impl TraceOp {
    /// The two-character tag used in output: `01`, `10`, `00`, and `11`.
    #[inline]
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            TraceOp::Match => "01",
            TraceOp::Mismatch => "10",
            TraceOp::GapUp => "00",
            TraceOp::GapLeft => "11",
        }
    }
}

/// The backtrack of an accepted gapped alignment. Operations are stored in
/// backtrack order, from the anti-diagonal back to the window's outer pair.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct AlignmentTrace {
    ops: Vec<TraceOp>,
}

impl AlignmentTrace {
    #[inline]
    #[must_use]
    pub fn ops(&self) -> &[TraceOp] {
        &self.ops
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn mismatches(&self) -> usize {
        self.ops.iter().filter(|op| **op == TraceOp::Mismatch).count()
    }

    #[inline]
    #[must_use]
    pub fn gaps(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, TraceOp::GapUp | TraceOp::GapLeft)).count()
    }
}

/// Tags are written from the outer pair inwards.
impl fmt::Display for AlignmentTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for op in self.ops.iter().rev() {
            f.write_str(op.tag())?;
        }
        Ok(())
    }
}

/// Aligns the packed window `mask` of length `k` against itself for `kind`
/// symmetry. Returns the trace when the alignment fits within `caps`.
#[must_use]
pub fn check_global_alignment(mask: &[u8], k: usize, caps: Caps, kind: SymmetryKind) -> Option<AlignmentTrace> {
    if k == 0 {
        return None;
    }
    align_within(mask, caps, kind, 0, k - 1)
}

/// Like [`check_global_alignment`], restricted to the offsets `[start, end]`
/// of the window.
///
/// # Errors
///
/// [`NessieError::InvalidInterval`] if `start > end` or `end` lies outside
/// the window.
pub fn check_global_alignment_interval(
    mask: &[u8], k: usize, caps: Caps, kind: SymmetryKind, start: usize, end: usize,
) -> Result<Option<AlignmentTrace>, NessieError> {
    check_interval(start, end, k)?;
    Ok(align_within(mask, caps, kind, start, end))
}

#[allow(clippy::cast_possible_wrap)]
fn align_within(mask: &[u8], caps: Caps, kind: SymmetryKind, start: usize, end: usize) -> Option<AlignmentTrace> {
    if !kind.pairs(code_at(mask, start), code_at(mask, end)) {
        return None;
    }

    let l = end - start + 1;
    if l < 2 {
        return Some(AlignmentTrace::default());
    }

    // Row i walks the first half forwards, column j the second half backwards
    let score = |i: usize, j: usize| {
        if kind.pairs(code_at(mask, start + i - 1), code_at(mask, end + 1 - j)) {
            MATCH
        } else {
            MISMATCH
        }
    };

    let w = l + 1;
    let mut matrix = vec![0i64; w * w];
    for i in 0..=l {
        matrix[i * w] = INDEL * i as i64;
        matrix[i] = INDEL * i as i64;
    }

    let mut best: Option<(i64, usize, usize)> = None;
    for i in 1..=l {
        for j in 1..=(l - i) {
            let diag = matrix[(i - 1) * w + j - 1] + score(i, j);
            let up = matrix[(i - 1) * w + j] + INDEL;
            let left = matrix[i * w + j - 1] + INDEL;
            let cell = diag.max(up).max(left);
            matrix[i * w + j] = cell;

            if i + j == l && best.is_none_or(|(max, _, _)| cell > max) {
                best = Some((cell, i, j));
            }
        }
    }

    let (max, max_i, max_j) = best?;
    let budget = if caps.max_gapmm > 0 {
        caps.max_gapmm
    } else {
        caps.max_mm + caps.max_gap
    };
    if max < max_i.max(max_j) as i64 - 2 * budget as i64 {
        return None;
    }

    let (mut i, mut j) = (max_i, max_j);
    let mut ops = Vec::with_capacity(l);
    while i > 0 || j > 0 {
        if i > 0 && j > 0 {
            let s = score(i, j);
            if matrix[i * w + j] == matrix[(i - 1) * w + j - 1] + s {
                ops.push(if s == MATCH { TraceOp::Match } else { TraceOp::Mismatch });
                i -= 1;
                j -= 1;
                continue;
            }
        }

        if i > 0 && matrix[i * w + j] == matrix[(i - 1) * w + j] + INDEL {
            ops.push(TraceOp::GapUp);
            i -= 1;
        } else {
            ops.push(TraceOp::GapLeft);
            j -= 1;
        }
    }

    let trace = AlignmentTrace { ops };
    within_caps(trace.mismatches(), trace.gaps(), caps).then_some(trace)
}

/// The acceptance table. A combined cap bounds the sum and any non-zero
/// individual cap still applies on top of it; without a combined cap both
/// individual caps apply, zero meaning none allowed.
#[inline]
fn within_caps(mismatches: usize, gaps: usize, caps: Caps) -> bool {
    if caps.max_gapmm > 0 {
        gaps + mismatches <= caps.max_gapmm
            && (caps.max_mm == 0 || mismatches <= caps.max_mm)
            && (caps.max_gap == 0 || gaps <= caps.max_gap)
    } else {
        gaps <= caps.max_gap && mismatches <= caps.max_mm
    }
}
