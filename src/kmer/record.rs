use crate::{data::base::unpack, kmer::LengthMode, symmetry::AlignmentTrace};

/// A distinct window content with every offset it was found at.
///
/// `content` is packed 2 bits per base with `k` meaningful bases; unused
/// high slots of the last byte are zero, so equal k-mers have equal bytes.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct KmerRecord {
    content:   Vec<u8>,
    k:         usize,
    positions: Vec<usize>,
    count:     usize,
    trace:     Option<AlignmentTrace>,
}

impl KmerRecord {
    /// A record for a single occurrence at `position`.
    #[inline]
    #[must_use]
    pub fn new(content: Vec<u8>, k: usize, position: usize) -> Self {
        KmerRecord {
            content,
            k,
            positions: vec![position],
            count: 1,
            trace: None,
        }
    }

    /// A record for a known set of occurrences, in the order given.
    #[inline]
    #[must_use]
    pub fn from_positions(content: Vec<u8>, k: usize, positions: Vec<usize>) -> Self {
        KmerRecord {
            content,
            k,
            count: positions.len(),
            positions,
            trace: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn with_trace(mut self, trace: AlignmentTrace) -> Self {
        self.trace = Some(trace);
        self
    }

    #[inline]
    #[must_use]
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    #[inline]
    #[must_use]
    pub fn k(&self) -> usize {
        self.k
    }

    #[inline]
    #[must_use]
    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    #[inline]
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// The alignment of the first occurrence, when gapped matching was used.
    #[inline]
    #[must_use]
    pub fn trace(&self) -> Option<&AlignmentTrace> {
        self.trace.as_ref()
    }

    /// The k-mer as an uppercase string.
    #[must_use]
    pub fn sequence(&self) -> String {
        // Decoded bases are ASCII
        unpack(&self.content, self.k).into_iter().map(char::from).collect()
    }

    /// Takes over the occurrences of `other`. The existing trace is kept.
    #[inline]
    pub(crate) fn absorb(&mut self, other: KmerRecord) {
        self.positions.extend(other.positions);
        self.count += other.count;
    }

    /// Whether `other` holds the same k-mer under the given comparison.
    #[inline]
    pub(crate) fn same_kmer(&self, other: &KmerRecord, mode: LengthMode) -> bool {
        match mode {
            LengthMode::Fixed => self.content == other.content,
            LengthMode::Variable => self.k == other.k && self.content == other.content,
        }
    }
}
