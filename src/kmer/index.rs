use crate::kmer::{KmerRecord, ResultSet};

/// How many leading content bytes select a bucket.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BucketWidth {
    /// One byte, 256 buckets.
    Narrow,
    /// Two bytes, 65536 buckets.
    Wide,
}

impl BucketWidth {
    /// Narrow while the content fits one byte, that is `k <= 4`.
    #[inline]
    #[must_use]
    pub const fn for_k(k: usize) -> Self {
        if k <= 4 { BucketWidth::Narrow } else { BucketWidth::Wide }
    }

    #[inline]
    #[must_use]
    pub const fn buckets(self) -> usize {
        match self {
            BucketWidth::Narrow => 1 << 8,
            BucketWidth::Wide => 1 << 16,
        }
    }

    #[inline]
    fn bucket(self, content: &[u8]) -> usize {
        let first = content.first().copied().map_or(0, usize::from);
        match self {
            BucketWidth::Narrow => first,
            BucketWidth::Wide => first | content.get(1).copied().map_or(0, usize::from) << 8,
        }
    }
}

/// Whether records of different lengths share the index.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum LengthMode {
    /// Every record has the same `k`; content alone identifies a k-mer.
    Fixed,
    /// Records of several lengths; `k` is compared before content.
    Variable,
}

/// Bucketed index merging records with identical content.
///
/// Within a bucket, records keep insertion order and no two hold the same
/// k-mer.
#[derive(Clone, Debug)]
pub struct KmerIndex {
    buckets: Vec<Vec<KmerRecord>>,
    width:   BucketWidth,
    mode:    LengthMode,
}

impl KmerIndex {
    #[must_use]
    pub fn new(width: BucketWidth, mode: LengthMode) -> Self {
        KmerIndex {
            buckets: vec![Vec::new(); width.buckets()],
            width,
            mode,
        }
    }

    /// An index for records that all have length `k`.
    #[inline]
    #[must_use]
    pub fn for_fixed_k(k: usize) -> Self {
        KmerIndex::new(BucketWidth::for_k(k), LengthMode::Fixed)
    }

    /// An index for records of lengths up to `k_max`.
    #[inline]
    #[must_use]
    pub fn variable(k_max: usize) -> Self {
        KmerIndex::new(BucketWidth::for_k(k_max), LengthMode::Variable)
    }

    /// Adds `record`, merging it into an existing record for the same k-mer
    /// when there is one.
    pub fn insert(&mut self, record: KmerRecord) {
        let chain = &mut self.buckets[self.width.bucket(record.content())];
        if let Some(existing) = chain.iter_mut().find(|r| r.same_kmer(&record, self.mode)) {
            existing.absorb(record);
        } else {
            chain.push(record);
        }
    }

    /// Number of distinct k-mers held.
    #[inline]
    #[must_use]
    pub fn count(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }

    /// Moves every record out, bucket by bucket and then in chain order,
    /// leaving the index empty.
    pub fn drain(&mut self) -> ResultSet {
        self.buckets.iter_mut().flat_map(std::mem::take).collect()
    }
}
