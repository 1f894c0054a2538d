//! ## Deduplicating k-mer storage.
//!
//! Every accepted window becomes a [`KmerRecord`]. Records are gathered in a
//! [`KmerIndex`], which merges records with identical packed content, and are
//! finally drained into a flat [`ResultSet`].
//!
//! ```
//! # use nessie::prelude::*;
//! let mut index = KmerIndex::for_fixed_k(3);
//! index.insert(KmerRecord::new(pack_pattern(b"ACG", Orientation::Forward).unwrap(), 3, 0));
//! index.insert(KmerRecord::new(pack_pattern(b"TTT", Orientation::Forward).unwrap(), 3, 4));
//! index.insert(KmerRecord::new(pack_pattern(b"ACG", Orientation::Forward).unwrap(), 3, 9));
//! assert_eq!(index.count(), 2);
//!
//! let results = index.drain();
//! assert_eq!(results.len(), 2);
//! assert_eq!(results[0].sequence(), "ACG");
//! assert_eq!(results[0].positions(), &[0, 9]);
//! assert!(index.is_empty());
//! ```

mod index;
mod record;

pub use index::*;
pub use record::*;

#[cfg(test)]
mod test;

/// Records drained from one or more [`KmerIndex`] passes, in bucket order
/// within each pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResultSet {
    records: Vec<KmerRecord>,
}

impl ResultSet {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        ResultSet::default()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[inline]
    pub fn push(&mut self, record: KmerRecord) {
        self.records.push(record);
    }

    /// Appends every record of `other`, keeping their order.
    #[inline]
    pub fn append(&mut self, other: &mut ResultSet) {
        self.records.append(&mut other.records);
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, KmerRecord> {
        self.records.iter()
    }

    #[inline]
    #[must_use]
    pub fn records(&self) -> &[KmerRecord] {
        &self.records
    }
}

impl std::ops::Index<usize> for ResultSet {
    type Output = KmerRecord;

    #[inline]
    fn index(&self, i: usize) -> &KmerRecord {
        &self.records[i]
    }
}

impl Extend<KmerRecord> for ResultSet {
    #[inline]
    fn extend<T: IntoIterator<Item = KmerRecord>>(&mut self, iter: T) {
        self.records.extend(iter);
    }
}

impl FromIterator<KmerRecord> for ResultSet {
    #[inline]
    fn from_iter<T: IntoIterator<Item = KmerRecord>>(iter: T) -> Self {
        ResultSet {
            records: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ResultSet {
    type Item = KmerRecord;
    type IntoIter = std::vec::IntoIter<KmerRecord>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a KmerRecord;
    type IntoIter = std::slice::Iter<'a, KmerRecord>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
