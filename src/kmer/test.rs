use super::*;
use crate::{
    data::base::{Orientation, pack_pattern},
    symmetry::{AlignmentTrace, Caps, SymmetryKind, check_global_alignment},
};

fn record(pattern: &[u8], position: usize) -> KmerRecord {
    KmerRecord::new(pack_pattern(pattern, Orientation::Forward).unwrap(), pattern.len(), position)
}

#[test]
fn bucket_widths() {
    assert_eq!(BucketWidth::for_k(1), BucketWidth::Narrow);
    assert_eq!(BucketWidth::for_k(4), BucketWidth::Narrow);
    assert_eq!(BucketWidth::for_k(5), BucketWidth::Wide);
    assert_eq!(BucketWidth::Narrow.buckets(), 256);
    assert_eq!(BucketWidth::Wide.buckets(), 65536);
}

#[test]
fn record_accessors() {
    let r = record(b"ACGTTG", 7);
    assert_eq!(r.k(), 6);
    assert_eq!(r.count(), 1);
    assert_eq!(r.positions(), &[7]);
    assert_eq!(r.sequence(), "ACGTTG");
    assert_eq!(r.content().len(), 2);
    assert!(r.trace().is_none());

    let r = KmerRecord::from_positions(pack_pattern(b"AC", Orientation::Forward).unwrap(), 2, vec![1, 5, 9]);
    assert_eq!(r.count(), 3);
}

#[test]
fn merges_identical_content() {
    let mut index = KmerIndex::for_fixed_k(6);
    index.insert(record(b"ACGTTG", 0));
    index.insert(record(b"ACGTTA", 1));
    index.insert(record(b"ACGTTG", 5));
    index.insert(record(b"ACGTTG", 8));
    assert_eq!(index.count(), 2);

    let results = index.drain();
    let merged = results.iter().find(|r| r.sequence() == "ACGTTG").unwrap();
    assert_eq!(merged.positions(), &[0, 5, 8]);
    assert_eq!(merged.count(), 3);
    assert!(index.is_empty());
    assert_eq!(index.count(), 0);
}

#[test]
fn same_bucket_distinct_chain_entries() {
    // Same first two bytes, different third byte
    let mut index = KmerIndex::for_fixed_k(9);
    index.insert(record(b"AAAAAAAAA", 0));
    index.insert(record(b"AAAAAAAAC", 1));
    index.insert(record(b"AAAAAAAAA", 2));
    assert_eq!(index.count(), 2);

    let results = index.drain();
    assert_eq!(results[0].sequence(), "AAAAAAAAA");
    assert_eq!(results[0].positions(), &[0, 2]);
    assert_eq!(results[1].sequence(), "AAAAAAAAC");
}

#[test]
fn drains_in_bucket_order() {
    let mut index = KmerIndex::for_fixed_k(2);
    // Packed first bytes: TT = 0x0F, CA = 0x01, AA = 0x00
    index.insert(record(b"TT", 0));
    index.insert(record(b"CA", 1));
    index.insert(record(b"AA", 2));

    let order: Vec<_> = index.drain().into_iter().map(|r| r.sequence()).collect();
    assert_eq!(order, vec!["AA", "CA", "TT"]);
}

#[test]
fn variable_mode_compares_length() {
    // "AAAA" and "AAA" pack to the same byte
    let mut fixed = KmerIndex::new(BucketWidth::Narrow, LengthMode::Fixed);
    fixed.insert(record(b"AAAA", 0));
    fixed.insert(record(b"AAA", 4));
    assert_eq!(fixed.count(), 1);

    let mut variable = KmerIndex::variable(4);
    variable.insert(record(b"AAAA", 0));
    variable.insert(record(b"AAA", 4));
    variable.insert(record(b"AAA", 9));
    assert_eq!(variable.count(), 2);

    let results = variable.drain();
    assert_eq!(results[0].k(), 4);
    assert_eq!(results[1].positions(), &[4, 9]);
}

#[test]
fn first_trace_is_kept() {
    let packed = pack_pattern(b"AAGCTT", Orientation::Forward).unwrap();
    let trace = check_global_alignment(&packed, 6, Caps::default(), SymmetryKind::Palindrome).unwrap();

    let mut index = KmerIndex::for_fixed_k(6);
    index.insert(KmerRecord::new(packed.clone(), 6, 3).with_trace(trace.clone()));
    index.insert(KmerRecord::new(packed, 6, 10).with_trace(AlignmentTrace::default()));

    let results = index.drain();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].trace(), Some(&trace));
    assert_eq!(results[0].positions(), &[3, 10]);
}

#[test]
fn result_set_append() {
    let mut first: ResultSet = [record(b"AC", 0)].into_iter().collect();
    let mut second = ResultSet::new();
    second.push(record(b"GT", 4));
    second.extend([record(b"TT", 6)]);

    first.append(&mut second);
    assert!(second.is_empty());
    assert_eq!(first.len(), 3);
    assert_eq!((&first).into_iter().map(KmerRecord::k).sum::<usize>(), 6);
}
