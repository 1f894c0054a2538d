use super::*;
use crate::data::base::{Base, Orientation};

fn code(a: Base, b: Base) -> u8 {
    dimer_code(a.code(), b.code())
}

#[test]
fn codes() {
    assert_eq!(code(Base::A, Base::A), 0);
    assert_eq!(code(Base::A, Base::C), 4);
    assert_eq!(code(Base::C, Base::G), 9);
    assert_eq!(code(Base::T, Base::T), 15);
}

#[test]
fn every_pair_indexed() {
    let seq = EncodedSequence::from_seq(b"ACGTA", Orientation::Forward).unwrap();
    let index = DimerIndex::new(&seq);

    assert!(index.contains(code(Base::A, Base::C), 0));
    assert!(index.contains(code(Base::C, Base::G), 1));
    assert!(index.contains(code(Base::G, Base::T), 2));
    assert!(index.contains(code(Base::T, Base::A), 3));
    assert!(!index.contains(code(Base::A, Base::C), 4));
    assert!(!index.contains(code(Base::A, Base::C), 100));

    let total: usize = (0..DIMER_CODES as u8).map(|c| index.count(c)).sum();
    assert_eq!(total, 4);
    assert_eq!(index.len(), 5);
}

#[test]
fn iteration_is_ascending_and_resumable() {
    let seq = EncodedSequence::from_seq(b"AAAAA", Orientation::Forward).unwrap();
    let index = DimerIndex::new(&seq);
    let aa = code(Base::A, Base::A);

    assert_eq!(index.iter(aa).collect::<Vec<_>>(), vec![0, 1, 2, 3]);
    assert_eq!(index.iter_from(aa, 2).collect::<Vec<_>>(), vec![2, 3]);
    assert_eq!(index.iter_from(aa, 9).count(), 0);
}

#[test]
fn skipped_positions_break_pairs() {
    let seq = EncodedSequence::new_lenient(b"ACNGT", 0, 4, Orientation::Forward).unwrap();
    let index = DimerIndex::new(&seq);

    assert!(index.contains(code(Base::A, Base::C), 0));
    assert!(index.contains(code(Base::G, Base::T), 3));
    // Nothing starts at 1 or 2: both pairs touch the skipped offset
    let total: usize = (0..DIMER_CODES as u8).map(|c| index.count(c)).sum();
    assert_eq!(total, 2);
}

#[test]
fn reverse_complement_index() {
    // Reverse complement of AACG is CGTT
    let seq = EncodedSequence::from_seq(b"AACG", Orientation::ReverseComplement).unwrap();
    let index = DimerIndex::new(&seq);
    assert!(index.contains(code(Base::C, Base::G), 0));
    assert!(index.contains(code(Base::T, Base::T), 2));
}
