use super::*;
use crate::{
    data::{base::Orientation, encoded::EncodedSequence, err::NessieError},
    symmetry::{SymmetryKind, Tolerance, check_global_alignment, check_symmetry, check_triplex},
    window::MonomerWindowBitset,
};

fn encode(seq: &[u8]) -> EncodedSequence {
    EncodedSequence::from_seq(seq, Orientation::Forward).unwrap()
}

fn naive_positions(seq: &[u8], pattern: &[u8], start: usize, end: usize) -> Vec<usize> {
    if pattern.len() > end - start + 1 {
        return Vec::new();
    }
    (start..=end + 1 - pattern.len())
        .filter(|&n| seq[n..n + pattern.len()].eq_ignore_ascii_case(pattern))
        .collect()
}

#[test]
fn whole_sequence_hit() {
    let seq = encode(b"ACGT");
    let mut searcher = ExactSearcher::new(&seq);
    let record = searcher.check_kmer_char(b"ACGT", 0, 3, Orientation::Forward).unwrap();
    assert_eq!(record.positions(), &[0]);
    assert_eq!(record.count(), 1);
    assert_eq!(record.sequence(), "ACGT");
}

#[test]
fn odd_and_even_patterns() {
    let raw = b"ACGTACGTTACG";
    let seq = encode(raw);
    let mut searcher = ExactSearcher::new(&seq);

    for pattern in [&b"AC"[..], b"ACG", b"CGTA", b"TACG", b"GTTAC", b"T"] {
        let record = searcher.check_kmer_char(pattern, 0, raw.len() - 1, Orientation::Forward).unwrap();
        assert_eq!(record.positions(), naive_positions(raw, pattern, 0, raw.len() - 1), "{pattern:?}");
    }
}

#[test]
fn reverse_complement_pattern() {
    let seq = encode(b"TTGACCA");
    let mut searcher = ExactSearcher::new(&seq);
    // GTCA reverse complemented is TGAC
    let record = searcher.check_kmer_char(b"GTCA", 0, 6, Orientation::ReverseComplement).unwrap();
    assert_eq!(record.positions(), &[1]);
    assert_eq!(record.sequence(), "TGAC");
}

#[test]
fn not_found_and_bad_arguments() {
    let seq = encode(b"ACGT");
    let mut searcher = ExactSearcher::new(&seq);

    assert_eq!(
        searcher.check_kmer_char(b"TT", 0, 3, Orientation::Forward).unwrap_err(),
        NessieError::KmerNotFound
    );
    assert!(matches!(
        searcher.check_kmer_char(b"ACGTA", 0, 3, Orientation::Forward),
        Err(NessieError::InvalidRange(_))
    ));
    assert!(matches!(
        searcher.check_kmer_char(b"", 0, 3, Orientation::Forward),
        Err(NessieError::InvalidRange(_))
    ));
    assert!(matches!(
        searcher.check_kmer_char(b"AC", 2, 1, Orientation::Forward),
        Err(NessieError::InvalidInterval { .. })
    ));
    assert!(matches!(
        searcher.check_kmer_char(b"AN", 0, 3, Orientation::Forward),
        Err(NessieError::UnsupportedBase { base: b'N', .. })
    ));
    // Nothing was confirmed
    assert!(searcher.indexes_checked().all());
}

#[test]
fn pattern_must_fit_sub_interval() {
    let seq = encode(b"ACGTACGT");
    let mut searcher = ExactSearcher::new(&seq);
    let record = searcher.check_kmer_char(b"ACG", 1, 7, Orientation::Forward).unwrap();
    assert_eq!(record.positions(), &[4]);
    assert_eq!(
        searcher.check_kmer_char(b"ACG", 1, 5, Orientation::Forward).unwrap_err(),
        NessieError::KmerNotFound
    );
}

#[test]
fn indexes_checked_cleared_on_hits() {
    let seq = encode(b"ACGTACGT");
    let mut searcher = ExactSearcher::new(&seq);
    searcher.check_kmer_char(b"ACG", 0, 7, Orientation::Forward).unwrap();

    let cleared: Vec<_> = searcher.indexes_checked().iter_zeros().collect();
    assert_eq!(cleared, vec![0, 4]);
}

#[test]
fn single_base_skips_lenient_gaps() {
    let seq = EncodedSequence::new_lenient(b"ANA", 0, 2, Orientation::Forward).unwrap();
    let mut searcher = ExactSearcher::new(&seq);
    let record = searcher.check_kmer_char(b"A", 0, 2, Orientation::Forward).unwrap();
    assert_eq!(record.positions(), &[0, 2]);
}

#[test]
fn dirty_packed_slots_are_cleared() {
    let seq = encode(b"CCAC");
    let mut searcher = ExactSearcher::new(&seq);
    // Only the first two slots (C, C) are meaningful
    let record = searcher.check_kmer_bit(&[0b1111_0101], 2, 0, 3).unwrap();
    assert_eq!(record.content(), &[0b0000_0101]);
    assert_eq!(record.positions(), &[0]);
}

#[cfg(feature = "rand")]
#[test]
fn matches_naive_scan() {
    use crate::generate::{rand_patterns, rand_sequence};

    for seed in 0..6 {
        let raw = rand_sequence(b"ACGT", 1500, seed);
        let seq = encode(&raw);
        let (start, end) = (17, 1400);

        for k in 1..=13 {
            for pattern in rand_patterns(&raw[start..=end], k, 8, seed * 31 + k as u64) {
                let expected = naive_positions(&raw, &pattern, start, end);
                for step in [3, 50, DEFAULT_BATCH_STEP] {
                    let mut searcher = ExactSearcher::new(&seq).with_batch_step(step);
                    match searcher.check_kmer_char(&pattern, start, end, Orientation::Forward) {
                        Ok(record) => assert_eq!(record.positions(), expected, "k={k} step={step}"),
                        Err(e) => {
                            assert_eq!(e, NessieError::KmerNotFound);
                            assert!(expected.is_empty(), "k={k} step={step}");
                        }
                    }
                }
            }
        }
    }
}

#[test]
fn huge_batch_step_is_one_batch() {
    let seq = encode(b"ACGTACGTAC");
    for step in [usize::MAX, usize::MAX - 1, 10, 11] {
        let mut searcher = ExactSearcher::new(&seq).with_batch_step(step);
        let found = searcher.check_kmer_char(b"ACG", 0, 9, Orientation::Forward).unwrap();
        assert_eq!(found.positions(), &[0, 4], "step={step}");

        let found = searcher.check_kmer_char(b"GT", 1, 9, Orientation::Forward).unwrap();
        assert_eq!(found.positions(), &[2, 6], "step={step}");
    }
}

#[test]
fn palindrome_driver() {
    let seq = encode(b"AAGCTTAAGCTT");
    let found = seq.get_kmers_palindrome(6, None, 0, 0, 11).unwrap();

    assert_eq!(found.len(), 2);
    assert_eq!(found[0].sequence(), "CTTAAG");
    assert_eq!(found[0].positions(), &[3]);
    assert_eq!(found[1].sequence(), "AAGCTT");
    assert_eq!(found[1].positions(), &[0, 6]);
    assert_eq!(found[1].count(), 2);
    assert!(found[1].trace().is_none());
}

#[test]
fn mirror_driver_agrees_with_window_check() {
    let raw = b"ACCAGTTGACATTACAGGACCA";
    let seq = encode(raw);
    let end = raw.len() - 1;
    let found = seq.get_kmers_mirror(3, Some(6), 0, 0, end).unwrap();

    let mut expected = 0;
    for k in 3..=6 {
        for s in 0..=raw.len() - k {
            let window = MonomerWindowBitset::from_window(&seq, s, k);
            if check_symmetry(&window, SymmetryKind::Mirror, 0) {
                expected += 1;
                let hit = found
                    .iter()
                    .find(|r| r.k() == k && r.positions().contains(&s))
                    .unwrap_or_else(|| panic!("missing mirror at {s} k={k}"));
                assert_eq!(hit.sequence().as_bytes(), &raw[s..s + k]);
            }
        }
    }
    let total: usize = found.iter().map(|r| r.count()).sum();
    assert_eq!(total, expected);

    // Lengths appear in increasing order
    assert!(found.iter().map(|r| r.k()).is_sorted());
}

#[test]
fn gapped_driver_dispatch() {
    let seq = encode(b"AAGCTT");

    // No gaps allowed at this length: exact check, no trace
    let exact = seq.get_kmers_palindrome_gap(6, None, Tolerance::default(), 0, 5).unwrap();
    assert_eq!(exact.len(), 1);
    assert!(exact[0].trace().is_none());

    let tolerance = Tolerance {
        gap: 20,
        ..Tolerance::default()
    };
    let gapped = seq.get_kmers_palindrome_gap(6, None, tolerance, 0, 5).unwrap();
    assert_eq!(gapped.len(), 1);
    assert_eq!(gapped[0].trace().map(ToString::to_string).as_deref(), Some("010101"));

    let mirror = seq.get_kmers_mirror_gap(6, None, tolerance, 0, 5).unwrap();
    assert!(mirror.is_empty());
}

#[test]
fn triplex_driver() {
    let raw = b"AGGAGGAAC";
    let seq = encode(raw);
    let tolerance = Tolerance {
        purine: 0,
        ..Tolerance::default()
    };
    let found = seq.get_kmers_triplex(4, Some(7), tolerance, 0, raw.len() - 1).unwrap();

    for record in &found {
        for &p in record.positions() {
            let window = MonomerWindowBitset::from_window(&seq, p, record.k());
            assert!(check_triplex(&window, tolerance.caps(record.k())));
        }
    }
    assert!(found.iter().any(|r| r.sequence() == "AGGAGGA"));
}

#[test]
fn all_kmers_bucket_order() {
    let seq = encode(b"ACGTAC");
    let found = seq.get_all_kmers(2, None, 0, 5).unwrap();
    let listed: Vec<_> = found.iter().map(|r| (r.sequence(), r.positions().to_vec())).collect();
    assert_eq!(
        listed,
        vec![
            ("TA".to_string(), vec![3]),
            ("AC".to_string(), vec![0, 4]),
            ("CG".to_string(), vec![1]),
            ("GT".to_string(), vec![2]),
        ]
    );

    let total: usize = seq.get_all_kmers(1, Some(3), 0, 5).unwrap().iter().map(|r| r.count()).sum();
    assert_eq!(total, 6 + 5 + 4);
}

#[test]
fn driver_validation() {
    let seq = encode(b"ACGTACGT");
    assert!(matches!(seq.get_kmers_mirror(0, None, 0, 0, 7), Err(NessieError::InvalidRange(_))));
    assert!(matches!(seq.get_kmers_mirror(5, Some(4), 0, 0, 7), Err(NessieError::InvalidRange(_))));
    assert!(matches!(seq.get_kmers_palindrome(4, Some(9), 0, 0, 7), Err(NessieError::InvalidRange(_))));
    assert!(matches!(seq.get_all_kmers(2, None, 5, 4), Err(NessieError::InvalidInterval { .. })));
    assert!(matches!(seq.get_all_kmers(2, None, 0, 8), Err(NessieError::InvalidInterval { .. })));
    assert!(matches!(
        seq.get_max_kmers_mirror(Some(5), 4, Tolerance::default(), 0, 7),
        Err(NessieError::InvalidRange(_))
    ));
    assert!(matches!(
        seq.get_max_kmers_mirror(None, 9, Tolerance::default(), 0, 7),
        Err(NessieError::InvalidRange(_))
    ));
}

#[test]
fn max_palindromes_longest_first() {
    let seq = encode(b"GAATTCAAAA");
    let scanner = MaxMotifScanner::new(
        &seq,
        MotifCheck::Symmetry(SymmetryKind::Palindrome),
        Tolerance::default(),
        Some(4),
        6,
    )
    .unwrap();
    assert!(!scanner.is_gapped());

    let hits = scanner.scan(0, 9).unwrap();
    let found: Vec<_> = hits.iter().map(|h| (h.start, h.k)).collect();
    // The odd window TTCAA ignores its middle base
    assert_eq!(found, vec![(0, 6), (3, 5)]);

    let records = seq.get_max_kmers_palindrome(Some(4), 6, Tolerance::default(), 0, 9).unwrap();
    let listed: Vec<_> = records.iter().map(|r| (r.sequence(), r.positions().to_vec())).collect();
    assert_eq!(
        listed,
        vec![("TTCAA".to_string(), vec![3]), ("GAATTC".to_string(), vec![0])]
    );
}

#[test]
fn max_scan_tail_pass() {
    // The only palindrome starts after the last full k_max window
    let seq = encode(b"CCCCCCAATT");
    let hits = MaxMotifScanner::new(
        &seq,
        MotifCheck::Symmetry(SymmetryKind::Palindrome),
        Tolerance::default(),
        Some(4),
        8,
    )
    .unwrap()
    .scan(0, 9)
    .unwrap();
    assert_eq!(hits, vec![MotifHit { start: 6, k: 4, trace: None }]);
    assert_eq!(hits[0].end(), 9);
}

#[test]
fn missing_k_min_means_k_max() {
    let seq = encode(b"AAGCTTGCA");
    for k_min in [None, Some(0)] {
        let hits = MaxMotifScanner::new(
            &seq,
            MotifCheck::Symmetry(SymmetryKind::Palindrome),
            Tolerance::default(),
            k_min,
            6,
        )
        .unwrap()
        .scan(0, 8)
        .unwrap();
        assert!(hits.iter().all(|h| h.k == 6));
        assert_eq!(hits.first().map(|h| h.start), Some(0));
    }
}

#[cfg(feature = "rand")]
#[test]
fn max_motifs_never_nest() {
    use crate::generate::rand_sequence;

    let tolerances = [
        Tolerance {
            mismatch: 20,
            ..Tolerance::default()
        },
        Tolerance {
            mismatch: 10,
            gap: 10,
            ..Tolerance::default()
        },
    ];

    for seed in 0..4 {
        let raw = rand_sequence(b"ACGT", 400, seed);
        let seq = encode(&raw);

        for tolerance in tolerances {
            for check in [
                MotifCheck::Symmetry(SymmetryKind::Mirror),
                MotifCheck::Symmetry(SymmetryKind::Palindrome),
                MotifCheck::Triplex,
            ] {
                let scanner = MaxMotifScanner::new(&seq, check, tolerance, Some(4), 12).unwrap();
                let hits = scanner.scan(3, 390).unwrap();

                let mut covered: Option<usize> = None;
                for hit in &hits {
                    assert!((4..=12).contains(&hit.k));
                    assert!(hit.start >= 3 && hit.end() <= 390);
                    assert!(covered.is_none_or(|c| hit.end() > c), "{check:?} {hit:?}");
                    covered = Some(hit.end());

                    if let MotifCheck::Symmetry(kind) = check {
                        let caps = tolerance.caps(hit.k);
                        if scanner.is_gapped() {
                            let mask = seq.pack_window(hit.start, hit.k);
                            assert_eq!(check_global_alignment(&mask, hit.k, caps, kind), hit.trace);
                        } else {
                            let window = MonomerWindowBitset::from_window(&seq, hit.start, hit.k);
                            assert!(check_symmetry(&window, kind, caps.max_mm));
                        }
                    }
                }
                assert!(hits.windows(2).all(|w| w[0].start < w[1].start));
            }
        }
    }
}
