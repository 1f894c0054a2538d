use nessie::prelude::*;
use std::collections::BTreeMap;

const SEQ: &[u8] = b"GAATTCTTAGCTAAGGTACCTTGCAAGCTTTTAATTAAACGCGTTATATAGGCCTAGG";

fn complement(b: u8) -> u8 {
    match b {
        b'A' => b'T',
        b'C' => b'G',
        b'G' => b'C',
        _ => b'A',
    }
}

/// Every window of length `k` whose pairs `(i, k - 1 - i)` satisfy `pairs`,
/// keyed by content.
fn naive(seq: &[u8], k: usize, pairs: impl Fn(u8, u8) -> bool) -> BTreeMap<Vec<u8>, Vec<usize>> {
    let mut found: BTreeMap<Vec<u8>, Vec<usize>> = BTreeMap::new();
    for (p, w) in seq.windows(k).enumerate() {
        if (0..k / 2).all(|i| pairs(w[i], w[k - 1 - i])) {
            found.entry(w.to_vec()).or_default().push(p);
        }
    }
    found
}

fn collect(results: &ResultSet, k: usize) -> BTreeMap<Vec<u8>, Vec<usize>> {
    results
        .iter()
        .filter(|r| r.k() == k)
        .map(|r| (r.sequence().into_bytes(), r.positions().to_vec()))
        .collect()
}

#[test]
fn palindromes_and_mirrors_match_naive_scan() {
    let seq = EncodedSequence::from_seq(SEQ, Orientation::Forward).unwrap();
    let last = SEQ.len() - 1;

    let palindromes = seq.get_kmers_palindrome(4, Some(8), 0, 0, last).unwrap();
    let mirrors = seq.get_kmers_mirror(4, Some(8), 0, 0, last).unwrap();

    for k in 4..=8 {
        assert_eq!(
            collect(&palindromes, k),
            naive(SEQ, k, |a, b| a == complement(b)),
            "palindromes k={k}"
        );
        assert_eq!(collect(&mirrors, k), naive(SEQ, k, |a, b| a == b), "mirrors k={k}");
    }
}

#[test]
fn results_are_grouped_by_increasing_length() {
    let seq = EncodedSequence::from_seq(SEQ, Orientation::Forward).unwrap();
    let results = seq.get_kmers_palindrome(4, Some(10), 0, 0, SEQ.len() - 1).unwrap();
    assert!(!results.is_empty());
    assert!(results.records().windows(2).all(|w| w[0].k() <= w[1].k()));
}

#[test]
fn exact_search_on_both_strands() {
    let seq = EncodedSequence::from_seq(SEQ, Orientation::Forward).unwrap();
    let last = SEQ.len() - 1;
    let mut searcher = ExactSearcher::new(&seq);

    let found = searcher.check_kmer_char(b"AAGC", 0, last, Orientation::Forward).unwrap();
    assert_eq!(found.positions(), &[24]);

    // GCTT reverse complemented is AAGC
    let found = searcher.check_kmer_char(b"GCTT", 0, last, Orientation::ReverseComplement).unwrap();
    assert_eq!(found.sequence(), "AAGC");
    assert_eq!(found.positions(), &[24]);

    let found = searcher.check_kmer_char(b"TA", 0, last, Orientation::Forward).unwrap();
    let naive: Vec<_> = SEQ.windows(2).enumerate().filter(|(_, w)| w == b"TA").map(|(p, _)| p).collect();
    assert_eq!(found.positions(), naive.as_slice());

    assert_eq!(
        searcher.check_kmer_char(b"CCCC", 0, last, Orientation::Forward),
        Err(NessieError::KmerNotFound)
    );
}

#[test]
fn longest_palindromes_cover_exact_hits() {
    let seq = EncodedSequence::from_seq(SEQ, Orientation::Forward).unwrap();
    let last = SEQ.len() - 1;
    let scanner = MaxMotifScanner::new(
        &seq,
        MotifCheck::Symmetry(SymmetryKind::Palindrome),
        Tolerance::default(),
        Some(4),
        8,
    )
    .unwrap();
    let hits = scanner.scan(0, last).unwrap();
    assert!(!hits.is_empty());

    for pair in hits.windows(2) {
        assert!(pair[0].start < pair[1].start);
        assert!(pair[0].end() < pair[1].end());
    }

    // Each reported window is itself a palindrome of the reported length
    let all = seq.get_kmers_palindrome(4, Some(8), 0, 0, last).unwrap();
    for hit in &hits {
        assert!(
            all.iter().any(|r| r.k() == hit.k && r.positions().contains(&hit.start)),
            "hit at {} with k={}",
            hit.start,
            hit.k
        );
    }
}
