use super::*;
use std::io::Cursor;

#[test]
fn multi_record() {
    let mut reader = FastaReader::new(Cursor::new(">seq1 desc\nACGT\nacgt\n>seq2\r\nAANN\r\nT"));

    let record1 = reader.next().unwrap().unwrap();
    assert_eq!(record1.name, "seq1 desc");
    assert_eq!(record1.sequence, b"ACGTacgt");
    assert!(record1.unknown_positions().is_empty());

    let record2 = reader.next().unwrap().unwrap();
    assert_eq!(record2.name, "seq2");
    assert_eq!(record2.sequence, b"AANNT");
    assert_eq!(record2.unknown_positions(), &[2, 3]);

    assert!(reader.next().is_none());
}

#[test]
fn leading_whitespace() {
    let mut reader = FastaReader::new(Cursor::new("\n  \n>s\nAC"));
    assert_eq!(reader.next().unwrap().unwrap().sequence, b"AC");
    assert!(reader.next().is_none());
}

#[test]
fn empty_file() {
    let mut reader = FastaReader::new(Cursor::new(""));

    assert_eq!(reader.next().unwrap().unwrap_err().to_string(), "No FASTA data found!");

    // Ensure iterator terminates
    assert!(reader.count() < 100);
}

#[test]
fn whitespace_only() {
    let mut reader = FastaReader::new(Cursor::new("   \r\n \r\t\n   \t"));

    assert_eq!(reader.next().unwrap().unwrap_err().to_string(), "No FASTA data found!");
    assert!(reader.count() < 100);
}

#[test]
fn missing_header() {
    let mut reader = FastaReader::new(Cursor::new("ATGC"));

    assert_eq!(
        reader.next().unwrap().unwrap_err().to_string(),
        "The FASTA file must start with a '>' symbol!"
    );
    assert!(reader.count() < 100);
}

#[test]
fn empty_header_first_record() {
    let mut reader = FastaReader::new(Cursor::new(">\nATGC"));

    assert_eq!(reader.next().unwrap().unwrap_err().to_string(), "Missing FASTA header!");
    assert!(reader.count() < 100);
}

#[test]
fn missing_sequence() {
    let mut reader = FastaReader::new(Cursor::new(">s1\n>s2\nAC"));

    assert_eq!(
        reader.next().unwrap().unwrap_err().to_string(),
        "Missing FASTA sequence! See header: s1"
    );
    assert!(reader.next().is_none());
}

#[test]
fn display() {
    let record = FastaSeq::new("id", b"ACnT".to_vec());
    assert_eq!(record.unknown_positions(), &[2]);
    assert_eq!(record.to_string(), ">id\nACnT\n");
}
