//! Tests for reading and validating input tables

mod common;

use common::{create_temp_csv, SCOPUS_CSV};
use csv2bib::pipeline::{read_table, ConvertError, TableReader};

#[test]
fn test_read_scopus_export() {
    let (_dir, path) = create_temp_csv(SCOPUS_CSV);
    let table = read_table(&path).unwrap();

    assert_eq!(table.header.len(), 8);
    assert_eq!(table.header[3], "Source title");
    assert_eq!(table.rows.len(), 3);
    assert_eq!(table.rows[0].get("Authors"), Some("Smith, John"));
    assert_eq!(table.rows[1].get("Volume"), Some(""));
}

#[test]
fn test_rows_keep_input_order_and_numbers() {
    let (_dir, path) = create_temp_csv(SCOPUS_CSV);
    let table = read_table(&path).unwrap();

    let numbers: Vec<usize> = table.rows.iter().map(|r| r.number()).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
    assert_eq!(table.rows[2].get("Authors"), Some("Jane Doe"));
}

#[test]
fn test_byte_order_mark_file() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let path = temp_dir.path().join("bom.csv");
    let mut bytes = vec![0xEF, 0xBB, 0xBF];
    bytes.extend_from_slice(b"Authors,Year\nDoe,2020\n");
    std::fs::write(&path, bytes).unwrap();

    let table = read_table(&path).unwrap();
    assert_eq!(table.header, vec!["Authors", "Year"]);
    assert_eq!(table.rows[0].get("Authors"), Some("Doe"));
}

#[test]
fn test_second_row_short_is_rejected() {
    let (_dir, path) = create_temp_csv("a,b,c\n1,2,3\n4,5\n7,8,9\n");
    let err = read_table(&path).unwrap_err();

    match err {
        ConvertError::RowLengthMismatch { row, line, .. } => {
            assert_eq!(row, 2);
            assert_eq!(line, 3);
        }
        other => panic!("Expected RowLengthMismatch, got {:?}", other),
    }
}

#[test]
fn test_long_row_is_rejected() {
    let (_dir, path) = create_temp_csv("a,b\n1,2,3\n");
    let err = read_table(&path).unwrap_err();
    assert!(matches!(
        err,
        ConvertError::RowLengthMismatch {
            expected: 2,
            found: 3,
            ..
        }
    ));
}

#[test]
fn test_header_only_table_has_no_rows() {
    let (_dir, path) = create_temp_csv("Authors,Year\n");
    let table = read_table(&path).unwrap();
    assert_eq!(table.header.len(), 2);
    assert!(table.rows.is_empty());
    assert!(table.sample(3).is_empty());
}

#[test]
fn test_empty_file_is_format_error() {
    let (_dir, path) = create_temp_csv("");
    let err = read_table(&path).unwrap_err();
    assert!(matches!(err, ConvertError::Format(_)));
    assert!(err.is_input_rejection());
}

#[test]
fn test_missing_file_is_io_error() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let err = read_table(&temp_dir.path().join("nope.csv")).unwrap_err();
    assert!(matches!(err, ConvertError::Io(_)));
}

#[test]
fn test_streaming_reader_exposes_header_first() {
    let reader = TableReader::from_reader(SCOPUS_CSV.as_bytes()).unwrap();
    assert_eq!(reader.header()[0], "Authors");

    let rows = reader.rows();
    assert_eq!(rows.header().len(), 8);
    assert_eq!(rows.filter_map(Result::ok).count(), 3);
}
