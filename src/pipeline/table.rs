//! Table reader for comma-delimited bibliographic exports
//!
//! Every data row must have exactly as many cells as the header. Rows are
//! produced lazily by [`TableReader::rows`]; [`read_table`] drains them all,
//! which is the validation pass run before any output is written.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, StringRecordsIntoIter, WriterBuilder};

use super::error::ConvertError;

const BYTE_ORDER_MARK: char = '\u{feff}';

/// One data row: column name to raw cell value, in header order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    number: usize,
    line: u64,
    cells: Vec<(String, String)>,
}

impl Row {
    /// Build a row from parallel header and value slices.
    pub fn new(number: usize, header: &[String], values: &[&str]) -> Self {
        let cells = header
            .iter()
            .zip(values.iter())
            .map(|(c, v)| (c.clone(), v.to_string()))
            .collect();
        Self {
            number,
            line: number as u64 + 1,
            cells,
        }
    }

    /// 1-based data row number (the header is not counted)
    pub fn number(&self) -> usize {
        self.number
    }

    /// Line in the source file where the row starts
    pub fn line(&self) -> u64 {
        self.line
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, v)| v.as_str())
    }

    pub fn cells(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells.iter().map(|(c, v)| (c.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The row as a CSV line, quoted where needed, for diagnostics
    pub fn raw(&self) -> String {
        csv_line(self.cells.iter().map(|(_, v)| v.as_str()))
    }
}

/// Serialize one record back into a single CSV line (no terminator).
fn csv_line<I, T>(values: I) -> String
where
    I: IntoIterator<Item = T>,
    T: AsRef<[u8]>,
{
    let mut writer = WriterBuilder::new().flexible(true).from_writer(Vec::new());
    let bytes = match writer.write_record(values) {
        Ok(()) => writer.into_inner().unwrap_or_default(),
        Err(_) => Vec::new(),
    };
    String::from_utf8_lossy(&bytes)
        .trim_end_matches(['\r', '\n'])
        .to_string()
}

/// A fully validated table held in memory
#[derive(Debug, Clone)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Row>,
}

impl Table {
    /// Up to `n` leading rows, for mapping previews
    pub fn sample(&self, n: usize) -> &[Row] {
        &self.rows[..n.min(self.rows.len())]
    }
}

/// Streaming reader over a CSV source with a mandatory header
pub struct TableReader<R: Read> {
    reader: csv::Reader<R>,
    header: Vec<String>,
}

impl TableReader<File> {
    pub fn from_path(path: &Path) -> Result<Self, ConvertError> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }
}

impl<R: Read> TableReader<R> {
    pub fn from_reader(source: R) -> Result<Self, ConvertError> {
        // Row lengths are checked here, not by the csv crate, so the
        // offending row can be reported in full.
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(source);

        let header = parse_header(reader.headers()?)?;
        Ok(Self { reader, header })
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn rows(self) -> Rows<R> {
        Rows {
            records: self.reader.into_records(),
            header: self.header,
            count: 0,
        }
    }
}

fn parse_header(record: &StringRecord) -> Result<Vec<String>, ConvertError> {
    let header: Vec<String> = record
        .iter()
        .enumerate()
        .map(|(i, name)| {
            if i == 0 {
                name.trim_start_matches(BYTE_ORDER_MARK).to_string()
            } else {
                name.to_string()
            }
        })
        .collect();

    if header.is_empty() || (header.len() == 1 && header[0].trim().is_empty()) {
        return Err(ConvertError::Format(
            "input has no header line (zero columns)".to_string(),
        ));
    }

    // Blank names (trailing empty columns in spreadsheet exports) may repeat
    for (i, name) in header.iter().enumerate() {
        if !name.trim().is_empty() && header[..i].contains(name) {
            return Err(ConvertError::Format(format!(
                "duplicate column name '{}' in header",
                name
            )));
        }
    }

    Ok(header)
}

/// Lazy iterator over the data rows of a [`TableReader`]
pub struct Rows<R: Read> {
    records: StringRecordsIntoIter<R>,
    header: Vec<String>,
    count: usize,
}

impl<R: Read> Rows<R> {
    pub fn header(&self) -> &[String] {
        &self.header
    }
}

impl<R: Read> Iterator for Rows<R> {
    type Item = Result<Row, ConvertError>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = match self.records.next()? {
            Ok(record) => record,
            Err(e) => return Some(Err(e.into())),
        };
        self.count += 1;
        let line = record
            .position()
            .map(|p| p.line())
            .unwrap_or(self.count as u64 + 1);

        if record.len() != self.header.len() {
            return Some(Err(ConvertError::RowLengthMismatch {
                row: self.count,
                line,
                expected: self.header.len(),
                found: record.len(),
                raw: csv_line(record.iter()),
            }));
        }

        let values: Vec<&str> = record.iter().collect();
        let mut row = Row::new(self.count, &self.header, &values);
        row.line = line;
        Some(Ok(row))
    }
}

/// Read and validate an entire table from a file.
///
/// Fails on the first structurally malformed row; no partial table is returned.
pub fn read_table(path: &Path) -> Result<Table, ConvertError> {
    read_table_from(TableReader::from_path(path)?)
}

/// Read and validate an entire table from an already opened reader.
pub fn read_table_from<R: Read>(reader: TableReader<R>) -> Result<Table, ConvertError> {
    let header = reader.header().to_vec();
    let rows = reader.rows().collect::<Result<Vec<_>, _>>()?;
    Ok(Table { header, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_str(input: &str) -> Result<Table, ConvertError> {
        read_table_from(TableReader::from_reader(input.as_bytes())?)
    }

    #[test]
    fn test_reads_header_and_rows() {
        let table = read_str("a,b,c\n1,2,3\n4,5,6\n").unwrap();
        assert_eq!(table.header, vec!["a", "b", "c"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1].get("b"), Some("5"));
        assert_eq!(table.rows[1].number(), 2);
    }

    #[test]
    fn test_quoted_cells_keep_commas() {
        let table = read_str("Authors,Year\n\"Smith, John\",2021\n").unwrap();
        assert_eq!(table.rows[0].get("Authors"), Some("Smith, John"));
    }

    #[test]
    fn test_empty_input_is_format_error() {
        let err = read_str("").unwrap_err();
        assert!(matches!(err, ConvertError::Format(_)));
    }

    #[test]
    fn test_short_row_reports_row_number() {
        let err = read_str("a,b,c\n1,2,3\n4,5\n").unwrap_err();
        match err {
            ConvertError::RowLengthMismatch {
                row,
                expected,
                found,
                raw,
                ..
            } => {
                assert_eq!(row, 2);
                assert_eq!(expected, 3);
                assert_eq!(found, 2);
                assert_eq!(raw, "4,5");
            }
            other => panic!("Expected RowLengthMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_byte_order_mark_is_stripped() {
        let table = read_str("\u{feff}Authors,Year\nDoe,2020\n").unwrap();
        assert_eq!(table.header[0], "Authors");
        assert_eq!(table.rows[0].get("Authors"), Some("Doe"));
    }

    #[test]
    fn test_duplicate_header_is_format_error() {
        let err = read_str("a,a\n1,2\n").unwrap_err();
        assert!(matches!(err, ConvertError::Format(_)));
    }

    #[test]
    fn test_short_row_keeps_quoting_in_report() {
        let err = read_str("Authors,Year,Title\n\"Smith, John\",2021\n").unwrap_err();
        match err {
            ConvertError::RowLengthMismatch { found, raw, .. } => {
                assert_eq!(found, 2);
                assert_eq!(raw, "\"Smith, John\",2021");
            }
            other => panic!("Expected RowLengthMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_row_raw_quotes_embedded_commas() {
        let table = read_str("Authors,Year\n\"Smith, John\",2021\n").unwrap();
        assert_eq!(table.rows[0].raw(), "\"Smith, John\",2021");
    }

    #[test]
    fn test_repeated_blank_header_columns_are_accepted() {
        let table = read_str("Authors,Year,,\nDoe,2020,,\n").unwrap();
        assert_eq!(table.header, vec!["Authors", "Year", "", ""]);
        assert_eq!(table.rows[0].get("Year"), Some("2020"));
    }

    #[test]
    fn test_sample_is_capped_by_row_count() {
        let table = read_str("a\n1\n2\n").unwrap();
        assert_eq!(table.sample(3).len(), 2);
        assert_eq!(table.sample(1).len(), 1);
    }

    #[test]
    fn test_rows_are_lazy() {
        let reader = TableReader::from_reader("a,b\n1,2\n3\n".as_bytes()).unwrap();
        let mut rows = reader.rows();
        assert!(rows.next().unwrap().is_ok());
        assert!(rows.next().unwrap().is_err());
        assert!(rows.next().is_none());
    }
}
