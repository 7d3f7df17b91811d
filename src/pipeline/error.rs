//! Error types for table reading, mapping, and conversion.
//!
//! Fatal input problems (`Format`, `RowLengthMismatch`) abort a run before any
//! output is written. The remaining variants are recovered locally by the
//! caller that encounters them.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while converting a table into BibTeX records.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// The table is structurally unreadable (no header, zero columns, duplicate names).
    #[error("Malformed table: {0}")]
    Format(String),

    /// A data row has a different number of cells than the header.
    #[error("Row {row} (line {line}) has {found} field(s), expected {expected}: {raw}")]
    RowLengthMismatch {
        /// 1-based data row number
        row: usize,
        /// Line number in the source file
        line: u64,
        /// Number of header columns
        expected: usize,
        /// Number of cells actually found
        found: usize,
        /// The row as read, re-serialized as a CSV line
        raw: String,
    },

    /// A mapping target outside the BibTeX field vocabulary.
    #[error("'{0}' is not a known BibTeX field")]
    InvalidFieldName(String),

    /// A single row could not be rendered.
    #[error("Failed to process row {row}: {message}")]
    RowProcessing { row: usize, message: String },

    /// The persisted mapping could not be read or written.
    #[error("Mapping store error ({}): {message}", .path.display())]
    Store { path: PathBuf, message: String },

    /// CSV decoding failure (bad quoting, invalid UTF-8)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// File I/O errors
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConvertError {
    /// Whether this error rejects the input table as a whole.
    pub fn is_input_rejection(&self) -> bool {
        matches!(
            self,
            ConvertError::Format(_) | ConvertError::RowLengthMismatch { .. } | ConvertError::Csv(_)
        )
    }
}
