//! Error types for the csv-merger crate.

use thiserror::Error;

/// Errors that can occur during merge operations.
#[derive(Error, Debug)]
pub enum MergerError {
    /// Error from the CSV parser or writer.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A file had no header row.
    #[error("File has no header row: {path}")]
    MissingHeader { path: String },

    /// A key column index exceeds the source header width.
    #[error("Key column(s) {key_columns:?} out of range: source header has {header_len} column(s)")]
    KeyColumnOutOfRange {
        key_columns: Vec<usize>,
        header_len: usize,
    },

    /// No key columns were supplied.
    #[error("At least one key column is required")]
    NoKeyColumns,

    /// Target header does not extend the source header.
    #[error("Header mismatch: source header {source_header:?} vs target header {target:?}")]
    HeaderMismatch {
        source_header: Vec<String>,
        target: Vec<String>,
    },

    /// A data row is missing a cell required by the key columns.
    #[error("Row {row_number} has {row_len} column(s) but key extraction needs column {required}")]
    ShortRow {
        row_number: usize,
        row_len: usize,
        required: usize,
    },
}

/// Result type for merger operations.
pub type MergerResult<T> = Result<T, MergerError>;
