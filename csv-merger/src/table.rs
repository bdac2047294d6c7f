//! In-memory CSV tables and the fixed-dialect loader.

use std::io;
use std::path::Path;

use crate::error::{MergerError, MergerResult};

/// Header label of the timestamp column prepended to every target row.
pub const TIMESTAMP_COLUMN_NAME: &str = "append_timestamp";

/// A fully materialized CSV table.
///
/// Row 0 is the header row, the rest are data rows. Cells are kept as raw
/// text, no trimming or coercion.
#[derive(Debug, Clone)]
pub struct Table {
    rows: Vec<Vec<String>>,
}

/// Outcome of loading the target file.
///
/// A missing target file is not an error: the caller bootstraps a fresh
/// target and continues with an empty key set.
#[derive(Debug)]
pub enum TargetLoad {
    /// The target file exists and was parsed.
    Found(Table),
    /// The target file does not exist.
    NotFound,
}

impl Table {
    /// Loads a table from `path` using the fixed dialect: comma-separated,
    /// double-quote quoting, quoted fields may span lines.
    ///
    /// Rows may have differing widths; short rows only fail later when a key
    /// column is actually missing. A file with no rows at all has no header
    /// and is rejected.
    pub fn load(path: &Path) -> MergerResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)?;

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_owned).collect());
        }

        if rows.is_empty() {
            return Err(MergerError::MissingHeader {
                path: path.display().to_string(),
            });
        }

        Ok(Self { rows })
    }

    /// Loads the target table, mapping a missing file to [`TargetLoad::NotFound`].
    ///
    /// Only a missing file is treated this way; permission errors, parse
    /// errors and the like propagate as fatal.
    pub fn load_target(path: &Path) -> MergerResult<TargetLoad> {
        match Self::load(path) {
            Ok(table) => Ok(TargetLoad::Found(table)),
            Err(MergerError::Csv(e)) if is_not_found(&e) => Ok(TargetLoad::NotFound),
            Err(e) => Err(e),
        }
    }

    /// Returns the header row.
    pub fn header(&self) -> &[String] {
        &self.rows[0]
    }

    /// Returns the data rows (everything after the header), in file order.
    pub fn data_rows(&self) -> &[Vec<String>] {
        &self.rows[1..]
    }
}

fn is_not_found(error: &csv::Error) -> bool {
    matches!(error.kind(), csv::ErrorKind::Io(e) if e.kind() == io::ErrorKind::NotFound)
}
