//! Core merger that classifies source rows and appends new ones to the target.

use std::path::PathBuf;

use chrono::Local;
use tracing::{debug, info};

use crate::config::MergerConfig;
use crate::error::{MergerError, MergerResult};
use crate::index::{KeySet, RowKey};
use crate::table::{Table, TargetLoad};
use crate::target_writer::TargetWriter;

/// Format of the timestamp stamped on appended rows.
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Summary of a completed merge run.
#[derive(Debug, Clone)]
pub struct MergeSummary {
    /// Rows appended to the target.
    pub appended: u64,
    /// Source rows skipped because their key already existed in the target.
    pub skipped: u64,
    /// Data rows the target held before the run.
    pub target_rows_before: u64,
    /// Timestamp stamped on every appended row.
    pub timestamp: String,
}

/// The merge-append engine.
///
/// Loads both tables fully into memory, validates the key columns and
/// headers, bootstraps a missing target, and appends every source row whose
/// key is not already present in the target.
pub struct Merger {
    source_path: PathBuf,
    target_path: PathBuf,
    key_columns: Vec<usize>,
    config: MergerConfig,
}

impl Merger {
    /// Creates a new merger instance.
    ///
    /// # Arguments
    ///
    /// * `source_path` - CSV file to read rows from.
    /// * `target_path` - CSV file to append rows to, created if missing.
    /// * `key_columns` - 1-based column indices into the source schema whose
    ///   cells form the uniqueness key. Duplicates and unsorted indices are
    ///   allowed; an empty list is rejected.
    /// * `config` - Merger configuration.
    pub fn new(
        source_path: impl Into<PathBuf>,
        target_path: impl Into<PathBuf>,
        key_columns: Vec<usize>,
        config: MergerConfig,
    ) -> MergerResult<Self> {
        if key_columns.is_empty() {
            return Err(MergerError::NoKeyColumns);
        }

        Ok(Self {
            source_path: source_path.into(),
            target_path: target_path.into(),
            key_columns,
            config,
        })
    }

    /// Runs the merge and returns the summary.
    ///
    /// The target file is the only persisted state. Rows flushed before a
    /// mid-run failure stay in place; there is no rollback.
    pub fn merge(&self) -> MergerResult<MergeSummary> {
        let source = Table::load(&self.source_path)?;

        // Key columns are checked against the source schema before the target
        // file is read or created.
        validate_key_columns(source.header(), &self.key_columns)?;

        let writer = TargetWriter::new(&self.target_path);
        let target = match Table::load_target(&self.target_path)? {
            TargetLoad::Found(table) => Some(table),
            TargetLoad::NotFound => {
                info!(path = %self.target_path.display(), "target file missing, bootstrapping");
                writer.bootstrap(source.header())?;
                None
            }
        };

        let key_set = match &target {
            Some(table) => {
                check_headers(source.header(), table.header())?;
                KeySet::from_target_rows(
                    table.data_rows(),
                    self.key_columns.clone(),
                    self.config.key_set_initial_capacity,
                )?
            }
            None => KeySet::empty(
                self.key_columns.clone(),
                self.config.key_set_initial_capacity,
            ),
        };

        let target_rows_before = target.as_ref().map_or(0, |t| t.data_rows().len() as u64);
        info!(
            target_rows = target_rows_before,
            source_rows = source.data_rows().len(),
            keys = key_set.len(),
            "tables loaded"
        );

        let timestamp = match &self.config.timestamp {
            Some(pinned) => pinned.clone(),
            None => Local::now().format(TIMESTAMP_FORMAT).to_string(),
        };
        info!(%timestamp, "timestamp for appended rows");

        let mut appended = 0u64;
        let mut skipped = 0u64;
        let mut out = writer.open_append()?;

        for (i, row) in source.data_rows().iter().enumerate() {
            let key = RowKey::from_source_row(row, &self.key_columns, i + 1)?;

            // The key set is never updated here: rows with the same key later
            // in the source batch are appended too.
            if key_set.contains(&key) {
                debug!(row = i + 1, key = ?key.values(), "skipping row, key already in target");
                skipped += 1;
                continue;
            }

            let mut stamped = Vec::with_capacity(row.len() + 1);
            stamped.push(timestamp.clone());
            stamped.extend(row.iter().cloned());
            out.write_row(&stamped)?;

            debug!(row = i + 1, key = ?key.values(), "appending row");
            appended += 1;
        }

        // Everything must be on disk before the summary is reported.
        out.finish()?;

        Ok(MergeSummary {
            appended,
            skipped,
            target_rows_before,
            timestamp,
        })
    }
}

/// Fails when any key column is zero or exceeds the source header width.
/// Key columns are 1-based.
fn validate_key_columns(source_header: &[String], key_columns: &[usize]) -> MergerResult<()> {
    let out_of_range: Vec<usize> = key_columns
        .iter()
        .copied()
        .filter(|&column| column == 0 || column > source_header.len())
        .collect();

    if !out_of_range.is_empty() {
        return Err(MergerError::KeyColumnOutOfRange {
            key_columns: out_of_range,
            header_len: source_header.len(),
        });
    }
    Ok(())
}

/// The target header must be exactly one leading cell (the timestamp label)
/// followed by the source header. Anything else is schema drift and aborts
/// the run before any write.
fn check_headers(source_header: &[String], target_header: &[String]) -> MergerResult<()> {
    if target_header.is_empty() || target_header[1..] != *source_header {
        return Err(MergerError::HeaderMismatch {
            source_header: source_header.to_vec(),
            target: target_header.to_vec(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_validate_key_columns_reports_only_offenders() {
        let source_header = header(&["a", "b", "c"]);

        assert!(validate_key_columns(&source_header, &[1, 3]).is_ok());

        let err = validate_key_columns(&source_header, &[2, 5, 9]).unwrap_err();
        match err {
            MergerError::KeyColumnOutOfRange {
                key_columns,
                header_len,
            } => {
                assert_eq!(key_columns, vec![5, 9]);
                assert_eq!(header_len, 3);
            }
            other => panic!("unexpected error: {other:?}"),
        }

        // Indices are 1-based, zero is never valid.
        let err = validate_key_columns(&source_header, &[0]);
        assert!(matches!(err, Err(MergerError::KeyColumnOutOfRange { .. })));
    }

    #[test]
    fn test_check_headers_requires_exact_extension() {
        let source = header(&["id", "name"]);

        assert!(check_headers(&source, &header(&["append_timestamp", "id", "name"])).is_ok());

        // Renamed column.
        let err = check_headers(&source, &header(&["append_timestamp", "id", "label"]));
        assert!(matches!(err, Err(MergerError::HeaderMismatch { .. })));

        // Extra trailing column.
        let err = check_headers(&source, &header(&["append_timestamp", "id", "name", "extra"]));
        assert!(matches!(err, Err(MergerError::HeaderMismatch { .. })));

        // Target header with no room for the timestamp column.
        let err = check_headers(&source, &header(&["id", "name"]));
        assert!(matches!(err, Err(MergerError::HeaderMismatch { .. })));
    }

    #[test]
    fn test_empty_key_columns_rejected_at_construction() {
        let err = Merger::new("src.csv", "trg.csv", vec![], MergerConfig::default());
        assert!(matches!(err, Err(MergerError::NoKeyColumns)));
    }
}
