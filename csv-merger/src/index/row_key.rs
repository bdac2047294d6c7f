//! Key tuples extracted from source and target rows.

use crate::error::{MergerError, MergerResult};

/// The uniqueness key of a row: the cells at the configured key columns, in
/// key-column order.
///
/// Key columns are 1-based indices into the source schema. The target file
/// carries an extra leading timestamp column, so the same nominal index maps
/// to a different position on each side: source cell `i - 1`, target cell `i`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RowKey {
    values: Vec<String>,
}

impl RowKey {
    /// Extracts the key from a source data row (1-based index `i` reads cell
    /// `i - 1`).
    pub fn from_source_row(
        row: &[String],
        key_columns: &[usize],
        row_number: usize,
    ) -> MergerResult<Self> {
        Self::extract(row, key_columns, row_number, 1)
    }

    /// Extracts the key from a target data row (1-based index `i` reads cell
    /// `i`, the leading timestamp cell absorbs the offset).
    pub fn from_target_row(
        row: &[String],
        key_columns: &[usize],
        row_number: usize,
    ) -> MergerResult<Self> {
        Self::extract(row, key_columns, row_number, 0)
    }

    fn extract(
        row: &[String],
        key_columns: &[usize],
        row_number: usize,
        offset: usize,
    ) -> MergerResult<Self> {
        let mut values = Vec::with_capacity(key_columns.len());
        for &column in key_columns {
            let position = column - offset;
            let cell = row.get(position).ok_or(MergerError::ShortRow {
                row_number,
                row_len: row.len(),
                required: position + 1,
            })?;
            values.push(cell.clone());
        }
        Ok(Self { values })
    }

    /// Returns the key cell values.
    pub fn values(&self) -> &[String] {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_source_extraction_is_one_based() {
        let source_row = row(&["a", "b", "c"]);

        let key = RowKey::from_source_row(&source_row, &[2], 1).unwrap();
        assert_eq!(key.values(), &["b".to_string()]);
    }

    #[test]
    fn test_target_extraction_skips_timestamp_column() {
        // Same nominal key column as above, against the stamped target row.
        let target_row = row(&["2021-01-01", "a", "b", "c"]);

        let key = RowKey::from_target_row(&target_row, &[2], 1).unwrap();
        assert_eq!(key.values(), &["b".to_string()]);
    }

    #[test]
    fn test_source_and_target_keys_match_for_same_row() {
        let source_row = row(&["a", "b", "c"]);
        let mut target_row = source_row.clone();
        target_row.insert(0, "01/02/2021 03:04:05".to_string());

        let source_key = RowKey::from_source_row(&source_row, &[1, 3], 1).unwrap();
        let target_key = RowKey::from_target_row(&target_row, &[1, 3], 1).unwrap();
        assert_eq!(source_key, target_key);
    }

    #[test]
    fn test_duplicate_key_columns_select_twice() {
        let source_row = row(&["a", "b"]);

        let key = RowKey::from_source_row(&source_row, &[2, 2, 1], 1).unwrap();
        assert_eq!(
            key.values(),
            &["b".to_string(), "b".to_string(), "a".to_string()]
        );
    }

    #[test]
    fn test_short_row_is_an_error() {
        let target_row = row(&["2021-01-01", "a"]);

        let err = RowKey::from_target_row(&target_row, &[3], 7).unwrap_err();
        match err {
            MergerError::ShortRow {
                row_number,
                row_len,
                required,
            } => {
                assert_eq!(row_number, 7);
                assert_eq!(row_len, 2);
                assert_eq!(required, 4);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
