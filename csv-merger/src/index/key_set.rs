//! Uniqueness index built from the target's existing rows.

use std::collections::HashSet;

use crate::error::MergerResult;
use crate::index::RowKey;

/// The set of key tuples present in the target table.
///
/// Built once per run from the target's data rows and immutable during the
/// append pass: keys of rows appended in the same run are not inserted, so
/// duplicates within one source batch are appended independently.
#[derive(Debug)]
pub struct KeySet {
    keys: HashSet<RowKey>,
    key_columns: Vec<usize>,
}

impl KeySet {
    /// Builds the key set from the target's data rows.
    ///
    /// A target row missing a required key cell is a fatal error, not
    /// silently skipped.
    pub fn from_target_rows(
        rows: &[Vec<String>],
        key_columns: Vec<usize>,
        initial_capacity: usize,
    ) -> MergerResult<Self> {
        let mut keys = HashSet::with_capacity(initial_capacity.max(rows.len()));
        for (i, row) in rows.iter().enumerate() {
            keys.insert(RowKey::from_target_row(row, &key_columns, i + 1)?);
        }
        Ok(Self { keys, key_columns })
    }

    /// Creates an empty key set, used after bootstrapping a fresh target.
    pub fn empty(key_columns: Vec<usize>, initial_capacity: usize) -> Self {
        Self {
            keys: HashSet::with_capacity(initial_capacity),
            key_columns,
        }
    }

    /// Returns whether the given key exists in the target.
    pub fn contains(&self, key: &RowKey) -> bool {
        self.keys.contains(key)
    }

    /// Returns the key column indices this set was built with.
    pub fn key_columns(&self) -> &[usize] {
        &self.key_columns
    }

    /// Returns the number of distinct keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns whether the set holds no keys.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MergerError;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_membership_uses_target_offset() {
        let target_rows = vec![
            row(&["01/01/2021 00:00:00", "1", "Alice"]),
            row(&["01/01/2021 00:00:00", "2", "Bob"]),
        ];
        let set = KeySet::from_target_rows(&target_rows, vec![1], 0).unwrap();

        assert_eq!(set.len(), 2);
        let key = RowKey::from_source_row(&row(&["2", "Robert"]), &[1], 1).unwrap();
        assert!(set.contains(&key));
        let key = RowKey::from_source_row(&row(&["3", "Carol"]), &[1], 1).unwrap();
        assert!(!set.contains(&key));
    }

    #[test]
    fn test_identical_keys_collapse() {
        let target_rows = vec![
            row(&["ts", "1", "Alice"]),
            row(&["ts", "1", "Alice again"]),
        ];
        let set = KeySet::from_target_rows(&target_rows, vec![1], 0).unwrap();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_short_target_row_fails_the_build() {
        let target_rows = vec![row(&["ts", "1", "Alice"]), row(&["ts"])];

        let err = KeySet::from_target_rows(&target_rows, vec![2], 0).unwrap_err();
        assert!(matches!(err, MergerError::ShortRow { row_number: 2, .. }));
    }

    #[test]
    fn test_empty_set_matches_nothing() {
        let set = KeySet::empty(vec![1], 16);
        assert!(set.is_empty());
        assert_eq!(set.key_columns(), &[1]);

        let key = RowKey::from_source_row(&row(&["anything"]), &[1], 1).unwrap();
        assert!(!set.contains(&key));
    }
}
