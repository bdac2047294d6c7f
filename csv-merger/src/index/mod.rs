//! In-memory uniqueness index over target row keys.

mod key_set;
mod row_key;

pub use key_set::KeySet;
pub use row_key::RowKey;
