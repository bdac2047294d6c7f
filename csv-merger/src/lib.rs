//! CSV Merger - key-based merge-append of one CSV file into another.
//!
//! Appends data rows from a source CSV file into a target CSV file, skipping
//! rows whose key (a caller-chosen subset of source columns) already exists
//! in the target. Every appended row is stamped with a single per-run
//! timestamp in a new leading column, so the target always carries one more
//! column than the source: its header is the `append_timestamp` label
//! followed by the source header.
//!
//! # Architecture
//!
//! Both files are fully materialized in memory. A [`KeySet`] built from the
//! target's existing data rows gives O(1) duplicate detection while source
//! rows stream through the append pass in file order. The target file is the
//! only persisted state: the key set is re-derived from it on every run, a
//! deliberate trade of scalability for simplicity. A missing target file is
//! bootstrapped with a derived header and treated as empty.
//!
//! # Usage
//!
//! ```rust,no_run
//! use csv_merger::{Merger, MergerConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let merger = Merger::new(
//!         "export.csv",
//!         "ledger.csv",
//!         vec![1, 2], // key columns, 1-based into the source schema
//!         MergerConfig::default(),
//!     )?;
//!
//!     let summary = merger.merge()?;
//!     println!("appended {}, skipped {}", summary.appended, summary.skipped);
//!
//!     Ok(())
//! }
//! ```

mod config;
mod error;
pub mod index;
mod merger;
mod table;
mod target_writer;

pub use config::MergerConfig;
pub use error::{MergerError, MergerResult};
pub use index::{KeySet, RowKey};
pub use merger::{MergeSummary, Merger, TIMESTAMP_FORMAT};
pub use table::{TIMESTAMP_COLUMN_NAME, Table, TargetLoad};
pub use target_writer::{AppendHandle, TargetWriter};
