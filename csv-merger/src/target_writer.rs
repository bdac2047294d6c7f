//! Bootstrap and append-mode writing of the target file.

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::MergerResult;
use crate::table::TIMESTAMP_COLUMN_NAME;

/// Writes the target file: bootstrap of a fresh header-only file, and
/// append-mode row writes, both in the fixed dialect.
pub struct TargetWriter {
    path: PathBuf,
}

impl TargetWriter {
    /// Creates a writer for the given target path.
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Creates a new target file containing only the derived header row: the
    /// timestamp label followed by the source header.
    pub fn bootstrap(&self, source_header: &[String]) -> MergerResult<()> {
        debug!(path = %self.path.display(), "writing derived header to new target file");

        let mut header = Vec::with_capacity(source_header.len() + 1);
        header.push(TIMESTAMP_COLUMN_NAME.to_string());
        header.extend(source_header.iter().cloned());

        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_path(&self.path)?;
        writer.write_record(&header)?;
        writer.flush()?;
        Ok(())
    }

    /// Opens the target for appending rows.
    pub fn open_append(&self) -> MergerResult<AppendHandle> {
        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .open(&self.path)?;

        // A target whose last record lacks a terminator would glue the first
        // appended row onto it.
        if missing_final_terminator(&mut file)? {
            file.write_all(b"\n")?;
        }

        let writer = csv::WriterBuilder::new().flexible(true).from_writer(file);
        Ok(AppendHandle { writer })
    }
}

/// An open append-mode handle on the target file.
pub struct AppendHandle {
    writer: csv::Writer<File>,
}

impl AppendHandle {
    /// Appends one row to the target.
    pub fn write_row(&mut self, row: &[String]) -> MergerResult<()> {
        self.writer.write_record(row)?;
        Ok(())
    }

    /// Flushes buffered rows to disk.
    ///
    /// Must complete before the run summary is reported.
    pub fn finish(mut self) -> MergerResult<()> {
        self.writer.flush()?;
        Ok(())
    }
}

fn missing_final_terminator(file: &mut File) -> io::Result<bool> {
    let len = file.metadata()?.len();
    if len == 0 {
        return Ok(false);
    }
    let mut last = [0u8; 1];
    file.seek(SeekFrom::End(-1))?;
    file.read_exact(&mut last)?;
    Ok(last[0] != b'\n' && last[0] != b'\r')
}
