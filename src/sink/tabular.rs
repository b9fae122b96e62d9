//! CSV file writer

use crate::error::Result;
use serde::Serialize;
use std::fs::File;
use std::path::Path;

/// CSV writer that truncates its target and writes the header row up front
pub struct CsvWriter {
    writer: csv::Writer<File>,
    rows_written: usize,
}

impl CsvWriter {
    /// Create (or truncate) `path` and write `headers`
    pub fn new(path: impl AsRef<Path>, headers: &[&str]) -> Result<Self> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(path.as_ref())?;
        writer.write_record(headers)?;

        Ok(Self {
            writer,
            rows_written: 0,
        })
    }

    /// Write one row; fields are serialized in declaration order
    pub fn write<T: Serialize>(&mut self, row: &T) -> Result<()> {
        self.writer.serialize(row)?;
        self.rows_written += 1;
        Ok(())
    }

    /// Get the number of rows written so far
    #[must_use]
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Flush and close the file
    pub fn close(mut self) -> Result<usize> {
        self.writer.flush()?;
        Ok(self.rows_written)
    }
}

/// Write `rows` to `path`, replacing any previous contents
pub fn write_csv<T: Serialize>(
    path: impl AsRef<Path>,
    headers: &[&str],
    rows: &[T],
) -> Result<usize> {
    let mut writer = CsvWriter::new(path, headers)?;
    for row in rows {
        writer.write(row)?;
    }
    writer.close()
}
