//! Per-epoch data files.
//!
//! Actions report through flat comma-separated row files: an optional
//! header of column names, then one row per firing. Values are written as
//! given — columns here are numbers and identifiers, never free text.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use demes_core::error::Result;

/// Resolve `filename` inside the experiment's data directory, creating the
/// directory on first use.
pub fn data_path(data_dir: &Path, filename: &str) -> Result<PathBuf> {
    fs::create_dir_all(data_dir)?;
    Ok(data_dir.join(filename))
}

/// A comma-separated row sink.
pub struct CsvFile {
    writer: BufWriter<File>,
    columns: usize,
}

impl CsvFile {
    /// Create (truncating) `path`, writing the header when asked.
    pub fn create(path: &Path, fieldnames: &[String], header: bool) -> Result<Self> {
        let mut writer = BufWriter::new(File::create(path)?);
        if header {
            writeln!(writer, "{}", fieldnames.join(","))?;
        }
        Ok(Self {
            writer,
            columns: fieldnames.len(),
        })
    }

    /// Append one row. Row length must match the header width.
    pub fn write_row(&mut self, row: &[String]) -> Result<()> {
        debug_assert_eq!(row.len(), self.columns);
        writeln!(self.writer, "{}", row.join(","))?;
        self.writer.flush()?;
        Ok(())
    }
}
