//! Loader that writes each destination table as a CSV file.
//!
//! Stands in for the relational store in the CLI and tests. Each
//! destination name maps to `<dir>/<destination>.csv`; an existing file is
//! replaced wholesale, matching the drop-and-recreate contract of the real
//! sink.

use std::path::{Path, PathBuf};

use crate::error::{EtlError, Result};
use crate::table::{DataTable, write_csv_path};

use super::Loader;

/// Writes destination tables into a directory, one CSV per table.
pub struct CsvSink {
    directory: PathBuf,
}

impl CsvSink {
    /// Create a sink rooted at the given directory.
    pub fn new(directory: impl AsRef<Path>) -> Self {
        Self {
            directory: directory.as_ref().to_path_buf(),
        }
    }

    /// Path a destination table is written to.
    pub fn destination_path(&self, destination: &str) -> PathBuf {
        self.directory.join(format!("{}.csv", destination))
    }
}

impl Loader for CsvSink {
    fn load(&self, table: &DataTable, destination: &str) -> Result<()> {
        if destination.is_empty() {
            return Err(EtlError::Load(
                "destination table name must not be empty".to_string(),
            ));
        }

        let path = self.destination_path(destination);
        write_csv_path(table, &path)
            .map_err(|e| EtlError::Load(format!("writing '{}': {}", path.display(), e)))
    }
}
