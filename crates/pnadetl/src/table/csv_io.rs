//! CSV reading/writing for snapshot files and load sinks.

use std::path::Path;

use crate::error::{EtlError, Result};

use super::DataTable;

/// Read a CSV file (comma-delimited, header row) into a [`DataTable`].
///
/// Rows shorter than the header are padded with empty cells; longer rows
/// are truncated to the header width.
pub fn read_csv_path(path: impl AsRef<Path>) -> Result<DataTable> {
    let path = path.as_ref();
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(EtlError::Csv)?;

    let headers: Vec<String> = reader.headers()?.iter().map(|s| s.to_string()).collect();
    if headers.is_empty() {
        return Err(EtlError::EmptyData(format!(
            "no columns found in '{}'",
            path.display()
        )));
    }

    let expected_cols = headers.len();
    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let mut row: Vec<String> = record.iter().map(|s| s.to_string()).collect();
        while row.len() < expected_cols {
            row.push(String::new());
        }
        row.truncate(expected_cols);
        rows.push(row);
    }

    Ok(DataTable::new(headers, rows))
}

/// Write a [`DataTable`] to a CSV file, replacing any existing file.
pub fn write_csv_path(table: &DataTable, path: impl AsRef<Path>) -> Result<()> {
    let mut writer = csv::Writer::from_path(path.as_ref()).map_err(EtlError::Csv)?;
    writer.write_record(&table.headers)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }
    writer.flush().map_err(|e| EtlError::Io {
        path: path.as_ref().to_path_buf(),
        source: e,
    })?;
    Ok(())
}
