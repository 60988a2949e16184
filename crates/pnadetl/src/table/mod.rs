//! In-memory tabular result.

mod csv_io;

pub use csv_io::{read_csv_path, write_csv_path};

/// Tabular result of an extraction: named columns over row-major string
/// cells. The column set is discovered from the source, never predeclared.
#[derive(Debug, Clone, PartialEq)]
pub struct DataTable {
    /// Column headers, in projection order.
    pub headers: Vec<String>,
    /// Row data as strings (row-major order).
    pub rows: Vec<Vec<String>>,
}

impl DataTable {
    /// Create a new data table.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Get the number of rows (excluding header).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Find the index of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Whether a column with this name exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Get a specific cell value.
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row).and_then(|r| r.get(col).map(|s| s.as_str()))
    }

    /// Set a specific cell value. Out-of-range indices are ignored.
    pub fn set(&mut self, row: usize, col: usize, value: String) {
        if let Some(cell) = self.rows.get_mut(row).and_then(|r| r.get_mut(col)) {
            *cell = value;
        }
    }

    /// Append a new column filled with a default value, returning its index.
    pub fn add_column(&mut self, name: String, default: String) -> usize {
        self.headers.push(name);
        for row in &mut self.rows {
            row.push(default.clone());
        }
        self.headers.len() - 1
    }

    /// Rename a column in place. Returns false if the column does not exist.
    pub fn rename_column(&mut self, from: &str, to: &str) -> bool {
        match self.column_index(from) {
            Some(idx) => {
                self.headers[idx] = to.to_string();
                true
            }
            None => false,
        }
    }

    /// Keep only the rows for which the predicate holds.
    pub fn retain_rows<F>(&mut self, mut predicate: F)
    where
        F: FnMut(&[String]) -> bool,
    {
        self.rows.retain(|row| predicate(row));
    }

    /// Parse a cell as a float. Missing/null cells and unparsable text
    /// yield `None`.
    pub fn get_f64(&self, row: usize, col: usize) -> Option<f64> {
        let value = self.get(row, col)?;
        if Self::is_null_value(value) {
            return None;
        }
        value.trim().parse::<f64>().ok()
    }

    /// Check if a value represents a missing/null value.
    pub fn is_null_value(value: &str) -> bool {
        let trimmed = value.trim();
        trimmed.is_empty()
            || trimmed.eq_ignore_ascii_case("na")
            || trimmed.eq_ignore_ascii_case("n/a")
            || trimmed.eq_ignore_ascii_case("nan")
            || trimmed.eq_ignore_ascii_case("null")
            || trimmed.eq_ignore_ascii_case("none")
            || trimmed == "."
    }
}
