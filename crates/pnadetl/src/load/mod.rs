//! Load sink interface and the CSV file implementation.

mod csv_sink;

use crate::error::Result;
use crate::table::DataTable;

pub use csv_sink::CsvSink;

/// Persists a cleaned table under a destination name with full-replace
/// semantics: the previous contents of the destination are dropped, never
/// appended to or merged with.
///
/// Connectivity and constraint failures surface as
/// [`crate::EtlError::Load`] and are propagated, not retried.
pub trait Loader {
    fn load(&self, table: &DataTable, destination: &str) -> Result<()>;
}
