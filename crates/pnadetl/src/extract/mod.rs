//! Extraction client interface and the CSV snapshot implementation.

mod snapshot;

use crate::error::Result;
use crate::table::DataTable;

pub use snapshot::{SnapshotExtractor, SnapshotMetadata};

/// Executes a read-only query against the warehouse and returns the
/// tabular result.
///
/// The core treats extraction as an opaque synchronous call. Failures are
/// either [`crate::EtlError::Credential`] (authentication, fatal with a
/// setup hint, never retried) or [`crate::EtlError::Extraction`] (anything
/// else, propagated to the caller).
pub trait Extractor {
    fn extract(&self, project_id: &str, query: &str) -> Result<DataTable>;
}
