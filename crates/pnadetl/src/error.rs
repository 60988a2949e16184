//! Error types for the pnadetl library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for ETL operations.
#[derive(Debug, Error)]
pub enum EtlError {
    /// A builder or pipeline entry point was called with an invalid argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A column the transform pipeline cannot run without is absent.
    #[error("Required column '{0}' not found in the extracted table")]
    MissingColumn(String),

    /// The extractor could not authenticate against the warehouse.
    #[error("Credential error: {0}")]
    Credential(String),

    /// The warehouse query failed for a non-credential reason.
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// The destination write failed.
    #[error("Load error: {0}")]
    Load(String),

    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Empty snapshot or no data to transform.
    #[error("Empty data: {0}")]
    EmptyData(String),
}

/// Result type alias for ETL operations.
pub type Result<T> = std::result::Result<T, EtlError>;
