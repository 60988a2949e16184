//! pnadetl: ETL pipeline for the PNAD household survey (IBGE).
//!
//! The pipeline extracts survey microdata from an analytical warehouse,
//! cleans and enriches the tabular result, and loads it into a relational
//! store. The two non-trivial pieces live here:
//!
//! - **Query builder**: a fluent, read-only `SELECT` constructor for the
//!   single source table.
//! - **Transform pipeline**: an ordered, column-presence-gated sequence of
//!   cleaning, derivation and recoding rules.
//!
//! Extraction and load are external collaborators behind the
//! [`extract::Extractor`] and [`load::Loader`] traits; CSV-backed
//! implementations are provided for local runs and tests.
//!
//! # Example
//!
//! ```no_run
//! use pnadetl::{CsvSink, Etl, SnapshotExtractor};
//!
//! let etl = Etl::new();
//! let extractor = SnapshotExtractor::new("snapshot.csv");
//! let sink = CsvSink::new("out");
//!
//! let summary = etl.run(&extractor, &sink).unwrap();
//! println!("{} rows loaded into {}", summary.rows_loaded, summary.destination);
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod load;
pub mod query;
pub mod table;
pub mod transform;

mod etl;

pub use crate::etl::{Etl, EtlConfig, RunSummary, SOURCE_TABLE};
pub use config::DatabaseConfig;
pub use error::{EtlError, Result};
pub use extract::{Extractor, SnapshotExtractor, SnapshotMetadata};
pub use load::{CsvSink, Loader};
pub use query::{QueryBuilder, SortDirection};
pub use table::DataTable;
pub use transform::{StepStatus, TransformReport, transform_survey};
