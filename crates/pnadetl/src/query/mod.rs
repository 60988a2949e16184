//! Read-only SQL query construction.

mod builder;

pub use builder::{QueryBuilder, SortDirection};
