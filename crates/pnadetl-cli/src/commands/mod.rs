//! Command implementations.

pub mod query;
pub mod run;
pub mod transform;
