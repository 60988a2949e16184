//! Fluent builder for a single-table `SELECT` statement.
//!
//! The builder accumulates a query specification (projections, predicates,
//! ordering, limit) and renders it as one immutable string. Rendering is
//! idempotent and does not modify the specification.
//!
//! Values are inlined as literals with no escaping. The warehouse is an
//! internal, trusted collaborator; this is a documented limitation, not an
//! injection surface to harden.
//!
//! # Example
//!
//! ```
//! use pnadetl::query::{QueryBuilder, SortDirection};
//!
//! let query = QueryBuilder::new("dataset.survey")
//!     .unwrap()
//!     .add_column("ano")
//!     .add_column_with_alias("sigla_uf", "uf")
//!     .filter_greater_or_equal("ano", 2022)
//!     .order_by("ano", SortDirection::Asc)
//!     .limit(100)
//!     .render();
//!
//! assert!(query.starts_with("SELECT ano, sigla_uf AS uf FROM `dataset.survey`"));
//! ```

use std::fmt::Display;

use crate::error::{EtlError, Result};

/// Direction of the single `ORDER BY` clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Builds a parameterized read-only `SELECT` against a single source table.
///
/// All mutators consume and return the builder, so calls chain. Each call
/// touches only the specification field it names. At most one ordering
/// clause and one limit are kept; repeated calls overwrite (last wins).
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    table: String,
    columns: Vec<String>,
    predicates: Vec<String>,
    ordering: Option<(String, SortDirection)>,
    limit: Option<u64>,
}

impl QueryBuilder {
    /// Create a builder for the given source table.
    ///
    /// Fails with [`EtlError::InvalidArgument`] if the table name is empty.
    pub fn new(table: impl Into<String>) -> Result<Self> {
        let table = table.into();
        if table.is_empty() {
            return Err(EtlError::InvalidArgument(
                "table name must not be empty".to_string(),
            ));
        }

        Ok(Self {
            table,
            columns: Vec::new(),
            predicates: Vec::new(),
            ordering: None,
            limit: None,
        })
    }

    /// Append a bare column projection. Order of calls is preserved in the
    /// rendered output.
    pub fn add_column(mut self, name: &str) -> Self {
        self.columns.push(name.to_string());
        self
    }

    /// Append a `name AS alias` projection.
    pub fn add_column_with_alias(mut self, name: &str, alias: &str) -> Self {
        self.columns.push(format!("{} AS {}", name, alias));
        self
    }

    /// Append `column = value`.
    pub fn filter_equals(self, column: &str, value: impl Display) -> Self {
        self.push_comparison(column, "=", value)
    }

    /// Append `column > value`.
    pub fn filter_greater_than(self, column: &str, value: impl Display) -> Self {
        self.push_comparison(column, ">", value)
    }

    /// Append `column >= value`.
    pub fn filter_greater_or_equal(self, column: &str, value: impl Display) -> Self {
        self.push_comparison(column, ">=", value)
    }

    /// Append `column < value`.
    pub fn filter_less_than(self, column: &str, value: impl Display) -> Self {
        self.push_comparison(column, "<", value)
    }

    /// Append `column <= value`.
    pub fn filter_less_or_equal(self, column: &str, value: impl Display) -> Self {
        self.push_comparison(column, "<=", value)
    }

    /// Append `column <> value`.
    pub fn filter_not_equal(self, column: &str, value: impl Display) -> Self {
        self.push_comparison(column, "<>", value)
    }

    /// Append `column IS NOT NULL`.
    pub fn filter_not_null(mut self, column: &str) -> Self {
        self.predicates.push(format!("{} IS NOT NULL", column));
        self
    }

    /// Append a single parenthesized predicate that holds when at least one
    /// of the listed columns is non-null. An empty list appends nothing.
    pub fn filter_any_not_null(mut self, columns: &[&str]) -> Self {
        if columns.is_empty() {
            return self;
        }

        let clause = columns
            .iter()
            .map(|c| format!("{} IS NOT NULL", c))
            .collect::<Vec<_>>()
            .join(" OR ");
        self.predicates.push(format!("({})", clause));
        self
    }

    /// Set the single `ORDER BY` clause, replacing any previous one.
    pub fn order_by(mut self, column: &str, direction: SortDirection) -> Self {
        self.ordering = Some((column.to_string(), direction));
        self
    }

    /// Set the row cap, replacing any previous one. A zero cap clears the
    /// cap, so no `LIMIT` clause is rendered.
    pub fn limit(mut self, n: u64) -> Self {
        self.limit = (n > 0).then_some(n);
        self
    }

    /// Render the final query string.
    ///
    /// Clauses appear in fixed order: projection, `WHERE` (predicates joined
    /// with `AND` in call order), `ORDER BY`, `LIMIT`. An empty projection
    /// renders as `*`. The table identifier is backtick-quoted for the
    /// warehouse dialect.
    pub fn render(&self) -> String {
        let columns = if self.columns.is_empty() {
            "*".to_string()
        } else {
            self.columns.join(", ")
        };

        let mut query = format!("SELECT {} FROM `{}`", columns, self.table);

        if !self.predicates.is_empty() {
            query.push_str(&format!(" WHERE {}", self.predicates.join(" AND ")));
        }

        if let Some((column, direction)) = &self.ordering {
            query.push_str(&format!(" ORDER BY {} {}", column, direction.as_sql()));
        }

        if let Some(n) = self.limit {
            query.push_str(&format!(" LIMIT {}", n));
        }

        query
    }

    fn push_comparison(mut self, column: &str, op: &str, value: impl Display) -> Self {
        self.predicates.push(format!("{} {} {}", column, op, value));
        self
    }
}
