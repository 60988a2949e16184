//! Main Etl struct and public API.

use serde::Serialize;

use crate::error::Result;
use crate::extract::Extractor;
use crate::load::Loader;
use crate::query::{QueryBuilder, SortDirection};
use crate::transform::{TransformReport, transform_survey};

/// Source table of the PNAD Contínua microdata in the warehouse.
pub const SOURCE_TABLE: &str = "basedosdados.br_ibge_pnadc.microdados";

/// Configuration for one ETL run.
#[derive(Debug, Clone)]
pub struct EtlConfig {
    /// Warehouse project the query bills against.
    pub project_id: String,
    /// Destination table for the cleaned result.
    pub destination: String,
    /// Earliest survey year to extract.
    pub min_year: i32,
    /// Row cap on the extraction.
    pub limit: u64,
}

impl Default for EtlConfig {
    fn default() -> Self {
        Self {
            project_id: "etl-pnad".to_string(),
            destination: "pnad_tratada".to_string(),
            min_year: 2022,
            limit: 1_000_000,
        }
    }
}

/// Result of a full extract-transform-load run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// The rendered query sent to the extractor.
    pub query: String,
    /// Rows received from the warehouse.
    pub rows_extracted: usize,
    /// Rows persisted after cleaning.
    pub rows_loaded: usize,
    /// Destination table name.
    pub destination: String,
    /// Per-step transform outcome.
    pub transform: TransformReport,
}

/// The ETL pipeline: canonical query, transform rules, and the wiring
/// between the external extractor and loader.
pub struct Etl {
    config: EtlConfig,
}

impl Etl {
    /// Create a pipeline with default configuration.
    pub fn new() -> Self {
        Self::with_config(EtlConfig::default())
    }

    /// Create a pipeline with custom configuration.
    pub fn with_config(config: EtlConfig) -> Self {
        Self { config }
    }

    /// Render the canonical survey query.
    ///
    /// Projects the survey variables under their analysis aliases, keeps
    /// non-negative household incomes from `min_year` onward, requires at
    /// least one education field to be filled, and caps the result.
    pub fn survey_query(&self) -> Result<String> {
        let query = QueryBuilder::new(SOURCE_TABLE)?
            .add_column("ano")
            .add_column_with_alias("sigla_uf", "uf")
            .add_column_with_alias("V2007", "sexo")
            .add_column_with_alias("V2009", "idade")
            .add_column_with_alias("VD4019", "renda_domiciliar")
            .add_column_with_alias("V2001", "moradores")
            .add_column_with_alias("V1027", "peso")
            .add_column_with_alias("V3009A", "maior_curso_frequentado")
            .add_column_with_alias("V3008", "frequentou_escola")
            .add_column_with_alias("V3001", "sabe_ler_escrever")
            .add_column_with_alias("V3002A", "rede_ensino")
            .filter_greater_or_equal("VD4019", 0)
            .filter_greater_or_equal("ano", self.config.min_year)
            .filter_any_not_null(&["V3009A", "V3002A"])
            .order_by("ano", SortDirection::Asc)
            .limit(self.config.limit)
            .render();
        Ok(query)
    }

    /// Run extract → transform → load and return the run summary.
    ///
    /// No step is retried; extraction and load failures propagate to the
    /// caller as-is.
    pub fn run(&self, extractor: &dyn Extractor, loader: &dyn Loader) -> Result<RunSummary> {
        let query = self.survey_query()?;
        let table = extractor.extract(&self.config.project_id, &query)?;
        let rows_extracted = table.row_count();

        let (cleaned, transform) = transform_survey(table)?;
        loader.load(&cleaned, &self.config.destination)?;

        Ok(RunSummary {
            query,
            rows_extracted,
            rows_loaded: cleaned.row_count(),
            destination: self.config.destination.clone(),
            transform,
        })
    }
}

impl Default for Etl {
    fn default() -> Self {
        Self::new()
    }
}
