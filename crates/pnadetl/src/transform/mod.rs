//! Cleaning, derivation and recoding of the extracted survey table.
//!
//! The pipeline is a pure, single-pass, order-dependent sequence of
//! column-level rules. Later steps may depend on columns produced by
//! earlier ones (per-capita income needs the member-count filter, region
//! needs the normalized UF column). Each step is gated on the presence of
//! its input columns and reports whether it was applied or skipped; only
//! the two required columns are fatal when absent.

mod lookups;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::error::{EtlError, Result};
use crate::table::DataTable;

pub use lookups::{
    HIGHEST_LEVEL, LITERACY, NOT_INFORMED, REGIONS, SCHOOL_ATTENDANCE, SCHOOL_NETWORK,
};

/// Column that must hold the household income.
pub const INCOME_COLUMN: &str = "renda_domiciliar";
/// Column that must hold the household member count.
pub const MEMBERS_COLUMN: &str = "moradores";

/// Leading integer substring of a (possibly already textual) code.
static LEADING_INT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*(\d+)").unwrap());

/// Outcome of a single pipeline step.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepStatus {
    /// The step ran over the table.
    Applied,
    /// The step's input columns were absent; the table is unchanged.
    Skipped { reason: String },
}

/// Per-step entry in the transform report.
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub name: &'static str,
    #[serde(flatten)]
    pub status: StepStatus,
}

/// Summary of one pipeline run: row counts, per-step status and the
/// non-fatal diagnostics accumulated along the way.
#[derive(Debug, Clone, Serialize)]
pub struct TransformReport {
    pub rows_in: usize,
    pub rows_out: usize,
    pub steps: Vec<StepReport>,
    pub warnings: Vec<String>,
}

struct Step {
    name: &'static str,
    run: fn(&mut DataTable) -> Result<StepStatus>,
}

/// The fixed step sequence. Order matters and is part of the contract.
const STEPS: &[Step] = &[
    Step { name: "require_core_columns", run: require_core_columns },
    Step { name: "drop_incomplete_rows", run: drop_incomplete_rows },
    Step { name: "drop_negative_total_income", run: drop_negative_total_income },
    Step { name: "derive_income_per_capita", run: derive_income_per_capita },
    Step { name: "normalize_sex", run: normalize_sex },
    Step { name: "derive_age_band", run: derive_age_band },
    Step { name: "derive_region", run: derive_region },
    Step { name: "recode_literacy", run: |t| recode_column(t, "sabe_ler_escrever", &LITERACY) },
    Step { name: "recode_school_attendance", run: |t| recode_column(t, "frequentou_escola", &SCHOOL_ATTENDANCE) },
    Step { name: "recode_school_network", run: |t| recode_column(t, "rede_ensino", &SCHOOL_NETWORK) },
    Step { name: "recode_highest_level", run: |t| recode_column(t, "maior_curso_frequentado", &HIGHEST_LEVEL) },
];

/// Run the full cleaning pipeline over an extracted table.
///
/// Consumes the input and returns the cleaned table with a
/// [`TransformReport`]. Fails with [`EtlError::MissingColumn`] when one of
/// the required columns is absent; every other rule degrades to a
/// best-effort value instead of failing.
pub fn transform_survey(mut table: DataTable) -> Result<(DataTable, TransformReport)> {
    let rows_in = table.row_count();
    let mut steps = Vec::with_capacity(STEPS.len());
    let mut warnings = Vec::new();

    for step in STEPS {
        let status = (step.run)(&mut table)?;
        if let StepStatus::Skipped { reason } = &status {
            warnings.push(format!("{}: {}", step.name, reason));
        }
        steps.push(StepReport { name: step.name, status });
    }

    let report = TransformReport {
        rows_in,
        rows_out: table.row_count(),
        steps,
        warnings,
    };
    Ok((table, report))
}

/// Step 1: household income and member count must both be present.
fn require_core_columns(table: &mut DataTable) -> Result<StepStatus> {
    for column in [INCOME_COLUMN, MEMBERS_COLUMN] {
        if !table.has_column(column) {
            return Err(EtlError::MissingColumn(column.to_string()));
        }
    }
    Ok(StepStatus::Applied)
}

/// Step 2: drop rows with a missing value in either required column.
fn drop_incomplete_rows(table: &mut DataTable) -> Result<StepStatus> {
    let income = table.column_index(INCOME_COLUMN).expect("checked in step 1");
    let members = table.column_index(MEMBERS_COLUMN).expect("checked in step 1");

    table.retain_rows(|row| {
        !DataTable::is_null_value(row_cell(row, income))
            && !DataTable::is_null_value(row_cell(row, members))
    });
    Ok(StepStatus::Applied)
}

/// Cell of a borrowed row; a missing cell in a ragged row reads as empty.
fn row_cell(row: &[String], idx: usize) -> &str {
    row.get(idx).map(String::as_str).unwrap_or("")
}

/// Step 3: drop rows whose total income (missing treated as zero) is
/// negative. Only runs when the optional `renda_total` column exists.
fn drop_negative_total_income(table: &mut DataTable) -> Result<StepStatus> {
    let Some(total) = table.column_index("renda_total") else {
        return Ok(StepStatus::Skipped {
            reason: "column 'renda_total' not present".to_string(),
        });
    };

    table.retain_rows(|row| {
        let cell = row_cell(row, total);
        let value = if DataTable::is_null_value(cell) {
            0.0
        } else {
            cell.trim().parse::<f64>().unwrap_or(0.0)
        };
        value >= 0.0
    });
    Ok(StepStatus::Applied)
}

/// Step 4: drop rows with a non-positive member count, then derive
/// `renda_pc = renda_domiciliar / moradores`.
fn derive_income_per_capita(table: &mut DataTable) -> Result<StepStatus> {
    let income = table.column_index(INCOME_COLUMN).expect("checked in step 1");
    let members = table.column_index(MEMBERS_COLUMN).expect("checked in step 1");

    table.retain_rows(|row| {
        row_cell(row, members)
            .trim()
            .parse::<f64>()
            .map(|m| m > 0.0)
            .unwrap_or(false)
    });

    let pc = table.add_column("renda_pc".to_string(), String::new());
    for row_idx in 0..table.row_count() {
        let derived = match (table.get_f64(row_idx, income), table.get_f64(row_idx, members)) {
            (Some(r), Some(m)) => Some(r / m),
            _ => None,
        };
        if let Some(value) = derived {
            table.set(row_idx, pc, value.to_string());
        }
    }
    Ok(StepStatus::Applied)
}

/// Step 5: sex codes 1/2 become "M"/"F"; anything unparsable as an integer
/// is kept as uppercased free text (fallback, not an error).
fn normalize_sex(table: &mut DataTable) -> Result<StepStatus> {
    let Some(sex) = table.column_index("sexo") else {
        return Ok(StepStatus::Skipped {
            reason: "column 'sexo' not present".to_string(),
        });
    };

    for row_idx in 0..table.row_count() {
        let value = table.get(row_idx, sex).unwrap_or_default().trim().to_string();
        let normalized = match value.parse::<i64>() {
            Ok(1) => "M".to_string(),
            Ok(2) => "F".to_string(),
            Ok(other) => other.to_string(),
            Err(_) => value.to_uppercase(),
        };
        table.set(row_idx, sex, normalized);
    }
    Ok(StepStatus::Applied)
}

/// Step 6: bucket age into labeled bands; ages outside (0, 200] or missing
/// get an empty band.
fn derive_age_band(table: &mut DataTable) -> Result<StepStatus> {
    let Some(age) = table.column_index("idade") else {
        return Ok(StepStatus::Skipped {
            reason: "column 'idade' not present".to_string(),
        });
    };

    let band = table.add_column("faixa_etaria".to_string(), String::new());
    for row_idx in 0..table.row_count() {
        if let Some(label) = table.get_f64(row_idx, age).and_then(age_band) {
            table.set(row_idx, band, label.to_string());
        }
    }
    Ok(StepStatus::Applied)
}

/// Band boundaries are half-open on the left: (0,18], (18,30], (30,45],
/// (45,60], (60,200].
fn age_band(age: f64) -> Option<&'static str> {
    if age > 0.0 && age <= 18.0 {
        Some("0-18")
    } else if age > 18.0 && age <= 30.0 {
        Some("19-30")
    } else if age > 30.0 && age <= 45.0 {
        Some("31-45")
    } else if age > 45.0 && age <= 60.0 {
        Some("46-60")
    } else if age > 60.0 && age <= 200.0 {
        Some("60+")
    } else {
        None
    }
}

/// Step 7: normalize the state-code column to `uf` and map it through the
/// region table. Unknown codes yield an empty region. With neither
/// accepted column name present the step is skipped, not failed.
fn derive_region(table: &mut DataTable) -> Result<StepStatus> {
    if !table.has_column("uf") {
        if table.has_column("sigla_uf") {
            table.rename_column("sigla_uf", "uf");
        } else {
            return Ok(StepStatus::Skipped {
                reason: "no state-code column ('uf' or 'sigla_uf'); region not derived"
                    .to_string(),
            });
        }
    }

    let uf = table.column_index("uf").expect("normalized above");
    let region = table.add_column("regiao".to_string(), String::new());
    for row_idx in 0..table.row_count() {
        let code = table.get(row_idx, uf).unwrap_or_default().trim().to_string();
        if let Some(name) = REGIONS.get(code.as_str()) {
            table.set(row_idx, region, name.to_string());
        }
    }
    Ok(StepStatus::Applied)
}

/// Step 8: map the leading integer of a categorical code through a lookup
/// table, replacing unmapped or unparsable values with [`NOT_INFORMED`].
fn recode_column(
    table: &mut DataTable,
    column: &str,
    lookup: &IndexMap<&'static str, &'static str>,
) -> Result<StepStatus> {
    let Some(col) = table.column_index(column) else {
        return Ok(StepStatus::Skipped {
            reason: format!("column '{}' not present", column),
        });
    };

    for row_idx in 0..table.row_count() {
        let value = table.get(row_idx, col).unwrap_or_default();
        let label = leading_code(value)
            .and_then(|code| lookup.get(code.as_str()).copied())
            .unwrap_or(NOT_INFORMED);
        table.set(row_idx, col, label.to_string());
    }
    Ok(StepStatus::Applied)
}

/// Extract the leading integer of a value, normalized without leading
/// zeros ("01" and "1.0" both yield "1").
fn leading_code(value: &str) -> Option<String> {
    let captures = LEADING_INT.captures(value)?;
    captures[1].parse::<i64>().ok().map(|n| n.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(headers: &[&str], rows: &[&[&str]]) -> DataTable {
        DataTable::new(
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter()
                .map(|row| row.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    fn cell<'a>(t: &'a DataTable, row: usize, column: &str) -> &'a str {
        t.get(row, t.column_index(column).unwrap()).unwrap()
    }

    #[test]
    fn test_missing_required_column_is_fatal() {
        let input = table(&["renda_domiciliar"], &[&["1000"]]);
        let err = transform_survey(input).unwrap_err();
        match err {
            EtlError::MissingColumn(name) => assert_eq!(name, "moradores"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_rows_with_missing_required_values_are_dropped() {
        let input = table(
            &["renda_domiciliar", "moradores"],
            &[&["1000", "2"], &["", "3"], &["500", "NA"], &["800", "4"]],
        );
        let (out, report) = transform_survey(input).unwrap();
        assert_eq!(out.row_count(), 2);
        assert_eq!(report.rows_in, 4);
        assert_eq!(report.rows_out, 2);
    }

    #[test]
    fn test_ragged_rows_read_as_missing_and_are_dropped() {
        // DataTable::new accepts rows shorter than the header; absent
        // cells count as missing values instead of panicking.
        let input = DataTable::new(
            vec![
                "renda_domiciliar".to_string(),
                "moradores".to_string(),
                "renda_total".to_string(),
            ],
            vec![
                vec!["1000".to_string()],
                vec!["1000".to_string(), "2".to_string()],
                vec!["1000".to_string(), "2".to_string(), "50".to_string()],
            ],
        );
        let (out, _) = transform_survey(input).unwrap();
        // First row is missing moradores entirely; the second's absent
        // renda_total reads as zero and survives.
        assert_eq!(out.row_count(), 2);
    }

    #[test]
    fn test_negative_total_income_dropped_missing_treated_as_zero() {
        let input = table(
            &["renda_domiciliar", "moradores", "renda_total"],
            &[&["100", "1", "-5"], &["100", "1", ""], &["100", "1", "50"]],
        );
        let (out, _) = transform_survey(input).unwrap();
        assert_eq!(out.row_count(), 2);
    }

    #[test]
    fn test_zero_members_row_dropped() {
        let input = table(
            &["renda_domiciliar", "moradores"],
            &[&["1000", "0"], &["1000", "-2"], &["1000", "4"]],
        );
        let (out, _) = transform_survey(input).unwrap();
        assert_eq!(out.row_count(), 1);
        assert_eq!(cell(&out, 0, "renda_pc"), "250");
    }

    #[test]
    fn test_per_capita_invariant() {
        let input = table(
            &["renda_domiciliar", "moradores"],
            &[&["900", "3"], &["1250", "5"]],
        );
        let (out, _) = transform_survey(input).unwrap();
        let income = out.column_index("renda_domiciliar").unwrap();
        let members = out.column_index("moradores").unwrap();
        let pc = out.column_index("renda_pc").unwrap();
        for row in 0..out.row_count() {
            let r = out.get_f64(row, income).unwrap();
            let m = out.get_f64(row, members).unwrap();
            assert!(m > 0.0);
            assert_eq!(out.get_f64(row, pc).unwrap(), r / m);
        }
    }

    #[test]
    fn test_sex_codes_and_free_text_fallback() {
        let input = table(
            &["renda_domiciliar", "moradores", "sexo"],
            &[
                &["100", "1", "1"],
                &["100", "1", "2"],
                &["100", "1", "feminino"],
                &["100", "1", "9"],
            ],
        );
        let (out, _) = transform_survey(input).unwrap();
        assert_eq!(cell(&out, 0, "sexo"), "M");
        assert_eq!(cell(&out, 1, "sexo"), "F");
        assert_eq!(cell(&out, 2, "sexo"), "FEMININO");
        assert_eq!(cell(&out, 3, "sexo"), "9");
    }

    #[test]
    fn test_age_bands() {
        assert_eq!(age_band(1.0), Some("0-18"));
        assert_eq!(age_band(18.0), Some("0-18"));
        assert_eq!(age_band(19.0), Some("19-30"));
        assert_eq!(age_band(30.0), Some("19-30"));
        assert_eq!(age_band(45.0), Some("31-45"));
        assert_eq!(age_band(60.0), Some("46-60"));
        assert_eq!(age_band(61.0), Some("60+"));
        assert_eq!(age_band(200.0), Some("60+"));
        assert_eq!(age_band(0.0), None);
        assert_eq!(age_band(201.0), None);
        assert_eq!(age_band(-3.0), None);
    }

    #[test]
    fn test_age_band_column_blank_when_out_of_range() {
        let input = table(
            &["renda_domiciliar", "moradores", "idade"],
            &[&["100", "1", "25"], &["100", "1", "999"], &["100", "1", ""]],
        );
        let (out, _) = transform_survey(input).unwrap();
        assert_eq!(cell(&out, 0, "faixa_etaria"), "19-30");
        assert_eq!(cell(&out, 1, "faixa_etaria"), "");
        assert_eq!(cell(&out, 2, "faixa_etaria"), "");
    }

    #[test]
    fn test_region_from_uf() {
        let input = table(
            &["renda_domiciliar", "moradores", "uf"],
            &[&["100", "1", "SP"], &["100", "1", "AM"], &["100", "1", "XX"]],
        );
        let (out, _) = transform_survey(input).unwrap();
        assert_eq!(cell(&out, 0, "regiao"), "Sudeste");
        assert_eq!(cell(&out, 1, "regiao"), "Norte");
        assert_eq!(cell(&out, 2, "regiao"), "");
    }

    #[test]
    fn test_region_normalizes_sigla_uf() {
        let input = table(
            &["renda_domiciliar", "moradores", "sigla_uf"],
            &[&["100", "1", "RS"]],
        );
        let (out, _) = transform_survey(input).unwrap();
        assert!(out.has_column("uf"));
        assert!(!out.has_column("sigla_uf"));
        assert_eq!(cell(&out, 0, "regiao"), "Sul");
    }

    #[test]
    fn test_region_skipped_without_state_column() {
        let input = table(&["renda_domiciliar", "moradores"], &[&["100", "1"]]);
        let (out, report) = transform_survey(input).unwrap();
        assert!(!out.has_column("regiao"));
        assert!(report
            .warnings
            .iter()
            .any(|w| w.contains("region not derived")));
    }

    #[test]
    fn test_recode_unmapped_code_becomes_not_informed() {
        let input = table(
            &["renda_domiciliar", "moradores", "sabe_ler_escrever"],
            &[&["100", "1", "1"], &["100", "1", "3"], &["100", "1", ""]],
        );
        let (out, _) = transform_survey(input).unwrap();
        assert_eq!(cell(&out, 0, "sabe_ler_escrever"), "Sim");
        assert_eq!(cell(&out, 1, "sabe_ler_escrever"), NOT_INFORMED);
        assert_eq!(cell(&out, 2, "sabe_ler_escrever"), NOT_INFORMED);
    }

    #[test]
    fn test_recode_is_idempotent_on_textual_values() {
        let input = table(
            &["renda_domiciliar", "moradores", "rede_ensino"],
            &[&["100", "1", "Pública"]],
        );
        let (out, _) = transform_survey(input).unwrap();
        // Already-recoded text has no leading integer, so it degrades to
        // the sentinel instead of crashing.
        assert_eq!(cell(&out, 0, "rede_ensino"), NOT_INFORMED);
    }

    #[test]
    fn test_recode_strips_decimal_and_leading_zero_codes() {
        let input = table(
            &["renda_domiciliar", "moradores", "maior_curso_frequentado"],
            &[&["100", "1", "8.0"], &["100", "1", "09"]],
        );
        let (out, _) = transform_survey(input).unwrap();
        assert_eq!(cell(&out, 0, "maior_curso_frequentado"), "Ensino médio");
        assert_eq!(cell(&out, 1, "maior_curso_frequentado"), "Superior de graduação");
    }

    #[test]
    fn test_reference_scenario() {
        let input = table(
            &["renda_domiciliar", "moradores", "sexo", "idade"],
            &[&["1000", "2", "1", "25"]],
        );
        let (out, _) = transform_survey(input).unwrap();
        assert_eq!(out.row_count(), 1);
        let pc = out.column_index("renda_pc").unwrap();
        assert_eq!(out.get_f64(0, pc), Some(500.0));
        assert_eq!(cell(&out, 0, "sexo"), "M");
        assert_eq!(cell(&out, 0, "faixa_etaria"), "19-30");
    }

    #[test]
    fn test_step_order_is_recorded() {
        let input = table(&["renda_domiciliar", "moradores"], &[&["100", "1"]]);
        let (_, report) = transform_survey(input).unwrap();
        let names: Vec<_> = report.steps.iter().map(|s| s.name).collect();
        assert_eq!(
            names,
            vec![
                "require_core_columns",
                "drop_incomplete_rows",
                "drop_negative_total_income",
                "derive_income_per_capita",
                "normalize_sex",
                "derive_age_band",
                "derive_region",
                "recode_literacy",
                "recode_school_attendance",
                "recode_school_network",
                "recode_highest_level",
            ]
        );
    }
}
