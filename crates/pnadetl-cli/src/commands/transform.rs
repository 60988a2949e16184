//! Transform command - clean an extracted CSV table.

use std::path::PathBuf;

use colored::Colorize;
use pnadetl::table::{read_csv_path, write_csv_path};
use pnadetl::{StepStatus, TransformReport, transform_survey};

pub fn run(
    file: PathBuf,
    output: Option<PathBuf>,
    json: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("Input file not found: {}", file.display()).into());
    }

    let table = read_csv_path(&file)?;
    let (cleaned, report) = transform_survey(table)?;

    let output_path = output.unwrap_or_else(|| {
        let stem = file.file_stem().unwrap_or_default().to_string_lossy();
        file.with_file_name(format!("{}_tratada.csv", stem))
    });
    write_csv_path(&cleaned, &output_path)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_report(&report, verbose);
    println!(
        "{} {} rows written to {}",
        "Done:".green().bold(),
        cleaned.row_count().to_string().white().bold(),
        output_path.display().to_string().cyan()
    );
    Ok(())
}

pub fn print_report(report: &TransformReport, verbose: bool) {
    println!(
        "{} {} rows in, {} rows out",
        "Transform:".cyan().bold(),
        report.rows_in,
        report.rows_out
    );

    if verbose {
        for step in &report.steps {
            match &step.status {
                StepStatus::Applied => println!("  {} {}", "applied".green(), step.name),
                StepStatus::Skipped { reason } => {
                    println!("  {} {} ({})", "skipped".yellow(), step.name, reason)
                }
            }
        }
    }

    for warning in &report.warnings {
        println!("{} {}", "Warning:".yellow().bold(), warning);
    }
}
