//! Run command - full pipeline over a warehouse snapshot.

use std::path::PathBuf;

use colored::Colorize;
use pnadetl::{CsvSink, DatabaseConfig, Etl, EtlConfig, SnapshotExtractor};

use super::transform::print_report;

pub fn run(
    snapshot: PathBuf,
    out_dir: PathBuf,
    destination: String,
    min_year: i32,
    limit: u64,
    json: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !snapshot.exists() {
        return Err(format!("Snapshot file not found: {}", snapshot.display()).into());
    }

    if verbose {
        // The CSV sink stands in for the relational store; show the
        // connection the real sink would use, with the password masked.
        let db = DatabaseConfig::from_env();
        let masked = DatabaseConfig {
            password: "****".to_string(),
            ..db
        };
        println!("{} {}", "Database:".cyan().bold(), masked.connection_url());
    }

    let etl = Etl::with_config(EtlConfig {
        destination: destination.clone(),
        min_year,
        limit,
        ..EtlConfig::default()
    });
    let extractor = SnapshotExtractor::new(&snapshot);
    let sink = CsvSink::new(&out_dir);

    let summary = etl.run(&extractor, &sink)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    if verbose {
        println!("{} {}", "Query:".cyan().bold(), summary.query);
        if let Some(meta) = extractor.last_metadata() {
            println!("{} {} ({} bytes)", "Snapshot:".cyan().bold(), meta.hash, meta.size_bytes);
        }
    }

    println!(
        "{} {} rows extracted",
        "Extract:".cyan().bold(),
        summary.rows_extracted
    );
    print_report(&summary.transform, verbose);
    println!(
        "{} {} rows loaded into {}",
        "Load:".green().bold(),
        summary.rows_loaded.to_string().white().bold(),
        sink.destination_path(&destination).display().to_string().cyan()
    );
    Ok(())
}
