//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// pnadetl: PNAD household-survey ETL pipeline
#[derive(Parser)]
#[command(name = "pnadetl")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the canonical survey extraction query
    Query {
        /// Earliest survey year to extract
        #[arg(long, default_value = "2022")]
        min_year: i32,

        /// Row cap on the extraction
        #[arg(long, default_value = "1000000")]
        limit: u64,
    },

    /// Clean and enrich an extracted CSV table
    Transform {
        /// Path to the extracted CSV file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output path for the cleaned table (default: <file>_tratada.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the transform report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run the full pipeline over a warehouse snapshot
    Run {
        /// Path to the CSV snapshot standing in for the warehouse
        #[arg(value_name = "SNAPSHOT")]
        snapshot: PathBuf,

        /// Directory the load sink writes into
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,

        /// Destination table name
        #[arg(short, long, default_value = "pnad_tratada")]
        destination: String,

        /// Earliest survey year to extract
        #[arg(long, default_value = "2022")]
        min_year: i32,

        /// Row cap on the extraction
        #[arg(long, default_value = "1000000")]
        limit: u64,

        /// Print the run summary as JSON
        #[arg(long)]
        json: bool,
    },
}
