//! pnadetl CLI - PNAD household-survey ETL pipeline.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Query { min_year, limit } => commands::query::run(min_year, limit),

        Commands::Transform { file, output, json } => {
            commands::transform::run(file, output, json, cli.verbose)
        }

        Commands::Run {
            snapshot,
            out_dir,
            destination,
            min_year,
            limit,
            json,
        } => commands::run::run(
            snapshot,
            out_dir,
            destination,
            min_year,
            limit,
            json,
            cli.verbose,
        ),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
