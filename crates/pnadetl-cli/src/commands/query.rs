//! Query command - print the canonical survey extraction query.

use pnadetl::{Etl, EtlConfig};

pub fn run(min_year: i32, limit: u64) -> Result<(), Box<dyn std::error::Error>> {
    let etl = Etl::with_config(EtlConfig {
        min_year,
        limit,
        ..EtlConfig::default()
    });

    println!("{}", etl.survey_query()?);
    Ok(())
}
