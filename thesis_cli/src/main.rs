// Copyright (C) 2025 aidan-es. Licensed under the GNU AGPLv3.
//! Generates thesis templates and the accompanying website for every
//! university profile in a JSON data file.
use chrono::Datelike as _;
use clap::Parser;
use std::path::PathBuf;
use thesis_core::factory::{DEFAULT_OUTPUT_DIR, GeneratorConfig, run};
use thesis_core::file_io::load_records;

#[derive(Parser)]
#[command(name = "thesis-factory")]
#[command(about = "Generate university thesis templates and a searchable website", long_about = None)]
struct Cli {
    /// JSON file holding an array of university profiles
    #[arg(long, default_value = "data.json")]
    data: PathBuf,

    /// Directory the generated files are written to
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    output: PathBuf,

    /// Year guideline verification dates are compared against (defaults to the current year)
    #[arg(long)]
    reference_year: Option<i32>,

    /// Log every file written
    #[arg(long, short)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    simple_logger::init_with_level(level)?;

    log::info!("Copyright (C) 2025 aidan-es");
    log::info!("This software comes with ABSOLUTELY NO WARRANTY.");
    log::info!("Licensed under the GNU AGPLv3.");
    log::info!("Starting thesis template generation...");

    let records = match load_records(&cli.data).await {
        Ok(records) => records,
        Err(e) => {
            log::error!("Cannot start: {e}");
            return Err(e.into());
        }
    };

    let reference_year = cli
        .reference_year
        .unwrap_or_else(|| chrono::Local::now().year());
    let config = GeneratorConfig::new(cli.output, reference_year);

    let report = run(&records, &config).await?;

    for failure in &report.failed {
        log::warn!("Skipped {}: {}", failure.id, failure.message);
    }
    log::info!(
        "Generated {}/{} template(s); website at {}",
        report.generated.len(),
        records.len(),
        report.index_page.display()
    );

    Ok(())
}
