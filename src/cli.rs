use std::path::{Path, PathBuf};
use anyhow::Result;
use tracing::info;

use crate::config::SeatingConfig;
use crate::export;
use crate::processing::SeatingPipeline;
use crate::summary::SummaryReport;

/// Output format for the summary command
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SummaryFormat {
    Text,
    Csv,
    Json,
}

/// Assign seats and write the seating table
pub fn assign_command(config: SeatingConfig, use_reserve: bool) -> Result<()> {
    info!("🪑 Assigning seats from {:?}", config.paths.groups_dir);

    let pipeline = SeatingPipeline::new(config).with_reserve(use_reserve);
    let report = match pipeline.run() {
        Ok(report) => report,
        Err(e) => {
            eprintln!("❌ Guest seating assignment failed or no data processed.");
            eprintln!("   {}", e.user_message());
            return Err(e.into());
        }
    };

    println!("✅ Guest seating assignment completed!");
    println!("   Group files used: {} ({} skipped)", report.sources_loaded, report.sources_skipped);
    println!("   Guests seated: {}", report.guests);
    println!("   Tables: {}", report.tables);
    println!("   Seats: {}", report.rows.len());
    println!(
        "   Vacancies: {} ({} filled from reserve, {} still vacant)",
        report.fill.vacancies, report.fill.filled, report.fill.remaining_vacancies
    );
    if report.fill.unused_reserves > 0 {
        println!("   Unused reserve guests: {}", report.fill.unused_reserves);
    }
    println!("   Output file: {:?}", report.output);

    Ok(())
}

/// Print per-table tallies for an existing seating table
pub fn summary_command(config: &SeatingConfig, input: &Path, format: SummaryFormat) -> Result<()> {
    info!("📊 Summarizing {:?}", input);

    if !input.exists() {
        return Err(anyhow::anyhow!("Seating table not found: {:?}", input));
    }

    let rows = export::read_seating_table(input)?;
    let report = SummaryReport::build(&rows, &config.labels);

    match format {
        SummaryFormat::Text => print!("{}", report.to_text()),
        SummaryFormat::Csv => print!("{}", report.to_csv()?),
        SummaryFormat::Json => println!("{}", serde_json::to_string_pretty(&report.to_json())?),
    }

    Ok(())
}

/// Write the effective configuration as TOML
pub fn config_command(config: &SeatingConfig, output: PathBuf) -> Result<()> {
    config.save_to_file(&output)?;
    info!("⚙️  Configuration written to {:?}", output);
    println!("⚙️  Configuration written to {:?}", output);
    Ok(())
}
