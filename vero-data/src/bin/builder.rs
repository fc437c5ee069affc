use std::fs::{self, File};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use vero_data::loader::{RateTableLoader, parse_contributions};
use vero_data::{RateTableBuilder, import};

/// Consolidate scraped Finnish tax data into a rate table JSON file.
///
/// Inputs are the artifacts produced by the out-of-scope scraping step:
/// - a brackets CSV with columns min_income, max_income (empty for the
///   unbounded tail) and rate
/// - a municipal rates CSV with columns municipality, rate and an
///   optional church_rate
/// - a pension-rates JSON with TyEL, YEL, healthInsurance and optionally
///   unemploymentInsurance
///
/// Rates may be fractions (0.065) or whole-number percentages (6.5);
/// both are normalized to fractions. The output is verified before it is
/// written.
#[derive(Parser, Debug)]
#[command(name = "vero-data-builder")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the national brackets CSV
    #[arg(long)]
    brackets: PathBuf,

    /// Path to the municipal rates CSV
    #[arg(long)]
    municipal_rates: PathBuf,

    /// Path to the pension/contribution rates JSON
    #[arg(long)]
    pension_rates: PathBuf,

    /// Municipality whose rate covers unknown lookups
    #[arg(long, default_value = "helsinki")]
    fallback: String,

    /// Version stamp for the rate table metadata
    #[arg(long, default_value = "1.0.0")]
    version: String,

    /// Output path for the consolidated rate table
    #[arg(short, long, default_value = "taxdata-fi.json")]
    output: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("Reading national brackets from: {}", args.brackets.display());
    let brackets_file = File::open(&args.brackets)
        .with_context(|| format!("Failed to open: {}", args.brackets.display()))?;
    let brackets = import::parse_brackets(brackets_file)
        .with_context(|| format!("Failed to parse CSV: {}", args.brackets.display()))?;
    println!("Parsed {} brackets", brackets.len());

    println!(
        "Reading municipal rates from: {}",
        args.municipal_rates.display()
    );
    let municipal_file = File::open(&args.municipal_rates)
        .with_context(|| format!("Failed to open: {}", args.municipal_rates.display()))?;
    let municipalities = import::parse_municipal_rates(municipal_file)
        .with_context(|| format!("Failed to parse CSV: {}", args.municipal_rates.display()))?;
    println!("Parsed {} municipal rates", municipalities.len());

    println!(
        "Reading contribution rates from: {}",
        args.pension_rates.display()
    );
    let pension_file = File::open(&args.pension_rates)
        .with_context(|| format!("Failed to open: {}", args.pension_rates.display()))?;
    let contributions = parse_contributions(pension_file)
        .with_context(|| format!("Failed to parse JSON: {}", args.pension_rates.display()))?;

    let table = RateTableBuilder::new(contributions)
        .brackets(brackets)
        .municipalities(municipalities)
        .fallback(&args.fallback)
        .version(&args.version)
        .build()
        .context("Consolidated rate table failed validation")?;

    let json = RateTableLoader::to_json(&table).context("Failed to serialize rate table")?;
    fs::write(&args.output, json)
        .with_context(|| format!("Failed to write: {}", args.output.display()))?;

    println!(
        "Successfully wrote {} brackets and {} municipalities to {}",
        table.national_brackets.len(),
        table.municipal_rates.len(),
        args.output.display()
    );

    Ok(())
}
