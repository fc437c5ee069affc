use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use rust_decimal::Decimal;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use vero_cli::{DEFAULT_RATE_TABLE_JSON, report};
use vero_core::{MunicipalityKey, SalaryInput};
use vero_data::RateTableLoader;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Finnish net-salary calculator.
///
/// Computes the annual tax breakdown for a gross salary in a given
/// municipality and prints it as formatted line items.
#[derive(Debug, Parser)]
#[command(name = "vero", version, about)]
struct Cli {
    /// Gross annual salary in euros.
    #[arg(long)]
    gross: Decimal,

    /// Municipality name; case and diacritic insensitive.
    /// Unknown municipalities fall back to the default rate.
    #[arg(long)]
    municipality: String,

    /// Use the self-employed (YEL) pension rate instead of TyEL.
    #[arg(long, default_value_t = false)]
    self_employed: bool,

    /// Flat deduction amount added back to net salary.
    #[arg(long, default_value = "0")]
    deductions: Decimal,

    /// Also print the monthly view.
    #[arg(long, default_value_t = false)]
    monthly: bool,

    /// Path to a rate table JSON file. Defaults to the embedded 2025 table.
    #[arg(long)]
    data: Option<PathBuf>,
}

// ─── tracing ─────────────────────────────────────────────────────────────────

/// Initialise the tracing subscriber.
///
/// * Honours `RUST_LOG` when set.
/// * Falls back to `info` so normal runs are quiet.
/// * Strips timestamps and target names to keep CLI output clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_target(false)
        .init();
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let table = match &cli.data {
        Some(path) => RateTableLoader::from_path(path)
            .with_context(|| format!("Failed to load rate table: {}", path.display()))?,
        None => RateTableLoader::load(DEFAULT_RATE_TABLE_JSON.as_bytes())
            .context("Embedded rate table is invalid")?,
    };
    debug!(
        version = %table.metadata.version,
        updated = %table.metadata.last_updated,
        "rate table loaded"
    );

    let input = SalaryInput {
        gross_salary: cli.gross,
        municipality: MunicipalityKey::new(&cli.municipality),
        is_self_employed: cli.self_employed,
        deductions: cli.deductions,
    };

    let rendered = report::render(&table, &input, cli.monthly)?;
    println!("{rendered}");

    Ok(())
}
