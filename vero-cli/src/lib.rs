//! Command-line front end for the Finnish net-salary calculator.

pub mod report;

/// The 2025 Finnish rate table shipped with the binary, regenerated by
/// `vero-data-builder` whenever the scraped source data changes.
pub const DEFAULT_RATE_TABLE_JSON: &str = include_str!("../../data/taxdata-fi.json");
