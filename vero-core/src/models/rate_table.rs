use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ContributionRates, MunicipalRate, MunicipalityKey, TaxBracket};

/// The static reference data a salary calculation runs against.
///
/// Loaded once at startup and never mutated afterwards; safe to share
/// across any number of concurrent calculations. All rates are fractions.
/// The data-loading layer is responsible for normalizing divergent source
/// schemas before a `RateTable` exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateTable {
    /// National brackets, ascending by `min_income`, last one unbounded.
    pub national_brackets: Vec<TaxBracket>,
    /// Flat municipal (and optional church) rates, keyed by normalized slug.
    pub municipal_rates: BTreeMap<MunicipalityKey, MunicipalRate>,
    pub contributions: ContributionRates,
    /// Municipality whose rate is applied when a lookup misses.
    /// `None` turns unknown municipalities into hard errors.
    pub fallback_municipality: Option<MunicipalityKey>,
    pub metadata: RateTableMetadata,
}

/// Provenance of the rate table: where the numbers were scraped from and
/// when. Carried along for display and diagnostics, never used in the
/// calculation itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateTableMetadata {
    pub last_updated: DateTime<Utc>,
    pub data_sources: Vec<String>,
    pub version: String,
}

impl Default for RateTableMetadata {
    fn default() -> Self {
        Self {
            last_updated: DateTime::UNIX_EPOCH,
            data_sources: Vec::new(),
            version: "0.0.0".to_string(),
        }
    }
}
