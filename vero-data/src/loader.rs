//! JSON rate-table parsing.
//!
//! Two divergent source schemas were observed in the wild: rates written
//! as fractions (`0.065`) and rates written as whole-number percentages
//! (`6.5`). Both are accepted here and every rate is folded to a fraction
//! at this boundary; nothing past the loader ever sees a percent-form
//! rate. The rule is simply "greater than one means percent", which holds
//! for every real Finnish rate in either schema.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use vero_core::{
    ContributionRates, MunicipalRate, MunicipalityKey, RateTable, RateTableMetadata, TaxBracket,
};

use crate::verify::{self, ValidationError};

/// Errors that can occur when loading rate table data.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read rate table: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

impl From<csv::Error> for LoadError {
    fn from(err: csv::Error) -> Self {
        LoadError::CsvParse(err.to_string())
    }
}

/// Fallback unemployment insurance rate when the source data omits it,
/// matching the original data builder.
pub(crate) fn default_unemployment_rate() -> Decimal {
    Decimal::new(125, 4) // 0.0125
}

/// Folds a rate to fraction form: values greater than one are treated as
/// whole-number percentages and divided by 100.
pub(crate) fn normalize_rate(rate: Decimal) -> Decimal {
    if rate > Decimal::ONE {
        rate / Decimal::ONE_HUNDRED
    } else {
        rate
    }
}

// ─── wire schema ─────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRateTable {
    national_brackets: Vec<RawBracket>,
    municipal_rates: BTreeMap<String, RawMunicipalRate>,
    contributions: RawContributions,
    #[serde(default)]
    fallback_municipality: Option<String>,
    #[serde(default)]
    metadata: Option<RawMetadata>,
}

#[derive(Debug, Serialize, Deserialize)]
struct RawBracket {
    min: Decimal,
    max: Option<Decimal>,
    rate: Decimal,
}

/// Municipal entries are either a bare rate (the common case) or an
/// object carrying an additional church rate.
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum RawMunicipalRate {
    Flat(Decimal),
    Detailed {
        rate: Decimal,
        #[serde(default, rename = "churchRate")]
        church_rate: Option<Decimal>,
    },
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct RawContributions {
    #[serde(rename = "TyEL")]
    tyel: Decimal,
    #[serde(rename = "YEL")]
    yel: Decimal,
    #[serde(rename = "healthInsurance")]
    health_insurance: Decimal,
    #[serde(rename = "unemploymentInsurance", default)]
    unemployment_insurance: Option<Decimal>,
}

impl RawContributions {
    fn into_contributions(self) -> ContributionRates {
        ContributionRates {
            tyel: normalize_rate(self.tyel),
            yel: normalize_rate(self.yel),
            health_insurance: normalize_rate(self.health_insurance),
            unemployment_insurance: normalize_rate(
                self.unemployment_insurance
                    .unwrap_or_else(default_unemployment_rate),
            ),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMetadata {
    last_updated: DateTime<Utc>,
    data_sources: Vec<String>,
    version: String,
}

impl RawRateTable {
    fn into_table(self) -> RateTable {
        let national_brackets = self
            .national_brackets
            .into_iter()
            .map(|b| TaxBracket {
                min_income: b.min,
                max_income: b.max,
                rate: normalize_rate(b.rate),
            })
            .collect();

        let municipal_rates = self
            .municipal_rates
            .into_iter()
            .map(|(key, entry)| {
                let entry = match entry {
                    RawMunicipalRate::Flat(rate) => MunicipalRate {
                        rate: normalize_rate(rate),
                        church_rate: None,
                    },
                    RawMunicipalRate::Detailed { rate, church_rate } => MunicipalRate {
                        rate: normalize_rate(rate),
                        church_rate: church_rate.map(normalize_rate),
                    },
                };
                (MunicipalityKey::new(&key), entry)
            })
            .collect();

        let metadata = self
            .metadata
            .map(|m| RateTableMetadata {
                last_updated: m.last_updated,
                data_sources: m.data_sources,
                version: m.version,
            })
            .unwrap_or_default();

        RateTable {
            national_brackets,
            municipal_rates,
            contributions: self.contributions.into_contributions(),
            fallback_municipality: self
                .fallback_municipality
                .as_deref()
                .map(MunicipalityKey::new),
            metadata,
        }
    }

    fn from_table(table: &RateTable) -> Self {
        Self {
            national_brackets: table
                .national_brackets
                .iter()
                .map(|b| RawBracket {
                    min: b.min_income,
                    max: b.max_income,
                    rate: b.rate,
                })
                .collect(),
            municipal_rates: table
                .municipal_rates
                .iter()
                .map(|(key, entry)| {
                    let raw = match entry.church_rate {
                        None => RawMunicipalRate::Flat(entry.rate),
                        Some(church_rate) => RawMunicipalRate::Detailed {
                            rate: entry.rate,
                            church_rate: Some(church_rate),
                        },
                    };
                    (key.as_str().to_string(), raw)
                })
                .collect(),
            contributions: RawContributions {
                tyel: table.contributions.tyel,
                yel: table.contributions.yel,
                health_insurance: table.contributions.health_insurance,
                unemployment_insurance: Some(table.contributions.unemployment_insurance),
            },
            fallback_municipality: table
                .fallback_municipality
                .as_ref()
                .map(|k| k.as_str().to_string()),
            metadata: Some(RawMetadata {
                last_updated: table.metadata.last_updated,
                data_sources: table.metadata.data_sources.clone(),
                version: table.metadata.version.clone(),
            }),
        }
    }
}

// ─── public API ──────────────────────────────────────────────────────────────

/// Loader for the JSON rate-table artifact.
pub struct RateTableLoader;

impl RateTableLoader {
    /// Parses a rate table without validating it. Rates and municipality
    /// keys are normalized.
    pub fn parse<R: Read>(reader: R) -> Result<RateTable, LoadError> {
        let raw: RawRateTable = serde_json::from_reader(reader)?;
        Ok(raw.into_table())
    }

    /// Parses and validates a rate table.
    pub fn load<R: Read>(reader: R) -> Result<RateTable, LoadError> {
        let table = Self::parse(reader)?;
        verify::validate(&table)?;
        Ok(table)
    }

    /// Loads and validates a rate table from a file.
    pub fn from_path(path: &Path) -> Result<RateTable, LoadError> {
        Self::load(File::open(path)?)
    }

    /// Serializes a rate table back to the wire schema, pretty-printed.
    pub fn to_json(table: &RateTable) -> Result<String, LoadError> {
        Ok(serde_json::to_string_pretty(&RawRateTable::from_table(
            table,
        ))?)
    }
}

/// Parses a contribution-rates JSON file (the scraped `pension-rates`
/// artifact). A missing unemployment rate falls back to 1.25 %.
pub fn parse_contributions<R: Read>(reader: R) -> Result<ContributionRates, LoadError> {
    let raw: RawContributions = serde_json::from_reader(reader)?;
    Ok(raw.into_contributions())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const FRACTION_FORM: &str = r#"{
        "nationalBrackets": [
            {"min": 0, "max": 19999, "rate": 0},
            {"min": 20000, "max": 40000, "rate": 0.065},
            {"min": 40001, "max": null, "rate": 0.125}
        ],
        "municipalRates": {
            "helsinki": 0.176,
            "tampere": {"rate": 0.195, "churchRate": 0.014}
        },
        "contributions": {
            "TyEL": 0.0715,
            "YEL": 0.245,
            "healthInsurance": 0.014,
            "unemploymentInsurance": 0.0125
        },
        "fallbackMunicipality": "helsinki",
        "metadata": {
            "lastUpdated": "2025-10-07T15:22:47.845Z",
            "dataSources": ["https://www.vero.fi/"],
            "version": "1.0.0"
        }
    }"#;

    const PERCENT_FORM: &str = r#"{
        "nationalBrackets": [
            {"min": 0, "max": 19999, "rate": 0},
            {"min": 20000, "max": null, "rate": 6.5}
        ],
        "municipalRates": {
            "helsinki": 17.6
        },
        "contributions": {
            "TyEL": 7.15,
            "YEL": 24.5,
            "healthInsurance": 1.4
        },
        "fallbackMunicipality": "helsinki"
    }"#;

    #[test]
    fn parse_fraction_form_table() {
        let table = RateTableLoader::load(FRACTION_FORM.as_bytes()).expect("Failed to load");

        assert_eq!(table.national_brackets.len(), 3);
        assert_eq!(table.national_brackets[1].rate, dec!(0.065));
        assert_eq!(table.national_brackets[2].max_income, None);
        assert_eq!(
            table.municipal_rates[&MunicipalityKey::new("helsinki")].rate,
            dec!(0.176)
        );
        assert_eq!(table.contributions.yel, dec!(0.245));
        assert_eq!(
            table.fallback_municipality,
            Some(MunicipalityKey::new("helsinki"))
        );
        assert_eq!(table.metadata.version, "1.0.0");
    }

    #[test]
    fn parse_detailed_municipal_entry_keeps_church_rate() {
        let table = RateTableLoader::load(FRACTION_FORM.as_bytes()).expect("Failed to load");

        let tampere = &table.municipal_rates[&MunicipalityKey::new("tampere")];
        assert_eq!(tampere.rate, dec!(0.195));
        assert_eq!(tampere.church_rate, Some(dec!(0.014)));
    }

    #[test]
    fn parse_percent_form_normalizes_every_rate_to_fractions() {
        let table = RateTableLoader::load(PERCENT_FORM.as_bytes()).expect("Failed to load");

        assert_eq!(table.national_brackets[1].rate, dec!(0.065));
        assert_eq!(
            table.municipal_rates[&MunicipalityKey::new("helsinki")].rate,
            dec!(0.176)
        );
        assert_eq!(table.contributions.tyel, dec!(0.0715));
        assert_eq!(table.contributions.yel, dec!(0.245));
        assert_eq!(table.contributions.health_insurance, dec!(0.014));
    }

    #[test]
    fn parse_missing_unemployment_rate_uses_default() {
        let table = RateTableLoader::load(PERCENT_FORM.as_bytes()).expect("Failed to load");

        assert_eq!(table.contributions.unemployment_insurance, dec!(0.0125));
    }

    #[test]
    fn parse_missing_metadata_uses_default() {
        let table = RateTableLoader::load(PERCENT_FORM.as_bytes()).expect("Failed to load");

        assert_eq!(table.metadata.version, "0.0.0");
        assert!(table.metadata.data_sources.is_empty());
    }

    #[test]
    fn parse_normalizes_municipality_keys() {
        let json = r#"{
            "nationalBrackets": [{"min": 0, "max": null, "rate": 0}],
            "municipalRates": {"Jyväskylä": 0.195},
            "contributions": {"TyEL": 0.0715, "YEL": 0.245, "healthInsurance": 0.014}
        }"#;

        let table = RateTableLoader::parse(json.as_bytes()).expect("Failed to parse");

        assert!(
            table
                .municipal_rates
                .contains_key(&MunicipalityKey::new("jyvaskyla"))
        );
    }

    #[test]
    fn load_rejects_invalid_table() {
        // Brackets out of order: second floor below the first cap.
        let json = r#"{
            "nationalBrackets": [
                {"min": 0, "max": 30000, "rate": 0},
                {"min": 20000, "max": null, "rate": 0.065}
            ],
            "municipalRates": {"helsinki": 0.176},
            "contributions": {"TyEL": 0.0715, "YEL": 0.245, "healthInsurance": 0.014}
        }"#;

        let result = RateTableLoader::load(json.as_bytes());

        assert!(matches!(result, Err(LoadError::Invalid(_))));
    }

    #[test]
    fn load_rejects_malformed_json() {
        let result = RateTableLoader::load("not json".as_bytes());

        assert!(matches!(result, Err(LoadError::Json(_))));
    }

    #[test]
    fn to_json_round_trips() {
        let table = RateTableLoader::load(FRACTION_FORM.as_bytes()).expect("Failed to load");

        let json = RateTableLoader::to_json(&table).expect("Failed to serialize");
        let reloaded = RateTableLoader::load(json.as_bytes()).expect("Failed to reload");

        assert_eq!(reloaded, table);
    }

    #[test]
    fn parse_contributions_from_pension_rates_file() {
        let json = r#"{"TyEL": 0.0715, "YEL": 0.245, "healthInsurance": 0.014}"#;

        let rates = parse_contributions(json.as_bytes()).expect("Failed to parse");

        assert_eq!(rates.tyel, dec!(0.0715));
        assert_eq!(rates.unemployment_insurance, dec!(0.0125));
    }
}
