//! Consolidation of scraped data into a validated rate table.

use std::collections::BTreeMap;

use chrono::Utc;
use vero_core::{
    ContributionRates, MunicipalRate, MunicipalityKey, RateTable, RateTableMetadata, TaxBracket,
};

use crate::import::{BracketRecord, MunicipalRateRecord};
use crate::loader::{LoadError, normalize_rate};
use crate::verify;

/// Where the shipped Finnish data is scraped from.
pub const DEFAULT_DATA_SOURCES: [&str; 3] = [
    "https://www.vero.fi/henkiloasiakkaat/verokortti-ja-veroilmoitus/kunnallisvero/",
    "https://www.vero.fi/henkiloasiakkaat/verokortti-ja-veroilmoitus/tuloveroasteikko/",
    "https://www.tyoelake.fi/",
];

/// Assembles imported records into a [`RateTable`].
///
/// Rates are normalized to fractions and municipality keys normalized on
/// build; the finished table is validated before it is returned, so a
/// successful build is always usable by the calculator. Metadata is
/// stamped with the build time.
#[derive(Debug, Clone)]
pub struct RateTableBuilder {
    brackets: Vec<BracketRecord>,
    municipalities: Vec<MunicipalRateRecord>,
    contributions: ContributionRates,
    fallback: Option<String>,
    version: String,
    data_sources: Vec<String>,
}

impl RateTableBuilder {
    pub fn new(contributions: ContributionRates) -> Self {
        Self {
            brackets: Vec::new(),
            municipalities: Vec::new(),
            contributions,
            fallback: None,
            version: "1.0.0".to_string(),
            data_sources: DEFAULT_DATA_SOURCES.map(str::to_string).to_vec(),
        }
    }

    pub fn brackets(mut self, records: Vec<BracketRecord>) -> Self {
        self.brackets = records;
        self
    }

    pub fn municipalities(mut self, records: Vec<MunicipalRateRecord>) -> Self {
        self.municipalities = records;
        self
    }

    /// Municipality applied when a lookup misses. Without one, unknown
    /// municipalities become hard errors at calculation time.
    pub fn fallback(mut self, municipality: &str) -> Self {
        self.fallback = Some(municipality.to_string());
        self
    }

    pub fn version(mut self, version: &str) -> Self {
        self.version = version.to_string();
        self
    }

    pub fn data_sources(mut self, sources: Vec<String>) -> Self {
        self.data_sources = sources;
        self
    }

    /// Consolidates and validates. A duplicate municipality keeps the
    /// record seen last.
    pub fn build(self) -> Result<RateTable, LoadError> {
        let national_brackets = self
            .brackets
            .into_iter()
            .map(|record| TaxBracket {
                min_income: record.min_income,
                max_income: record.max_income,
                rate: normalize_rate(record.rate),
            })
            .collect();

        let mut municipal_rates = BTreeMap::new();
        for record in self.municipalities {
            municipal_rates.insert(
                MunicipalityKey::new(&record.municipality),
                MunicipalRate {
                    rate: normalize_rate(record.rate),
                    church_rate: record.church_rate.map(normalize_rate),
                },
            );
        }

        let contributions = ContributionRates {
            tyel: normalize_rate(self.contributions.tyel),
            yel: normalize_rate(self.contributions.yel),
            health_insurance: normalize_rate(self.contributions.health_insurance),
            unemployment_insurance: normalize_rate(self.contributions.unemployment_insurance),
        };

        let table = RateTable {
            national_brackets,
            municipal_rates,
            contributions,
            fallback_municipality: self.fallback.as_deref().map(MunicipalityKey::new),
            metadata: RateTableMetadata {
                last_updated: Utc::now(),
                data_sources: self.data_sources,
                version: self.version,
            },
        };

        verify::validate(&table)?;
        Ok(table)
    }
}
