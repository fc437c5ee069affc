//! CSV imports of scraped rate data.
//!
//! The out-of-scope scraping step drops two CSV artifacts: one with the
//! per-municipality rates and one with the national bracket schedule.
//! These records are the input to the [`crate::RateTableBuilder`].

use std::io::Read;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::loader::LoadError;

/// One scraped municipal rate.
///
/// Columns: `municipality,rate,church_rate` — `church_rate` may be empty
/// (or the column absent entirely) for municipalities without one.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MunicipalRateRecord {
    pub municipality: String,
    pub rate: Decimal,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub church_rate: Option<Decimal>,
}

/// One scraped national bracket.
///
/// Columns: `min_income,max_income,rate` — `max_income` is empty for the
/// unbounded tail bracket.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BracketRecord {
    pub min_income: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub max_income: Option<Decimal>,
    pub rate: Decimal,
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Parses municipal rate records from a CSV reader.
pub fn parse_municipal_rates<R: Read>(reader: R) -> Result<Vec<MunicipalRateRecord>, LoadError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut records = Vec::new();

    for result in csv_reader.deserialize() {
        let record: MunicipalRateRecord = result?;
        records.push(record);
    }

    Ok(records)
}

/// Parses national bracket records from a CSV reader.
pub fn parse_brackets<R: Read>(reader: R) -> Result<Vec<BracketRecord>, LoadError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut records = Vec::new();

    for result in csv_reader.deserialize() {
        let record: BracketRecord = result?;
        records.push(record);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn parse_municipal_rates_csv() {
        let csv = "municipality,rate,church_rate\n\
                   helsinki,0.176,\n\
                   tampere,0.195,0.014\n";

        let records = parse_municipal_rates(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0],
            MunicipalRateRecord {
                municipality: "helsinki".to_string(),
                rate: dec!(0.176),
                church_rate: None,
            }
        );
        assert_eq!(records[1].church_rate, Some(dec!(0.014)));
    }

    #[test]
    fn parse_municipal_rates_without_church_column() {
        let csv = "municipality,rate\nhelsinki,0.176\n";

        let records = parse_municipal_rates(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].church_rate, None);
    }

    #[test]
    fn parse_brackets_csv() {
        let csv = "min_income,max_income,rate\n\
                   0,19999,0\n\
                   20000,40000,0.065\n\
                   40001,,0.125\n";

        let records = parse_brackets(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(records.len(), 3);
        assert_eq!(
            records[1],
            BracketRecord {
                min_income: dec!(20000),
                max_income: Some(dec!(40000)),
                rate: dec!(0.065),
            }
        );
        assert_eq!(records[2].max_income, None);
    }

    #[test]
    fn parse_brackets_empty_csv() {
        let csv = "min_income,max_income,rate\n";

        let records = parse_brackets(csv.as_bytes()).expect("Failed to parse CSV");

        assert!(records.is_empty());
    }

    #[test]
    fn parse_brackets_invalid_decimal_is_an_error() {
        let csv = "min_income,max_income,rate\nabc,19999,0\n";

        let result = parse_brackets(csv.as_bytes());

        let err = result.expect_err("Should fail for invalid decimal");
        let LoadError::CsvParse(msg) = err else {
            panic!("Expected CsvParse error, got: {:?}", err);
        };
        assert!(
            msg.contains("invalid"),
            "Expected 'invalid' in error, got: {}",
            msg
        );
    }

    #[test]
    fn parse_municipal_rates_missing_column_is_an_error() {
        let csv = "municipality\nhelsinki\n";

        let result = parse_municipal_rates(csv.as_bytes());

        assert!(matches!(result, Err(LoadError::CsvParse(_))));
    }
}
