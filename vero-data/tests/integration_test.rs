//! End-to-end test: scraped CSV artifacts through consolidation,
//! validation, serialization and a full salary calculation.

use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use vero_core::{ContributionRates, MunicipalityKey, SalaryCalculator, SalaryInput};
use vero_data::loader::RateTableLoader;
use vero_data::{RateTableBuilder, import};

const BRACKETS_CSV: &str = "min_income,max_income,rate\n\
                            0,19999,0\n\
                            20000,40000,0.065\n\
                            40001,70000,0.125\n\
                            70001,,0.175\n";

const MUNICIPAL_CSV: &str = "municipality,rate,church_rate\n\
                             Helsinki,0.176,\n\
                             Tampere,0.195,\n\
                             Jyväskylä,0.195,0.014\n";

fn contributions() -> ContributionRates {
    ContributionRates {
        tyel: dec!(0.0715),
        yel: dec!(0.245),
        health_insurance: dec!(0.014),
        unemployment_insurance: dec!(0.0125),
    }
}

#[test]
fn csv_artifacts_build_a_working_rate_table() {
    let brackets = import::parse_brackets(BRACKETS_CSV.as_bytes()).expect("Failed to parse CSV");
    let municipalities =
        import::parse_municipal_rates(MUNICIPAL_CSV.as_bytes()).expect("Failed to parse CSV");

    let table = RateTableBuilder::new(contributions())
        .brackets(brackets)
        .municipalities(municipalities)
        .fallback("helsinki")
        .build()
        .expect("Failed to build rate table");

    let calculator = SalaryCalculator::new(&table);
    let breakdown = calculator
        .calculate(&SalaryInput {
            gross_salary: dec!(30000),
            municipality: MunicipalityKey::new("Helsinki"),
            is_self_employed: false,
            deductions: dec!(0),
        })
        .expect("Failed to calculate");

    assert_eq!(breakdown.national_tax, dec!(650));
    assert_eq!(breakdown.municipal_tax, dec!(5280));
    assert_eq!(breakdown.total_taxes, dec!(8870));
    assert_eq!(breakdown.net_salary, dec!(21130));
}

#[test]
fn built_table_survives_a_serialization_round_trip() {
    let brackets = import::parse_brackets(BRACKETS_CSV.as_bytes()).expect("Failed to parse CSV");
    let municipalities =
        import::parse_municipal_rates(MUNICIPAL_CSV.as_bytes()).expect("Failed to parse CSV");

    let table = RateTableBuilder::new(contributions())
        .brackets(brackets)
        .municipalities(municipalities)
        .fallback("helsinki")
        .build()
        .expect("Failed to build rate table");

    let json = RateTableLoader::to_json(&table).expect("Failed to serialize");
    let reloaded = RateTableLoader::load(json.as_bytes()).expect("Failed to reload");

    assert_eq!(reloaded, table);
}

#[test]
fn scraped_diacritic_names_resolve_after_the_round_trip() {
    let municipalities =
        import::parse_municipal_rates(MUNICIPAL_CSV.as_bytes()).expect("Failed to parse CSV");
    let brackets = import::parse_brackets(BRACKETS_CSV.as_bytes()).expect("Failed to parse CSV");

    let table = RateTableBuilder::new(contributions())
        .brackets(brackets)
        .municipalities(municipalities)
        .fallback("helsinki")
        .build()
        .expect("Failed to build rate table");

    let calculator = SalaryCalculator::new(&table);
    let breakdown = calculator
        .calculate(&SalaryInput {
            gross_salary: dec!(30000),
            municipality: MunicipalityKey::new("JYVÄSKYLÄ"),
            is_self_employed: true,
            deductions: dec!(0),
        })
        .expect("Failed to calculate");

    // Resolved without the fallback: Jyväskylä's own rate, plus its church tax.
    assert_eq!(breakdown.municipal_tax, dec!(5850));
    assert_eq!(breakdown.church_tax, dec!(420));
    assert_eq!(breakdown.yel_contribution, dec!(7350));
    assert_eq!(breakdown.tyel_contribution, dec!(0));
}
