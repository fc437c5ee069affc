//! Rate-table validation.
//!
//! Runs after loading or consolidation, before a table is handed to the
//! calculator. The published Finnish bracket schedule has one-euro seams
//! between brackets (…40 000 / 40 001…), so exact contiguity is not
//! demanded; gaps up to [`BRACKET_SEAM_TOLERANCE`] are accepted.

use rust_decimal::Decimal;
use thiserror::Error;
use vero_core::{MunicipalityKey, RateTable};

/// Largest accepted gap between one bracket's cap and the next bracket's
/// floor.
pub const BRACKET_SEAM_TOLERANCE: Decimal = Decimal::ONE;

/// Reasons a rate table is rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("rate table has no national tax brackets")]
    NoBrackets,

    #[error("first bracket must start at 0, starts at {0}")]
    FirstBracketNotZero(Decimal),

    #[error("bracket at {min} caps at {max}, below its own floor")]
    EmptyBracket { min: Decimal, max: Decimal },

    #[error("only the last bracket may be unbounded")]
    UnboundedBracketNotLast,

    #[error("last bracket must be unbounded, caps at {0}")]
    BoundedTail(Decimal),

    #[error("brackets overlap at {0}")]
    OverlappingBrackets(Decimal),

    #[error("gap between bracket cap {prev_max} and floor {next_min} exceeds the seam tolerance")]
    BracketGap {
        prev_max: Decimal,
        next_min: Decimal,
    },

    #[error("bracket rate {rate} at {min} is outside [0, 1]")]
    BracketRateOutOfRange { min: Decimal, rate: Decimal },

    #[error("rate table has no municipal rates")]
    NoMunicipalities,

    #[error("municipal rate {rate} for '{municipality}' is outside [0, 1]")]
    MunicipalRateOutOfRange {
        municipality: MunicipalityKey,
        rate: Decimal,
    },

    #[error("fallback municipality '{0}' is not in the municipal rate table")]
    MissingFallback(MunicipalityKey),

    #[error("contribution rate {rate} for {name} is outside [0, 1]")]
    ContributionRateOutOfRange { name: &'static str, rate: Decimal },
}

fn rate_in_range(rate: Decimal) -> bool {
    rate >= Decimal::ZERO && rate <= Decimal::ONE
}

/// Validates a rate table against the structural rules above.
pub fn validate(table: &RateTable) -> Result<(), ValidationError> {
    let brackets = &table.national_brackets;
    let Some(first) = brackets.first() else {
        return Err(ValidationError::NoBrackets);
    };
    if !first.min_income.is_zero() {
        return Err(ValidationError::FirstBracketNotZero(first.min_income));
    }

    for (i, bracket) in brackets.iter().enumerate() {
        if !rate_in_range(bracket.rate) {
            return Err(ValidationError::BracketRateOutOfRange {
                min: bracket.min_income,
                rate: bracket.rate,
            });
        }
        let last = i + 1 == brackets.len();
        match (bracket.max_income, last) {
            (Some(max), _) if max <= bracket.min_income => {
                return Err(ValidationError::EmptyBracket {
                    min: bracket.min_income,
                    max,
                });
            }
            (Some(max), true) => return Err(ValidationError::BoundedTail(max)),
            (None, false) => return Err(ValidationError::UnboundedBracketNotLast),
            _ => {}
        }
    }

    for pair in brackets.windows(2) {
        let (prev, next) = (&pair[0], &pair[1]);
        let Some(prev_max) = prev.max_income else {
            continue;
        };
        if next.min_income < prev_max {
            return Err(ValidationError::OverlappingBrackets(next.min_income));
        }
        if next.min_income - prev_max > BRACKET_SEAM_TOLERANCE {
            return Err(ValidationError::BracketGap {
                prev_max,
                next_min: next.min_income,
            });
        }
    }

    if table.municipal_rates.is_empty() {
        return Err(ValidationError::NoMunicipalities);
    }
    for (municipality, entry) in &table.municipal_rates {
        if !rate_in_range(entry.rate) {
            return Err(ValidationError::MunicipalRateOutOfRange {
                municipality: municipality.clone(),
                rate: entry.rate,
            });
        }
        if let Some(church_rate) = entry.church_rate {
            if !rate_in_range(church_rate) {
                return Err(ValidationError::MunicipalRateOutOfRange {
                    municipality: municipality.clone(),
                    rate: church_rate,
                });
            }
        }
    }

    if let Some(fallback) = &table.fallback_municipality {
        if !table.municipal_rates.contains_key(fallback) {
            return Err(ValidationError::MissingFallback(fallback.clone()));
        }
    }

    let contributions = [
        ("TyEL", table.contributions.tyel),
        ("YEL", table.contributions.yel),
        ("health insurance", table.contributions.health_insurance),
        (
            "unemployment insurance",
            table.contributions.unemployment_insurance,
        ),
    ];
    for (name, rate) in contributions {
        if !rate_in_range(rate) {
            return Err(ValidationError::ContributionRateOutOfRange { name, rate });
        }
    }

    Ok(())
}
