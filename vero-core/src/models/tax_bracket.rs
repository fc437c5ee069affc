use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single bracket of the progressive national income tax schedule.
///
/// Brackets are sorted by `min_income` in ascending order; the last bracket
/// has `max_income` of `None` and extends to infinity. Rates are fractions
/// (0.065 means 6.5 %), never whole-number percentages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub min_income: Decimal,
    pub max_income: Option<Decimal>,
    pub rate: Decimal,
}
