use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Fixed social contribution rates, as fractions of gross salary.
///
/// `tyel` is the employee pension rate, `yel` the self-employed pension
/// rate; a breakdown applies exactly one of the two. Unemployment and
/// health insurance apply to everyone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionRates {
    pub tyel: Decimal,
    pub yel: Decimal,
    pub health_insurance: Decimal,
    pub unemployment_insurance: Decimal,
}
