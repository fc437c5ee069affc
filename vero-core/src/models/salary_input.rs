use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::MunicipalityKey;

/// One salary calculation request. Created per request, immutable,
/// discarded after use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryInput {
    /// Gross annual salary in euros. Must be non-negative.
    pub gross_salary: Decimal,
    pub municipality: MunicipalityKey,
    /// Self-employed (YEL pension) rather than employee (TyEL pension).
    pub is_self_employed: bool,
    /// Flat deduction amount added back to net salary after tax.
    ///
    /// This mirrors the original product behaviour: deductions reduce the
    /// effective tax burden post hoc and never affect bracket placement.
    /// It is a simplification, not a pre-tax deduction model.
    #[serde(default)]
    pub deductions: Decimal,
}
