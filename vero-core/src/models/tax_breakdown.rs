use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Complete annual tax breakdown for one salary input.
///
/// Derived read-only result, computed fresh on every call. The components
/// always satisfy
/// `total_taxes = national_tax + municipal_tax + church_tax + tyel_contribution
///  + yel_contribution + unemployment_insurance + health_insurance`
/// and `net_salary = gross_salary - total_taxes + deductions`. Exactly one
/// of the two pension contributions is non-zero for a non-zero salary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBreakdown {
    pub gross_salary: Decimal,
    pub national_tax: Decimal,
    pub municipal_tax: Decimal,
    /// Zero when the resolved municipality carries no church rate.
    pub church_tax: Decimal,
    /// Employee pension contribution. Zero for the self-employed.
    pub tyel_contribution: Decimal,
    /// Self-employed pension contribution. Zero for employees.
    pub yel_contribution: Decimal,
    pub unemployment_insurance: Decimal,
    pub health_insurance: Decimal,
    pub total_taxes: Decimal,
    pub net_salary: Decimal,
    /// Total taxes over gross salary, as a percentage. 0 for a zero salary.
    pub effective_tax_rate: Decimal,
    /// Deductions added back to net salary, echoed from the input.
    pub deductions: Decimal,
    pub is_self_employed: bool,
}

impl TaxBreakdown {
    /// The pension contribution that actually applied (TyEL or YEL).
    pub fn pension_contribution(&self) -> Decimal {
        if self.is_self_employed {
            self.yel_contribution
        } else {
            self.tyel_contribution
        }
    }
}

/// Per-month view of an annual breakdown: the annual figures divided by 12.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyBreakdown {
    pub gross_monthly: Decimal,
    pub net_monthly: Decimal,
    pub tax_monthly: Decimal,
    pub breakdown: TaxBreakdown,
}
