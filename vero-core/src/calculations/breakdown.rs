//! Finnish net-salary breakdown calculation.
//!
//! This module computes a complete tax breakdown from a gross annual
//! salary, a municipality and an employment type, against a static
//! [`RateTable`]:
//!
//! | Component              | Rule |
//! |------------------------|------|
//! | National income tax    | Progressive bracket sum over the national schedule |
//! | Municipal tax          | Flat per-municipality rate × gross salary |
//! | Church tax             | Optional flat rate × gross salary, when the municipality has one |
//! | Pension contribution   | TyEL rate (employee) or YEL rate (self-employed), never both |
//! | Unemployment insurance | Flat rate × gross salary, always applied |
//! | Health insurance       | Flat rate × gross salary, always applied |
//!
//! Net salary is gross minus the component total, with any flat deduction
//! amount added back afterwards. The effective tax rate is the component
//! total over gross salary, as a percentage; a zero salary yields 0 %
//! rather than a division.
//!
//! The computation is pure and synchronous: no state is kept between
//! calls, and a shared `&RateTable` can serve any number of concurrent
//! calculations.
//!
//! # Example
//!
//! ```
//! use std::collections::BTreeMap;
//! use rust_decimal_macros::dec;
//! use vero_core::{
//!     ContributionRates, MunicipalRate, MunicipalityKey, RateTable, RateTableMetadata,
//!     SalaryCalculator, SalaryInput, TaxBracket,
//! };
//!
//! let mut municipal_rates = BTreeMap::new();
//! municipal_rates.insert(
//!     MunicipalityKey::new("helsinki"),
//!     MunicipalRate { rate: dec!(0.176), church_rate: None },
//! );
//!
//! let rates = RateTable {
//!     national_brackets: vec![
//!         TaxBracket { min_income: dec!(0), max_income: Some(dec!(19999)), rate: dec!(0) },
//!         TaxBracket { min_income: dec!(20000), max_income: Some(dec!(40000)), rate: dec!(0.065) },
//!         TaxBracket { min_income: dec!(40001), max_income: None, rate: dec!(0.125) },
//!     ],
//!     municipal_rates,
//!     contributions: ContributionRates {
//!         tyel: dec!(0.0715),
//!         yel: dec!(0.245),
//!         health_insurance: dec!(0.014),
//!         unemployment_insurance: dec!(0.0125),
//!     },
//!     fallback_municipality: Some(MunicipalityKey::new("helsinki")),
//!     metadata: RateTableMetadata::default(),
//! };
//!
//! let calculator = SalaryCalculator::new(&rates);
//! let input = SalaryInput {
//!     gross_salary: dec!(30000),
//!     municipality: MunicipalityKey::new("Helsinki"),
//!     is_self_employed: false,
//!     deductions: dec!(0),
//! };
//!
//! let breakdown = calculator.calculate(&input).unwrap();
//!
//! assert_eq!(breakdown.national_tax, dec!(650));
//! assert_eq!(breakdown.total_taxes, dec!(8870));
//! assert_eq!(breakdown.net_salary, dec!(21130));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::warn;

use crate::calculations::common::round_half_up;
use crate::models::{
    MonthlyBreakdown, MunicipalRate, MunicipalityKey, RateTable, SalaryInput, TaxBracket,
    TaxBreakdown,
};

/// Errors that can occur during a salary breakdown calculation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalculationError {
    /// The rate table carries no national tax brackets.
    #[error("no national tax brackets in rate table")]
    NoTaxBrackets,

    /// Gross salary must be non-negative.
    #[error("gross salary must be non-negative, got {0}")]
    InvalidGrossSalary(Decimal),

    /// The deduction amount must be non-negative.
    #[error("deductions must be non-negative, got {0}")]
    InvalidDeductions(Decimal),

    /// The municipality is not in the rate table and no fallback
    /// municipality is configured (or the fallback itself is missing).
    #[error("unknown municipality '{0}' and no usable fallback configured")]
    UnknownMunicipality(MunicipalityKey),
}

/// Calculator for net-salary and tax breakdowns.
///
/// Borrows the rate table for its lifetime; the table is read-only
/// reference data and never modified here.
#[derive(Debug, Clone)]
pub struct SalaryCalculator<'a> {
    rates: &'a RateTable,
}

impl<'a> SalaryCalculator<'a> {
    pub fn new(rates: &'a RateTable) -> Self {
        Self { rates }
    }

    /// Computes the complete annual breakdown for one salary input.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError`] if the bracket table is empty, the
    /// gross salary or deduction amount is negative, or the municipality
    /// is unknown and the table has no fallback municipality.
    pub fn calculate(&self, input: &SalaryInput) -> Result<TaxBreakdown, CalculationError> {
        if self.rates.national_brackets.is_empty() {
            return Err(CalculationError::NoTaxBrackets);
        }
        if input.gross_salary < Decimal::ZERO {
            return Err(CalculationError::InvalidGrossSalary(input.gross_salary));
        }
        if input.deductions < Decimal::ZERO {
            return Err(CalculationError::InvalidDeductions(input.deductions));
        }

        let gross = input.gross_salary;
        let municipal = self.resolve_municipality(&input.municipality)?;

        let national_tax = round_half_up(self.national_tax(gross));
        let municipal_tax = round_half_up(gross * municipal.rate);
        let church_tax = match municipal.church_rate {
            Some(rate) => round_half_up(gross * rate),
            None => Decimal::ZERO,
        };

        // TyEL and YEL are mutually exclusive per individual.
        let (tyel_contribution, yel_contribution) = if input.is_self_employed {
            (Decimal::ZERO, round_half_up(gross * self.rates.contributions.yel))
        } else {
            (round_half_up(gross * self.rates.contributions.tyel), Decimal::ZERO)
        };

        let unemployment_insurance =
            round_half_up(gross * self.rates.contributions.unemployment_insurance);
        let health_insurance = round_half_up(gross * self.rates.contributions.health_insurance);

        let total_taxes = national_tax
            + municipal_tax
            + church_tax
            + tyel_contribution
            + yel_contribution
            + unemployment_insurance
            + health_insurance;
        let net_salary = gross - total_taxes + input.deductions;
        let effective_tax_rate = self.effective_tax_rate(total_taxes, gross);

        Ok(TaxBreakdown {
            gross_salary: gross,
            national_tax,
            municipal_tax,
            church_tax,
            tyel_contribution,
            yel_contribution,
            unemployment_insurance,
            health_insurance,
            total_taxes,
            net_salary,
            effective_tax_rate,
            deductions: input.deductions,
            is_self_employed: input.is_self_employed,
        })
    }

    /// Computes the annual breakdown and wraps it in a monthly view
    /// (annual figures divided by 12, rounded half-up to cents).
    pub fn calculate_monthly(
        &self,
        input: &SalaryInput,
    ) -> Result<MonthlyBreakdown, CalculationError> {
        let breakdown = self.calculate(input)?;
        let twelve = Decimal::from(12);

        Ok(MonthlyBreakdown {
            gross_monthly: round_half_up(breakdown.gross_salary / twelve),
            net_monthly: round_half_up(breakdown.net_salary / twelve),
            tax_monthly: round_half_up(breakdown.total_taxes / twelve),
            breakdown,
        })
    }

    /// Progressive national income tax for a gross salary.
    ///
    /// Every bracket whose floor lies below the salary contributes
    /// `(min(salary, bracket max) - bracket floor) × rate`; unbounded
    /// brackets extend to the salary itself. An income exactly at a
    /// bracket floor contributes nothing in that bracket (inclusive lower
    /// bound, zero width). The result is continuous and non-decreasing in
    /// the salary, and zero for a zero salary.
    pub fn national_tax(&self, gross_salary: Decimal) -> Decimal {
        let mut total = Decimal::ZERO;

        for bracket in &self.rates.national_brackets {
            if gross_salary <= bracket.min_income {
                break;
            }
            let ceiling = match bracket.max_income {
                Some(max) => max.min(gross_salary),
                None => gross_salary,
            };
            total += (ceiling - bracket.min_income) * bracket.rate;
        }

        total
    }

    /// The bracket a gross salary falls in, or `None` when the salary fits
    /// no bracket (the published schedule has one-euro seams between
    /// brackets).
    pub fn marginal_bracket(&self, gross_salary: Decimal) -> Option<&TaxBracket> {
        self.rates.national_brackets.iter().find(|b| {
            gross_salary >= b.min_income && b.max_income.is_none_or(|max| gross_salary <= max)
        })
    }

    /// Looks up the municipal rate entry, falling back to the configured
    /// fallback municipality for unknown keys. The fallback is logged so
    /// it is observable, never silent.
    fn resolve_municipality(
        &self,
        key: &MunicipalityKey,
    ) -> Result<&MunicipalRate, CalculationError> {
        if let Some(entry) = self.rates.municipal_rates.get(key) {
            return Ok(entry);
        }

        let fallback = self
            .rates
            .fallback_municipality
            .as_ref()
            .ok_or_else(|| CalculationError::UnknownMunicipality(key.clone()))?;
        let entry = self
            .rates
            .municipal_rates
            .get(fallback)
            .ok_or_else(|| CalculationError::UnknownMunicipality(key.clone()))?;

        warn!(
            requested = %key,
            fallback = %fallback,
            "unknown municipality, using fallback rate"
        );
        Ok(entry)
    }

    /// Total taxes over gross salary, as a percentage rounded to two
    /// decimal places. Special-cased to 0 for a zero salary so the
    /// division is never reached.
    fn effective_tax_rate(&self, total_taxes: Decimal, gross_salary: Decimal) -> Decimal {
        if gross_salary.is_zero() {
            return Decimal::ZERO;
        }
        round_half_up(total_taxes / gross_salary * Decimal::ONE_HUNDRED)
    }
}
