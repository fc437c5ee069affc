//! Salary and tax calculation logic.

pub mod breakdown;
pub mod common;

pub use breakdown::{CalculationError, SalaryCalculator};
