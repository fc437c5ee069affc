pub mod calculations;
pub mod format;
pub mod models;

pub use calculations::{CalculationError, SalaryCalculator};
pub use models::*;
