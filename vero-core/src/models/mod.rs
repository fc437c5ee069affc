mod contribution_rates;
mod municipality;
mod rate_table;
mod salary_input;
mod tax_bracket;
mod tax_breakdown;

pub use contribution_rates::ContributionRates;
pub use municipality::{MunicipalityKey, MunicipalRate};
pub use rate_table::{RateTable, RateTableMetadata};
pub use salary_input::SalaryInput;
pub use tax_bracket::TaxBracket;
pub use tax_breakdown::{MonthlyBreakdown, TaxBreakdown};
