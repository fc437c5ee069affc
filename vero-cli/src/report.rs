//! Plain-text rendering of a salary breakdown.

use vero_core::format::{format_bracket, format_currency, format_percentage};
use vero_core::{CalculationError, RateTable, SalaryCalculator, SalaryInput};

fn row(label: &str, value: String) -> String {
    format!("  {label:<26}{value:>16}")
}

/// Renders the breakdown for one salary input as currency-formatted line
/// items, optionally followed by the monthly view.
pub fn render(
    rates: &RateTable,
    input: &SalaryInput,
    monthly: bool,
) -> Result<String, CalculationError> {
    let calculator = SalaryCalculator::new(rates);
    let view = calculator.calculate_monthly(input)?;
    let breakdown = &view.breakdown;

    let employment = if breakdown.is_self_employed {
        "self-employed"
    } else {
        "employee"
    };
    let mut lines = vec![
        format!(
            "Salary breakdown: {} ({employment})",
            input.municipality.display_name()
        ),
        String::new(),
        row("Gross salary (annual)", format_currency(breakdown.gross_salary)),
        row("National income tax", format_currency(breakdown.national_tax)),
        row("Municipal tax", format_currency(breakdown.municipal_tax)),
    ];
    if !breakdown.church_tax.is_zero() {
        lines.push(row("Church tax", format_currency(breakdown.church_tax)));
    }
    if breakdown.is_self_employed {
        lines.push(row(
            "YEL pension",
            format_currency(breakdown.yel_contribution),
        ));
    } else {
        lines.push(row(
            "TyEL pension",
            format_currency(breakdown.tyel_contribution),
        ));
    }
    lines.push(row(
        "Unemployment insurance",
        format_currency(breakdown.unemployment_insurance),
    ));
    lines.push(row(
        "Health insurance",
        format_currency(breakdown.health_insurance),
    ));
    lines.push(row("Total taxes", format_currency(breakdown.total_taxes)));
    if !breakdown.deductions.is_zero() {
        lines.push(row("Deductions applied", format_currency(breakdown.deductions)));
    }
    lines.push(row("Net salary", format_currency(breakdown.net_salary)));
    lines.push(String::new());
    lines.push(row(
        "Effective tax rate",
        format_percentage(breakdown.effective_tax_rate),
    ));
    if let Some(bracket) = calculator.marginal_bracket(breakdown.gross_salary) {
        lines.push(row("Marginal bracket", format_bracket(bracket)));
    }

    if monthly {
        lines.push(String::new());
        lines.push("Monthly".to_string());
        lines.push(row("Gross", format_currency(view.gross_monthly)));
        lines.push(row("Taxes", format_currency(view.tax_monthly)));
        lines.push(row("Net", format_currency(view.net_monthly)));
    }

    Ok(lines.join("\n"))
}
