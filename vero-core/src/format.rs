//! Finnish-locale display formatting for currency amounts, percentages and
//! bracket ranges.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::TaxBracket;

/// Non-breaking space, the fi-FI thousands separator.
const NBSP: char = '\u{a0}';

/// Formats an amount as fi-FI euros with zero decimal places: `30 000 €`.
///
/// Rounds half-up to whole euros and groups thousands with non-breaking
/// spaces.
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let digits = rounded.abs().normalize().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 4);
    if negative {
        grouped.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(NBSP);
        }
        grouped.push(c);
    }
    grouped.push(NBSP);
    grouped.push('€');
    grouped
}

/// Formats a percentage value to one decimal place: `21.5%`.
///
/// The input is already a percentage (21.5, not 0.215).
pub fn format_percentage(percentage: Decimal) -> String {
    let mut rounded =
        percentage.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(1);
    format!("{rounded}%")
}

/// Formats a bracket as an income range with its marginal rate:
/// `20 000 € - 40 000 € (6.5%)`, or `70 001 €+ (17.5%)` for the unbounded
/// tail.
pub fn format_bracket(bracket: &TaxBracket) -> String {
    let rate = format_percentage(bracket.rate * Decimal::ONE_HUNDRED);
    match bracket.max_income {
        Some(max) => format!(
            "{} - {} ({})",
            format_currency(bracket.min_income),
            format_currency(max),
            rate
        ),
        None => format!("{}+ ({})", format_currency(bracket.min_income), rate),
    }
}
