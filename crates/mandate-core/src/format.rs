//! Display formatting for monetary and percentage values.
//!
//! Every helper takes a [`Decimal`] and returns the exact text a view shows.
//! Rounding is always half away from zero, matching what a reader expects
//! from a dashboard.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

fn round(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Groups the integer digits of `|value|` in thousands.
///
/// The fractional part is rounded to at most two places and trailing zeros are
/// dropped, so `1234.50` becomes `1,234.5` and `850000` becomes `850,000`.
pub fn group_thousands(value: Decimal) -> String {
    let text = round(value.abs(), 2).normalize().to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (text.as_str(), None),
    };

    let digits = int_part.len();
    let mut grouped = String::with_capacity(digits + digits / 3 + 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (digits - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }
    grouped
}

/// Formats a currency amount: `$1,000,000`, `-$2,500.5`.
pub fn format_currency(value: Decimal) -> String {
    let sign = if value.is_sign_negative() && !value.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}${}", group_thousands(value))
}

/// Formats an amount in millions with two decimals: `$10.03M`.
pub fn format_millions(value: Decimal) -> String {
    format!("${:.2}M", round(value / dec!(1000000), 2))
}

/// Formats a value already expressed in percent points: `45.0%`.
pub fn format_percent(value: Decimal, dp: u32) -> String {
    format!("{:.*}%", dp as usize, round(value, dp))
}

/// Formats a fraction as a percentage: `0.123` becomes `12.30%` at two places.
pub fn format_fraction_as_percent(value: Decimal, dp: u32) -> String {
    format_percent(value * Decimal::ONE_HUNDRED, dp)
}

/// Formats a plain number with two decimals.
pub fn format_plain(value: Decimal) -> String {
    format!("{:.2}", round(value, 2))
}
