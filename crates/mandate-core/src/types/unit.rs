//! Explicit units for numeric compliance values.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;
use crate::format::{
    format_currency, format_fraction_as_percent, format_percent, format_plain, group_thousands,
};

/// Unit of a breach value or rule threshold.
///
/// Values without a unit tag are rendered as plain numbers; the magnitude of a
/// value never decides whether it is a currency amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ValueUnit {
    /// Currency amount in the portfolio base currency.
    Currency,
    /// Percent points (`1.7` is 1.7%).
    Percent,
    /// Fraction of a whole (`0.123` is 12.3%).
    Fraction,
    /// Basis points.
    BasisPoints,
    /// Whole count (positions, issuers).
    Count,
    /// Dimensionless number.
    #[default]
    Number,
}

impl ValueUnit {
    /// Formats a value in this unit.
    #[must_use]
    pub fn format(&self, value: Decimal) -> String {
        match self {
            ValueUnit::Currency => format_currency(value),
            ValueUnit::Percent => format_percent(value, 2),
            ValueUnit::Fraction => format_fraction_as_percent(value, 2),
            ValueUnit::BasisPoints => format!("{} bps", group_thousands(value)),
            ValueUnit::Count => format!("{:.0}", value.round()),
            ValueUnit::Number => format_plain(value),
        }
    }

    /// Formats a value with an optional unit tag; untagged values are plain numbers.
    #[must_use]
    pub fn format_tagged(unit: Option<ValueUnit>, value: Decimal) -> String {
        unit.unwrap_or_default().format(value)
    }

    /// Returns the wire name of the unit.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueUnit::Currency => "currency",
            ValueUnit::Percent => "percent",
            ValueUnit::Fraction => "fraction",
            ValueUnit::BasisPoints => "basis_points",
            ValueUnit::Count => "count",
            ValueUnit::Number => "number",
        }
    }
}

impl fmt::Display for ValueUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValueUnit {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "currency" | "usd" => Ok(ValueUnit::Currency),
            "percent" | "pct" | "%" => Ok(ValueUnit::Percent),
            "fraction" | "ratio" => Ok(ValueUnit::Fraction),
            "basis_points" | "bps" | "bp" => Ok(ValueUnit::BasisPoints),
            "count" => Ok(ValueUnit::Count),
            "number" => Ok(ValueUnit::Number),
            _ => Err(CoreError::unknown("value unit", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_by_unit() {
        assert_eq!(ValueUnit::Currency.format(dec!(1000000)), "$1,000,000");
        assert_eq!(ValueUnit::Percent.format(dec!(1.7)), "1.70%");
        assert_eq!(ValueUnit::Fraction.format(dec!(0.023)), "2.30%");
        assert_eq!(ValueUnit::BasisPoints.format(dec!(150)), "150 bps");
        assert_eq!(ValueUnit::Count.format(dec!(3)), "3");
        assert_eq!(ValueUnit::Number.format(dec!(0.6)), "0.60");
    }

    #[test]
    fn test_untagged_large_values_are_not_currency() {
        assert_eq!(ValueUnit::format_tagged(None, dec!(700000)), "700000.00");
        assert_eq!(
            ValueUnit::format_tagged(Some(ValueUnit::Currency), dec!(700000)),
            "$700,000"
        );
    }

    #[test]
    fn test_parse() {
        assert_eq!("bps".parse::<ValueUnit>().unwrap(), ValueUnit::BasisPoints);
        assert_eq!(" Fraction ".parse::<ValueUnit>().unwrap(), ValueUnit::Fraction);
        assert!("furlongs".parse::<ValueUnit>().is_err());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&ValueUnit::BasisPoints).unwrap();
        assert_eq!(json, "\"basis_points\"");
        let unit: ValueUnit = serde_json::from_str("\"currency\"").unwrap();
        assert_eq!(unit, ValueUnit::Currency);
    }
}
