//! Asset classes used by the holdings table.

use mandate_core::badge::{Badge, ToBadge, Tone};
use mandate_core::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Broad asset class of a holding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AssetClass {
    /// Listed equities.
    Equity,
    /// Bonds and other fixed income.
    #[serde(rename = "Fixed Income")]
    FixedIncome,
    /// Funds, real estate, infrastructure, private credit.
    Alternatives,
    /// Cash and equivalents.
    Cash,
}

impl AssetClass {
    /// All asset classes in display order.
    pub const ALL: [AssetClass; 4] = [
        AssetClass::Equity,
        AssetClass::FixedIncome,
        AssetClass::Alternatives,
        AssetClass::Cash,
    ];

    /// Returns the display label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            AssetClass::Equity => "Equity",
            AssetClass::FixedIncome => "Fixed Income",
            AssetClass::Alternatives => "Alternatives",
            AssetClass::Cash => "Cash",
        }
    }
}

impl ToBadge for AssetClass {
    fn badge(&self) -> Badge {
        match self {
            AssetClass::Equity => Badge::new("Equity", Tone::Info),
            AssetClass::FixedIncome => Badge::new("Fixed Income", Tone::Positive),
            AssetClass::Alternatives => Badge::new("Alternatives", Tone::Accent),
            AssetClass::Cash => Badge::new("Cash", Tone::Neutral),
        }
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AssetClass {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', '_'], " ").as_str() {
            "equity" | "equities" => Ok(AssetClass::Equity),
            "fixed income" | "fi" | "bonds" => Ok(AssetClass::FixedIncome),
            "alternatives" | "alts" => Ok(AssetClass::Alternatives),
            "cash" => Ok(AssetClass::Cash),
            _ => Err(CoreError::unknown("asset class", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_variants() {
        assert_eq!("Fixed Income".parse::<AssetClass>().unwrap(), AssetClass::FixedIncome);
        assert_eq!("fixed-income".parse::<AssetClass>().unwrap(), AssetClass::FixedIncome);
        assert_eq!("EQUITY".parse::<AssetClass>().unwrap(), AssetClass::Equity);
        assert!("crypto".parse::<AssetClass>().is_err());
    }

    #[test]
    fn test_display_matches_label() {
        for class in AssetClass::ALL {
            assert_eq!(class.to_string(), class.label());
            assert_eq!(class.label().parse::<AssetClass>().unwrap(), class);
        }
    }

    #[test]
    fn test_badges() {
        assert_eq!(AssetClass::Alternatives.badge().tone, Tone::Accent);
        assert_eq!(AssetClass::Cash.badge().label, "Cash");
    }
}
