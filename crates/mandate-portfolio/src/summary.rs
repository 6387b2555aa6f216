//! Portfolio summary and allocation-limit alerts.

use std::collections::BTreeMap;

use mandate_core::format::{format_millions, format_percent};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::{AssetClass, Holding};

/// Sum of holding weights per asset class.
///
/// Every class is present, with zero for classes the portfolio does not hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetAllocation(BTreeMap<AssetClass, Decimal>);

impl AssetAllocation {
    /// Weight allocated to `class`, in percent points.
    #[must_use]
    pub fn get(&self, class: AssetClass) -> Decimal {
        self.0.get(&class).copied().unwrap_or(Decimal::ZERO)
    }

    /// Iterates classes in display order with their weight.
    pub fn iter(&self) -> impl Iterator<Item = (AssetClass, Decimal)> + '_ {
        AssetClass::ALL.into_iter().map(|c| (c, self.get(c)))
    }
}

/// Derived totals for one portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    /// Portfolio id.
    pub portfolio_id: String,
    /// Portfolio display name.
    pub portfolio_name: String,
    /// Number of holdings.
    pub holdings_count: usize,
    /// Total assets under management (sum of position sizes).
    pub total_aum: Decimal,
    /// Weight by asset class.
    pub allocation: AssetAllocation,
}

impl PortfolioSummary {
    /// Computes the summary of a portfolio's holdings.
    ///
    /// Weights are summed as given; they are not required to add up to 100.
    #[must_use]
    pub fn calculate(portfolio_id: &str, holdings: &[Holding]) -> Self {
        let mut allocation: BTreeMap<AssetClass, Decimal> =
            AssetClass::ALL.into_iter().map(|c| (c, Decimal::ZERO)).collect();
        let mut total_aum = Decimal::ZERO;

        for holding in holdings {
            total_aum += holding.position_size;
            *allocation.entry(holding.asset_class).or_default() += holding.weight;
        }

        let portfolio_name = holdings
            .first()
            .map(|h| h.portfolio_name.clone())
            .unwrap_or_else(|| format!("Portfolio {portfolio_id}"));

        debug!(portfolio_id, holdings = holdings.len(), %total_aum, "Calculated portfolio summary");

        Self {
            portfolio_id: portfolio_id.to_string(),
            portfolio_name,
            holdings_count: holdings.len(),
            total_aum,
            allocation: AssetAllocation(allocation),
        }
    }

    /// AUM tile text, e.g. `$10.03M`.
    #[must_use]
    pub fn aum_display(&self) -> String {
        format_millions(self.total_aum)
    }

    /// Allocation tile text for one class, e.g. `45.0%`.
    #[must_use]
    pub fn allocation_display(&self, class: AssetClass) -> String {
        format_percent(self.allocation.get(class), 1)
    }

    /// Checks the allocation against upper limits.
    #[must_use]
    pub fn alerts(&self, limits: &AllocationLimits) -> Vec<AllocationAlert> {
        limits
            .iter()
            .filter_map(|(class, limit)| {
                let current = self.allocation.get(class);
                (current > limit).then_some(AllocationAlert {
                    asset_class: class,
                    current,
                    limit,
                })
            })
            .collect()
    }
}

/// Upper allocation limits per asset class, in percent points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationLimits(BTreeMap<AssetClass, Decimal>);

impl Default for AllocationLimits {
    /// Equity at most 40%, cash at most 10%.
    fn default() -> Self {
        Self::none()
            .with_limit(AssetClass::Equity, dec!(40))
            .with_limit(AssetClass::Cash, dec!(10))
    }
}

impl AllocationLimits {
    /// No limits at all.
    #[must_use]
    pub fn none() -> Self {
        Self(BTreeMap::new())
    }

    /// Sets the limit for one class.
    #[must_use]
    pub fn with_limit(mut self, class: AssetClass, limit: Decimal) -> Self {
        self.0.insert(class, limit);
        self
    }

    /// Limit for one class, if any.
    #[must_use]
    pub fn get(&self, class: AssetClass) -> Option<Decimal> {
        self.0.get(&class).copied()
    }

    /// Iterates the configured limits.
    pub fn iter(&self) -> impl Iterator<Item = (AssetClass, Decimal)> + '_ {
        self.0.iter().map(|(c, l)| (*c, *l))
    }
}

/// An asset class whose allocation exceeds its limit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationAlert {
    /// The breaching class.
    pub asset_class: AssetClass,
    /// Current allocation.
    pub current: Decimal,
    /// Configured limit.
    pub limit: Decimal,
}

impl AllocationAlert {
    /// Alert text, e.g. `Current equity allocation (45.0%) exceeds the 40% limit`.
    #[must_use]
    pub fn message(&self) -> String {
        format!(
            "Current {} allocation ({}) exceeds the {}% limit",
            self.asset_class.label().to_lowercase(),
            format_percent(self.current, 1),
            self.limit.normalize()
        )
    }
}
