//! Security-level positions.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::AssetClass;

/// A single position in a portfolio.
///
/// Holdings are fixture data: they are filtered and ordered for display but
/// never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    /// Unique identifier for this position.
    pub id: String,

    /// Owning portfolio id (e.g. `ABC`).
    pub portfolio_id: String,

    /// Owning portfolio display name.
    pub portfolio_name: String,

    /// Security name.
    pub security_name: String,

    /// Ticker or bond short code.
    pub ticker: String,

    /// ISIN.
    pub isin: String,

    /// Asset class.
    pub asset_class: AssetClass,

    /// Market value of the position in base currency.
    pub position_size: Decimal,

    /// Weight in percent points (8.5 means 8.5%).
    pub weight: Decimal,

    /// Credit rating, for rated instruments.
    #[serde(default)]
    pub rating: Option<String>,

    /// Country of risk.
    pub country: String,

    /// Region.
    pub region: String,

    /// Sector.
    pub sector: String,
}

impl Holding {
    /// Creates a new holding builder.
    #[must_use]
    pub fn builder() -> HoldingBuilder {
        HoldingBuilder::new()
    }

    /// Returns true when the security name, ticker or sector contains
    /// `needle_lower`, which must already be lower-cased.
    #[must_use]
    pub fn matches_search(&self, needle_lower: &str) -> bool {
        needle_lower.is_empty()
            || self.security_name.to_lowercase().contains(needle_lower)
            || self.ticker.to_lowercase().contains(needle_lower)
            || self.sector.to_lowercase().contains(needle_lower)
    }

    /// Width of the weight bar in percent: ten times the weight, capped at 100.
    #[must_use]
    pub fn weight_bar_pct(&self) -> Decimal {
        (self.weight * dec!(10)).min(Decimal::ONE_HUNDRED)
    }

    /// Rating, or `-` for unrated instruments.
    #[must_use]
    pub fn rating_display(&self) -> &str {
        self.rating.as_deref().unwrap_or("-")
    }
}

/// Builder for constructing a Holding.
#[derive(Debug, Clone, Default)]
pub struct HoldingBuilder {
    id: Option<String>,
    portfolio_id: Option<String>,
    portfolio_name: Option<String>,
    security_name: Option<String>,
    ticker: Option<String>,
    isin: Option<String>,
    asset_class: Option<AssetClass>,
    position_size: Option<Decimal>,
    weight: Option<Decimal>,
    rating: Option<String>,
    country: String,
    region: String,
    sector: String,
}

impl HoldingBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the holding ID.
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the portfolio id; the name defaults to `Portfolio <id>`.
    #[must_use]
    pub fn portfolio(mut self, portfolio_id: impl Into<String>) -> Self {
        self.portfolio_id = Some(portfolio_id.into());
        self
    }

    /// Overrides the portfolio display name.
    #[must_use]
    pub fn portfolio_name(mut self, name: impl Into<String>) -> Self {
        self.portfolio_name = Some(name.into());
        self
    }

    /// Sets the security name and ticker.
    #[must_use]
    pub fn security(mut self, name: impl Into<String>, ticker: impl Into<String>) -> Self {
        self.security_name = Some(name.into());
        self.ticker = Some(ticker.into());
        self
    }

    /// Sets the ISIN.
    #[must_use]
    pub fn isin(mut self, isin: impl Into<String>) -> Self {
        self.isin = Some(isin.into());
        self
    }

    /// Sets the asset class.
    #[must_use]
    pub fn asset_class(mut self, asset_class: AssetClass) -> Self {
        self.asset_class = Some(asset_class);
        self
    }

    /// Sets the position size.
    #[must_use]
    pub fn position_size(mut self, size: Decimal) -> Self {
        self.position_size = Some(size);
        self
    }

    /// Sets the weight in percent points.
    #[must_use]
    pub fn weight(mut self, weight: Decimal) -> Self {
        self.weight = Some(weight);
        self
    }

    /// Sets the credit rating.
    #[must_use]
    pub fn rating(mut self, rating: impl Into<String>) -> Self {
        self.rating = Some(rating.into());
        self
    }

    /// Sets country, region and sector.
    #[must_use]
    pub fn location(
        mut self,
        country: impl Into<String>,
        region: impl Into<String>,
        sector: impl Into<String>,
    ) -> Self {
        self.country = country.into();
        self.region = region.into();
        self.sector = sector.into();
        self
    }

    /// Builds the holding.
    ///
    /// # Errors
    ///
    /// Returns an error if required fields are missing or amounts are negative.
    pub fn build(self) -> crate::PortfolioResult<Holding> {
        let id = self
            .id
            .ok_or_else(|| crate::PortfolioError::missing_field("id"))?;

        let portfolio_id = self
            .portfolio_id
            .ok_or_else(|| crate::PortfolioError::missing_field("portfolio_id"))?;

        let security_name = self
            .security_name
            .ok_or_else(|| crate::PortfolioError::missing_field("security_name"))?;

        let asset_class = self
            .asset_class
            .ok_or_else(|| crate::PortfolioError::missing_field("asset_class"))?;

        let position_size = self
            .position_size
            .ok_or_else(|| crate::PortfolioError::missing_field("position_size"))?;

        let weight = self
            .weight
            .ok_or_else(|| crate::PortfolioError::missing_field("weight"))?;

        if position_size < Decimal::ZERO {
            return Err(crate::PortfolioError::invalid_holding(
                &id,
                "position_size cannot be negative",
            ));
        }

        if weight < Decimal::ZERO {
            return Err(crate::PortfolioError::invalid_holding(
                &id,
                "weight cannot be negative",
            ));
        }

        let portfolio_name = self
            .portfolio_name
            .unwrap_or_else(|| format!("Portfolio {portfolio_id}"));

        Ok(Holding {
            id,
            portfolio_id,
            portfolio_name,
            security_name,
            ticker: self.ticker.unwrap_or_default(),
            isin: self.isin.unwrap_or_default(),
            asset_class,
            position_size,
            weight,
            rating: self.rating.filter(|r| !r.trim().is_empty()),
            country: self.country,
            region: self.region,
            sector: self.sector,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_holding() -> Holding {
        Holding::builder()
            .id("9")
            .portfolio("ABC")
            .security("US Treasury 10Y", "T 2.5 05/15/2034")
            .isin("US912810TW65")
            .asset_class(AssetClass::FixedIncome)
            .position_size(dec!(900000))
            .weight(dec!(9.0))
            .rating("AAA")
            .location("United States", "North America", "Government")
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_defaults_portfolio_name() {
        let holding = create_test_holding();
        assert_eq!(holding.portfolio_name, "Portfolio ABC");
        assert_eq!(holding.rating_display(), "AAA");
    }

    #[test]
    fn test_matches_search_fields() {
        let holding = create_test_holding();
        assert!(holding.matches_search("treasury"));
        assert!(holding.matches_search("2034"));
        assert!(holding.matches_search("govern"));
        assert!(holding.matches_search(""));
        // ISIN and country are not searched
        assert!(!holding.matches_search("us912810"));
        assert!(!holding.matches_search("united"));
    }

    #[test]
    fn test_weight_bar_is_capped() {
        let holding = create_test_holding();
        assert_eq!(holding.weight_bar_pct(), dec!(90));

        let heavy = Holding {
            weight: dec!(25),
            ..holding
        };
        assert_eq!(heavy.weight_bar_pct(), dec!(100));
    }

    #[test]
    fn test_builder_validation() {
        let result = Holding::builder()
            .id("X")
            .portfolio("ABC")
            .security("Short", "SHRT")
            .asset_class(AssetClass::Equity)
            .position_size(dec!(-1))
            .weight(dec!(1))
            .build();
        assert!(result.is_err());

        let result = Holding::builder().id("X").build();
        assert!(matches!(
            result,
            Err(crate::PortfolioError::MissingField { .. })
        ));
    }

    #[test]
    fn test_blank_rating_is_none() {
        let holding = Holding::builder()
            .id("1")
            .portfolio("ABC")
            .security("Apple Inc", "AAPL")
            .asset_class(AssetClass::Equity)
            .position_size(dec!(850000))
            .weight(dec!(8.5))
            .rating("  ")
            .build()
            .unwrap();
        assert_eq!(holding.rating, None);
        assert_eq!(holding.rating_display(), "-");
    }
}
