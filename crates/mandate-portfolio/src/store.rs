//! Holdings grouped by portfolio.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{PortfolioError, PortfolioResult};
use crate::fixtures::sample_holdings;
use crate::query::HoldingsQuery;
use crate::summary::PortfolioSummary;
use crate::types::{AssetClass, Holding};

/// Portfolio selected when none is given.
pub const DEFAULT_PORTFOLIO: &str = "ABC";

/// Read-only holdings keyed by portfolio id.
#[derive(Debug, Clone, Default)]
pub struct HoldingsStore {
    portfolios: BTreeMap<String, Vec<Holding>>,
}

impl HoldingsStore {
    /// Store with the bundled sample portfolios `ABC`, `XYZ` and `DEF`.
    #[must_use]
    pub fn sample() -> Self {
        Self::from_holdings(sample_holdings())
    }

    /// Groups holdings by portfolio id, keeping their input order.
    #[must_use]
    pub fn from_holdings(holdings: impl IntoIterator<Item = Holding>) -> Self {
        let mut portfolios: BTreeMap<String, Vec<Holding>> = BTreeMap::new();
        for holding in holdings {
            portfolios
                .entry(holding.portfolio_id.clone())
                .or_default()
                .push(holding);
        }
        Self { portfolios }
    }

    /// Loads holdings from a CSV file.
    ///
    /// The file needs a header row with the snake_case field names of
    /// [`Holding`]; `portfolio_name` and `rating` may be empty.
    pub fn from_csv_path(path: impl AsRef<Path>) -> PortfolioResult<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let store = Self::from_csv_reader(file)?;
        info!(
            path = %path.display(),
            portfolios = store.portfolios.len(),
            "Loaded holdings from CSV"
        );
        Ok(store)
    }

    /// Loads holdings from any CSV source.
    pub fn from_csv_reader<R: Read>(reader: R) -> PortfolioResult<Self> {
        let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let mut holdings = Vec::new();
        for record in reader.deserialize::<HoldingRecord>() {
            holdings.push(record?.into_holding()?);
        }
        Ok(Self::from_holdings(holdings))
    }

    /// Portfolio ids in sorted order.
    pub fn portfolio_ids(&self) -> impl Iterator<Item = &str> {
        self.portfolios.keys().map(String::as_str)
    }

    /// True when no portfolios are loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.portfolios.is_empty()
    }

    /// Holdings of one portfolio, in load order.
    pub fn holdings(&self, portfolio_id: &str) -> PortfolioResult<&[Holding]> {
        self.portfolios
            .get(portfolio_id)
            .map(Vec::as_slice)
            .ok_or_else(|| PortfolioError::unknown_portfolio(portfolio_id))
    }

    /// Summary of one portfolio.
    pub fn summary(&self, portfolio_id: &str) -> PortfolioResult<PortfolioSummary> {
        let holdings = self.holdings(portfolio_id)?;
        Ok(PortfolioSummary::calculate(portfolio_id, holdings))
    }

    /// Visible holdings of one portfolio under a query.
    pub fn query(
        &self,
        portfolio_id: &str,
        query: &HoldingsQuery,
    ) -> PortfolioResult<Vec<&Holding>> {
        debug!(portfolio_id, "Querying holdings");
        Ok(query.apply(self.holdings(portfolio_id)?))
    }
}

/// CSV row; numbers are kept as text and parsed exactly into `Decimal`.
#[derive(Debug, Deserialize)]
struct HoldingRecord {
    id: String,
    portfolio_id: String,
    #[serde(default)]
    portfolio_name: String,
    security_name: String,
    ticker: String,
    #[serde(default)]
    isin: String,
    asset_class: String,
    position_size: String,
    weight: String,
    #[serde(default)]
    rating: String,
    #[serde(default)]
    country: String,
    #[serde(default)]
    region: String,
    #[serde(default)]
    sector: String,
}

impl HoldingRecord {
    fn into_holding(self) -> PortfolioResult<Holding> {
        let invalid = |reason: String| PortfolioError::invalid_holding(&self.id, reason);

        let asset_class: AssetClass = self
            .asset_class
            .parse()
            .map_err(|e: mandate_core::CoreError| invalid(e.to_string()))?;
        let position_size: Decimal = self
            .position_size
            .parse()
            .map_err(|_| invalid(format!("bad position_size '{}'", self.position_size)))?;
        let weight: Decimal = self
            .weight
            .parse()
            .map_err(|_| invalid(format!("bad weight '{}'", self.weight)))?;

        let mut builder = Holding::builder()
            .id(&self.id)
            .portfolio(&self.portfolio_id)
            .security(&self.security_name, &self.ticker)
            .isin(&self.isin)
            .asset_class(asset_class)
            .position_size(position_size)
            .weight(weight)
            .rating(&self.rating)
            .location(&self.country, &self.region, &self.sector);
        if !self.portfolio_name.is_empty() {
            builder = builder.portfolio_name(&self.portfolio_name);
        }
        builder.build()
    }
}
