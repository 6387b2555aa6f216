//! Search, asset-class filter and column sort for the holdings table.
//!
//! A [`HoldingsQuery`] is the complete view state of the holdings table. It
//! never mutates holdings; [`HoldingsQuery::apply`] returns the visible,
//! ordered subset as borrowed references.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use mandate_core::CoreError;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::{AssetClass, Holding};

// =============================================================================
// FILTER
// =============================================================================

/// Asset-class filter of the holdings table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AssetClassFilter {
    /// Every asset class passes.
    #[default]
    All,
    /// Only the given asset class passes.
    Only(AssetClass),
}

impl AssetClassFilter {
    /// Returns true when `class` passes the filter.
    #[must_use]
    pub fn admits(&self, class: AssetClass) -> bool {
        match self {
            AssetClassFilter::All => true,
            AssetClassFilter::Only(only) => *only == class,
        }
    }
}

impl FromStr for AssetClassFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(AssetClassFilter::All)
        } else {
            s.parse().map(AssetClassFilter::Only)
        }
    }
}

impl fmt::Display for AssetClassFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetClassFilter::All => f.write_str("All Asset Classes"),
            AssetClassFilter::Only(class) => write!(f, "{class}"),
        }
    }
}

// =============================================================================
// SORT
// =============================================================================

/// Sortable holdings column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortColumn {
    /// Security name.
    SecurityName,
    /// Ticker.
    Ticker,
    /// Asset class label.
    AssetClass,
    /// Position size.
    PositionSize,
    /// Weight.
    #[default]
    Weight,
    /// Credit rating; unrated holdings sort first when ascending.
    Rating,
    /// Sector.
    Sector,
}

impl SortColumn {
    /// All columns in table order.
    pub const ALL: [SortColumn; 7] = [
        SortColumn::SecurityName,
        SortColumn::Ticker,
        SortColumn::AssetClass,
        SortColumn::PositionSize,
        SortColumn::Weight,
        SortColumn::Rating,
        SortColumn::Sector,
    ];

    /// True for columns compared as numbers.
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(self, SortColumn::PositionSize | SortColumn::Weight)
    }

    /// Returns the column key used on the command line.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            SortColumn::SecurityName => "security_name",
            SortColumn::Ticker => "ticker",
            SortColumn::AssetClass => "asset_class",
            SortColumn::PositionSize => "position_size",
            SortColumn::Weight => "weight",
            SortColumn::Rating => "rating",
            SortColumn::Sector => "sector",
        }
    }

    /// Ascending comparison of two holdings on this column.
    fn compare(&self, a: &Holding, b: &Holding) -> Ordering {
        match self {
            SortColumn::SecurityName => cmp_text(&a.security_name, &b.security_name),
            SortColumn::Ticker => cmp_text(&a.ticker, &b.ticker),
            SortColumn::AssetClass => cmp_text(a.asset_class.label(), b.asset_class.label()),
            SortColumn::PositionSize => a.position_size.cmp(&b.position_size),
            SortColumn::Weight => a.weight.cmp(&b.weight),
            SortColumn::Rating => match (&a.rating, &b.rating) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Less,
                (Some(_), None) => Ordering::Greater,
                (Some(x), Some(y)) => cmp_text(x, y),
            },
            SortColumn::Sector => cmp_text(&a.sector, &b.sector),
        }
    }
}

fn cmp_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

impl FromStr for SortColumn {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace(['-', ' '], "_");
        match key.as_str() {
            "security_name" | "name" | "security" => Ok(SortColumn::SecurityName),
            "ticker" => Ok(SortColumn::Ticker),
            "asset_class" | "class" => Ok(SortColumn::AssetClass),
            "position_size" | "position" | "size" => Ok(SortColumn::PositionSize),
            "weight" => Ok(SortColumn::Weight),
            "rating" => Ok(SortColumn::Rating),
            "sector" => Ok(SortColumn::Sector),
            _ => Err(CoreError::unknown("sort column", s)),
        }
    }
}

impl fmt::Display for SortColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest first.
    Ascending,
    /// Largest first.
    #[default]
    Descending,
}

impl SortDirection {
    /// Returns the opposite direction.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

impl FromStr for SortDirection {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            _ => Err(CoreError::unknown("sort direction", s)),
        }
    }
}

/// Active sort column and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortState {
    /// Column being sorted.
    pub column: SortColumn,
    /// Direction.
    pub direction: SortDirection,
}

impl SortState {
    /// Creates a sort state.
    #[must_use]
    pub fn new(column: SortColumn, direction: SortDirection) -> Self {
        Self { column, direction }
    }

    /// Handles a click on a column header.
    ///
    /// The same column flips the direction; a different column becomes the
    /// sort column with descending order.
    pub fn toggle(&mut self, column: SortColumn) {
        if self.column == column {
            self.direction = self.direction.toggled();
        } else {
            self.column = column;
            self.direction = SortDirection::Descending;
        }
    }

    fn compare(&self, a: &Holding, b: &Holding) -> Ordering {
        let ord = self.column.compare(a, b);
        match self.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    }
}

// =============================================================================
// QUERY
// =============================================================================

/// View state of the holdings table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HoldingsQuery {
    /// Free-text search over security name, ticker and sector.
    pub search: String,
    /// Asset-class filter.
    pub asset_class: AssetClassFilter,
    /// Sort column and direction.
    pub sort: SortState,
}

impl HoldingsQuery {
    /// Creates the default query: no search, all classes, weight descending.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the search term.
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Sets the asset-class filter.
    #[must_use]
    pub fn with_asset_class(mut self, filter: AssetClassFilter) -> Self {
        self.asset_class = filter;
        self
    }

    /// Sets the sort state.
    #[must_use]
    pub fn with_sort(mut self, column: SortColumn, direction: SortDirection) -> Self {
        self.sort = SortState::new(column, direction);
        self
    }

    /// Returns true when a holding passes both the search and the class filter.
    #[must_use]
    pub fn matches(&self, holding: &Holding) -> bool {
        holding.matches_search(&self.search.to_lowercase())
            && self.asset_class.admits(holding.asset_class)
    }

    /// Returns the visible holdings in display order.
    ///
    /// The sort is stable: holdings that compare equal keep their input order.
    #[must_use]
    pub fn apply<'a>(&self, holdings: &'a [Holding]) -> Vec<&'a Holding> {
        let needle = self.search.to_lowercase();
        let mut visible: Vec<&Holding> = holdings
            .iter()
            .filter(|h| h.matches_search(&needle) && self.asset_class.admits(h.asset_class))
            .collect();
        visible.sort_by(|a, b| self.sort.compare(a, b));

        debug!(
            search = %self.search,
            filter = %self.asset_class,
            column = %self.sort.column,
            total = holdings.len(),
            visible = visible.len(),
            "Applied holdings query"
        );
        visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::sample_holdings;

    fn abc() -> Vec<Holding> {
        sample_holdings()
            .into_iter()
            .filter(|h| h.portfolio_id == "ABC")
            .collect()
    }

    #[test]
    fn test_default_is_weight_descending() {
        let holdings = abc();
        let visible = HoldingsQuery::new().apply(&holdings);
        assert_eq!(visible.len(), 16);
        assert_eq!(visible[0].ticker, "CASH");
        assert_eq!(visible[1].ticker, "T 2.5 05/15/2034");
        assert_eq!(visible[15].ticker, "JPM");
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let holdings = abc();
        let visible = HoldingsQuery::new().with_search("TECH").apply(&holdings);
        let tickers: Vec<&str> = visible.iter().map(|h| h.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["AAPL", "MSFT", "GOOGL", "NVDA"]);
    }

    #[test]
    fn test_filter_and_search_combine() {
        let holdings = abc();
        let visible = HoldingsQuery::new()
            .with_search("financials")
            .with_asset_class(AssetClassFilter::Only(AssetClass::FixedIncome))
            .apply(&holdings);
        let tickers: Vec<&str> = visible.iter().map(|h| h.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["GS2625-31", "MS4-30"]);
    }

    #[test]
    fn test_no_match_is_empty() {
        let holdings = abc();
        let visible = HoldingsQuery::new().with_search("zzz").apply(&holdings);
        assert!(visible.is_empty());
    }

    #[test]
    fn test_rating_ascending_puts_unrated_first() {
        let holdings = abc();
        let visible = HoldingsQuery::new()
            .with_sort(SortColumn::Rating, SortDirection::Ascending)
            .apply(&holdings);
        assert!(visible[..11].iter().all(|h| h.rating.is_none()));
        let rated: Vec<&str> = visible[11..]
            .iter()
            .map(|h| h.rating_display())
            .collect();
        assert_eq!(rated, vec!["A", "A-", "AAA", "AAA", "BBB"]);
    }

    #[test]
    fn test_text_sort_is_stable() {
        let holdings = abc();
        let visible = HoldingsQuery::new()
            .with_sort(SortColumn::AssetClass, SortDirection::Ascending)
            .apply(&holdings);
        // Alternatives first, in input order
        assert_eq!(visible[0].ticker, "BREP");
        assert_eq!(visible[1].ticker, "KKRI");
        assert_eq!(visible[2].ticker, "CASH");
        assert_eq!(visible[3].ticker, "AAPL");
    }

    #[test]
    fn test_toggle() {
        let mut sort = SortState::default();
        sort.toggle(SortColumn::Weight);
        assert_eq!(sort.direction, SortDirection::Ascending);
        sort.toggle(SortColumn::Weight);
        assert_eq!(sort.direction, SortDirection::Descending);

        sort.toggle(SortColumn::Ticker);
        assert_eq!(sort, SortState::new(SortColumn::Ticker, SortDirection::Descending));
        sort.toggle(SortColumn::Ticker);
        sort.toggle(SortColumn::Sector);
        assert_eq!(sort.direction, SortDirection::Descending);
    }

    #[test]
    fn test_parse_keys() {
        assert_eq!("all".parse::<AssetClassFilter>().unwrap(), AssetClassFilter::All);
        assert_eq!(
            "cash".parse::<AssetClassFilter>().unwrap(),
            AssetClassFilter::Only(AssetClass::Cash)
        );
        assert_eq!("position-size".parse::<SortColumn>().unwrap(), SortColumn::PositionSize);
        assert_eq!("asc".parse::<SortDirection>().unwrap(), SortDirection::Ascending);
        assert!("volume".parse::<SortColumn>().is_err());
        for column in SortColumn::ALL {
            assert_eq!(column.as_str().parse::<SortColumn>().unwrap(), column);
        }
    }
}
