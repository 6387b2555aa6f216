//! # Mandate Portfolio
//!
//! Portfolio holdings browsing for compliance review.
//!
//! This crate backs the portfolio database view: it holds read-only
//! security-level positions, narrows and orders them for the holdings table,
//! and derives the summary tiles shown above it.
//!
//! ## Design Philosophy
//!
//! - **Immutable holdings**: views filter and order references, never copies
//! - **Exact amounts**: position sizes and weights are `Decimal`
//! - **Explicit ordering**: text columns compare case-insensitively, numbers
//!   numerically, and every sort is stable
//!
//! ## Quick Start
//!
//! ```rust
//! use mandate_portfolio::prelude::*;
//!
//! let store = HoldingsStore::sample();
//! let query = HoldingsQuery::new()
//!     .with_search("treasury")
//!     .with_asset_class(AssetClassFilter::Only(AssetClass::FixedIncome));
//!
//! let visible = store.query("ABC", &query)?;
//! assert_eq!(visible.len(), 2);
//!
//! let summary = store.summary("ABC")?;
//! assert_eq!(summary.aum_display(), "$10.03M");
//! # Ok::<(), PortfolioError>(())
//! ```
//!
//! ## Module Overview
//!
//! - [`types`] - Holding and asset class
//! - [`query`] - Search, class filter and column sort
//! - [`summary`] - AUM, allocation and allocation-limit alerts
//! - [`store`] - Holdings grouped by portfolio (samples or CSV)
//! - [`export`] - CSV export of visible holdings
//! - [`fixtures`] - Bundled sample portfolios

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod export;
pub mod fixtures;
pub mod query;
pub mod store;
pub mod summary;
pub mod types;

pub use error::{PortfolioError, PortfolioResult};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{PortfolioError, PortfolioResult};
    pub use crate::export::{
        export_filename, holdings_csv_string, write_holdings_csv, HOLDINGS_HEADER,
    };
    pub use crate::query::{
        AssetClassFilter, HoldingsQuery, SortColumn, SortDirection, SortState,
    };
    pub use crate::store::{HoldingsStore, DEFAULT_PORTFOLIO};
    pub use crate::summary::{
        AllocationAlert, AllocationLimits, AssetAllocation, PortfolioSummary,
    };
    pub use crate::types::{AssetClass, Holding, HoldingBuilder};
}
