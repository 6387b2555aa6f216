//! # Mandate Dashboard
//!
//! View models for the compliance dashboard.
//!
//! A [`ComplianceDashboard`](mandate_core::types::ComplianceDashboard) payload
//! comes back from the coordinator agent; this crate derives the headline
//! tiles, the score gauge, the breach table and the remediation listing from
//! it. Nothing here renders: terminal and web front ends both consume these
//! structs.
//!
//! ## Example
//!
//! ```rust
//! use mandate_dashboard::prelude::*;
//!
//! let view = DashboardView::build(&sample_dashboard());
//! assert_eq!(view.tile("Compliance Score").unwrap().value, "85%");
//! assert_eq!(view.status.gauge.band, ScoreBand::Yellow);
//! assert_eq!(view.breaches[2].current, "$700,000");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod check_result;
pub mod error;
pub mod fixtures;
pub mod gauge;
pub mod load;
pub mod view;

pub use error::{DashboardError, DashboardResult};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::check_result::{
        CheckResultBody, CheckResultView, CompactBreachRow, CompactDashboard,
    };
    pub use crate::error::{DashboardError, DashboardResult};
    pub use crate::fixtures::sample_dashboard;
    pub use crate::gauge::{ScoreBand, ScoreGauge, GAUGE_RADIUS};
    pub use crate::load::parse_dashboard;
    pub use crate::view::{
        excerpt, AmbiguousRulesAlert, BreachRow, DashboardView, RemediationItem, StatusPanel,
        SummaryTile, EMPTY_STATE_HINT, EMPTY_STATE_TITLE,
    };
}
