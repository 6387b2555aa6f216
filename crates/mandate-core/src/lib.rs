//! # Mandate Core
//!
//! Core types, display rules and abstractions shared by the Mandate
//! compliance workbench.
//!
//! This crate provides the foundational building blocks used by every view:
//!
//! - **Types**: compliance payloads (`ComplianceDashboard`, `BreachDetail`),
//!   extracted guideline rules, and explicit value units
//! - **Formatting**: currency, percentage and plain-number display helpers
//! - **Badges**: exhaustive mappings from closed enumerations (severity,
//!   priority, status) to display labels and tones
//!
//! ## Example
//!
//! ```rust
//! use mandate_core::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! assert_eq!(format_currency(dec!(700000)), "$700,000");
//! assert_eq!(ValueUnit::Fraction.format(dec!(0.123)), "12.30%");
//! assert_eq!(Severity::HardBreach.badge().label, "Hard Breach");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod badge;
pub mod error;
pub mod format;
pub mod types;

pub use error::{CoreError, CoreResult};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::badge::{Badge, Tone, ToBadge};
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::format::{
        format_currency, format_fraction_as_percent, format_millions, format_percent,
        format_plain, group_thousands,
    };
    pub use crate::types::{
        BreachDetail, ComplianceDashboard, ComplianceSummary, CoordinatorResult,
        ExtractedRule, ExtractedRulesSummary, OverallStatus, Priority, RemediationSummary,
        RuleExtractionResult, Severity, ValueUnit, WorkflowExecution,
    };
}
