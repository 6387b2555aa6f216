//! # Mandate Guidelines
//!
//! The rules library and guideline version comparison views.
//!
//! ## Example
//!
//! ```rust
//! use mandate_guidelines::prelude::*;
//!
//! let library = RulesLibrary::sample();
//! let visible = library.filter("cash");
//! assert_eq!(library.count_label(visible.len()), "Showing 1 of 5 rules");
//! assert_eq!(RuleRow::from_rule(visible[0]).threshold, "10.00%");
//! ```
//!
//! ## Module Overview
//!
//! - [`library`] - Rules library, search and CSV export
//! - [`comparison`] - Simulated version comparison

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod comparison;
pub mod error;
pub mod library;

pub use error::{GuidelineError, GuidelineResult};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::comparison::{
        ComparisonState, VersionComparison, VersionDiff, DEFAULT_COMPARISON_DELAY,
        GUIDELINE_VERSIONS,
    };
    pub use crate::error::{GuidelineError, GuidelineResult, Side};
    pub use crate::library::{
        rules_csv_string, sample_rules, write_rules_csv, RuleRow, RulesLibrary, RULES_EXPORT_FILENAME,
        RULES_HEADER,
    };
}
