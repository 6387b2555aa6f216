//! Portfolio domain types.

mod asset_class;
mod holding;

pub use asset_class::AssetClass;
pub use holding::{Holding, HoldingBuilder};
