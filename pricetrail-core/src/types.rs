//! Re-export of shared types from `pricetrail-types`.
// Consolidated re-exports so downstream crates can depend on `pricetrail-core` only

pub use pricetrail_types::{
    AnalysisConfig, ChangeWindow, DuplicateDatePolicy, KeyEncoding, PriceChangeMode,
    PricetrailConfig, PricetrailError, Result,
};

pub use chrono::NaiveDate;
pub use rust_decimal::Decimal;
