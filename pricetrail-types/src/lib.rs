//! Error and configuration primitives shared by every pricetrail crate.
#![warn(missing_docs)]

mod config;
mod error;

pub use config::{
    AnalysisConfig, ChangeWindow, DuplicateDatePolicy, KeyEncoding, PriceChangeMode,
    PricetrailConfig,
};
pub use error::{PricetrailError, Result};
