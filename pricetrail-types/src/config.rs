//! Configuration types shared across the orchestrator and the reconciliation core.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How to resolve two snapshots of one source that carry the same collection date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum DuplicateDatePolicy {
    /// The snapshot that appears later in the input replaces the earlier one.
    #[default]
    KeepLast,
    /// The first snapshot seen for a date is kept; later ones are dropped.
    KeepFirst,
    /// Fail with `PricetrailError::DuplicateDate`.
    Reject,
}

/// Product-key encoding used when writing a merged series.
///
/// Decoding accepts either form regardless of this setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum KeyEncoding {
    /// `items` is a JSON object keyed by `name` + separator + `category`.
    #[default]
    Joined,
    /// `items` is a JSON array of `{ key: {name, category}, deltas }` entries.
    Structured,
}

/// Which two samples of a product's history a price-change analysis compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum PriceChangeMode {
    /// Second-to-last sample versus last sample.
    #[default]
    LatestPair,
    /// First recorded sample versus last sample.
    FirstLast,
}

/// Recency filter applied to the latest sample of a price-change analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ChangeWindow {
    /// Only products whose latest sample is at most one day old.
    Daily,
    /// Only products whose latest sample is at most one day plus one week old.
    Weekly,
    /// No recency filter.
    #[default]
    All,
}

/// Tunables for the downstream analyses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// A product must have strictly more samples than this to be ranked as volatile.
    pub volatility_threshold: usize,
    /// Maximum number of rows kept per direction in a price-change report.
    pub max_items: usize,
    /// Sample pair compared by price-change analysis.
    pub change_mode: PriceChangeMode,
    /// Recency filter for price-change analysis.
    pub window: ChangeWindow,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            volatility_threshold: 3,
            max_items: 50,
            change_mode: PriceChangeMode::default(),
            window: ChangeWindow::default(),
        }
    }
}

/// Global configuration for the `Pricetrail` orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricetrailConfig {
    /// Resolution of snapshots that share a collection date.
    pub duplicate_dates: DuplicateDatePolicy,
    /// Product-key encoding used when persisting merged series.
    pub key_encoding: KeyEncoding,
    /// Timeout for an individual store or source call.
    pub store_timeout: Duration,
    /// Optional overall deadline for fan-out operations (`reconcile_all`, `capture`).
    pub request_timeout: Option<Duration>,
    /// Analysis tunables.
    pub analysis: AnalysisConfig,
}

impl Default for PricetrailConfig {
    fn default() -> Self {
        Self {
            duplicate_dates: DuplicateDatePolicy::default(),
            key_encoding: KeyEncoding::default(),
            store_timeout: Duration::from_secs(30),
            request_timeout: None,
            analysis: AnalysisConfig::default(),
        }
    }
}
