//! Pricetrail tracks retail prices over time by reconciling dated catalog
//! snapshots into compact, delta-encoded price histories.
//!
//! Overview
//! - Loads every stored capture of a source from a [`SnapshotStore`] and merges
//!   them into one [`MergedSeries`] (see `pricetrail_core` for the encoding).
//! - Reconciles all sources of a store concurrently; a failing source becomes
//!   a warning instead of failing the batch.
//! - Captures registered live [`SnapshotSource`]s into deduplicated snapshots
//!   that can be appended to existing series.
//! - Ranks products by sample count (volatility) and by recent price movement.
//!
//! Key behaviors
//! - Captures sharing a collection date are resolved by
//!   [`DuplicateDatePolicy`]; the default keeps the later capture.
//! - Each store or source call is bounded by `store_timeout`; fan-out
//!   operations can additionally be bounded by `request_timeout`.
//! - Reconstructed price views are cached inside each series and dropped on append.
//!
//! Examples
//! Reconciling a store and ranking recent price changes:
//! ```rust,ignore
//! use std::sync::Arc;
//! use pricetrail::Pricetrail;
//!
//! let trail = Pricetrail::builder()
//!     .with_store(Arc::new(my_store))
//!     .build()?;
//!
//! let report = trail.reconcile_all().await?;
//! for (source, series) in &report.series {
//!     let changes = trail.price_changes(series, today);
//!     // inspect changes.increased / changes.decreased
//! }
//! ```
//!
//! See `pricetrail/demos/` for a runnable end-to-end demonstration.
#![warn(missing_docs)]

pub mod analysis;
mod capture;
pub(crate) mod core;
mod reconcile;
mod reports;
mod util;

pub use crate::core::{Pricetrail, PricetrailBuilder, tag_err};
pub use reports::{CaptureReport, ReconcileReport};
pub use util::{collapse_errors, join_with_deadline};

// Re-export core types for convenience
pub use pricetrail_core::{
    AnalysisConfig, ChangeWindow, DATE_FORMAT, Decimal, DuplicateDatePolicy, Item, KEY_SEPARATOR,
    KeyEncoding, MergedSeries, Metadata, NaiveDate, Price, PriceChangeMode, PriceDelta,
    PricetrailConfig, PricetrailError, ProductKey, Reconciler, SNAPSHOT_STEM_FORMAT, SeriesView,
    Snapshot, SnapshotDiff, SnapshotSource, SnapshotStore, dedup_items, parse_snapshot_stem,
};
