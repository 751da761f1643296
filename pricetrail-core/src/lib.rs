//! pricetrail-core
//!
//! The snapshot reconciliation engine behind pricetrail.
//!
//! - `model`: product identity, items, snapshots, prices, and the delta-encoded
//!   [`MergedSeries`].
//! - `series`: the algorithms: per-snapshot dedup, the [`Reconciler`] merge,
//!   [`SeriesView`] reconstruction, and snapshot diffs.
//! - `codec`: the persisted JSON representation of snapshots and merged series.
//! - `source`: the collaborator traits the core consumes (`SnapshotSource`,
//!   `SnapshotStore`).
//!
//! Everything here is synchronous and pure except the collaborator traits,
//! which are async because real sources and stores perform I/O.
#![warn(missing_docs)]

/// Persisted representation of snapshots and merged series.
pub mod codec;
/// Product, snapshot, price, and merged-series data types.
pub mod model;
/// Dedup, merge, reconstruction, and diff algorithms.
pub mod series;
/// Collaborator traits for snapshot sources and stores.
pub mod source;
pub mod types;

pub use codec::{DATE_FORMAT, KEY_SEPARATOR, SNAPSHOT_STEM_FORMAT, parse_snapshot_stem};
pub use model::{Item, MergedSeries, Metadata, PRICE_SCALE, Price, ProductKey, Snapshot};
pub use series::dedup::dedup_items;
pub use series::diff::{PriceDelta, SnapshotDiff};
pub use series::merge::Reconciler;
pub use series::view::SeriesView;
pub use source::{SnapshotSource, SnapshotStore};
pub use types::*;
