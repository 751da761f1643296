//! Reconciliation algorithms over snapshots and merged series.
//!
//! Modules include:
//! - `dedup`: collapse repeated product names inside one snapshot
//! - `merge`: fold dated snapshots into a delta-encoded `MergedSeries`
//! - `view`: rebuild absolute price histories from a `MergedSeries`
//! - `diff`: compare two snapshots of the same source
/// Per-snapshot item deduplication.
pub mod dedup;
/// Snapshot-to-snapshot comparison.
pub mod diff;
/// Delta-encoded merge of dated snapshots.
pub mod merge;
/// Absolute price reconstruction.
pub mod view;
