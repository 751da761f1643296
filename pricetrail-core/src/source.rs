use async_trait::async_trait;
use chrono::NaiveDate;

use crate::model::{Item, Snapshot};
use pricetrail_types::Result;

/// A catalog that can be captured into a snapshot (typically a retailer scraper).
///
/// Implementations own fetching, parsing, and retrying. Item names need not be
/// unique; [`SnapshotSource::snapshot`] deduplicates them.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Stable source identifier, used as the snapshot and series name.
    fn name(&self) -> &str;

    /// Fetch the current product list.
    async fn items(&self) -> Result<Vec<Item>>;

    /// Fetch the current product list as a deduplicated [`Snapshot`].
    async fn snapshot(&self) -> Result<Snapshot> {
        let items = self.items().await?;
        Ok(Snapshot::new(self.name(), items))
    }
}

/// Access to previously captured snapshots, grouped by source and date.
///
/// A store resolves fetch and parse failures before handing data over: a
/// capture that could not be loaded is simply absent from the returned list.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Human-readable store name, used when tagging errors.
    fn name(&self) -> &str;

    /// Identifiers of every source that has at least one stored snapshot.
    async fn sources(&self) -> Result<Vec<String>>;

    /// Every stored capture of `source` with its collection date, in any order.
    ///
    /// Several captures may share a date (two runs on one day); the caller
    /// resolves them. Implementations return `NotFound` for an unknown source.
    async fn dated_snapshots(&self, source: &str) -> Result<Vec<(NaiveDate, Snapshot)>>;
}
