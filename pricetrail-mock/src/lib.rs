use async_trait::async_trait;
use pricetrail_core::{
    Item, NaiveDate, PricetrailError, Snapshot, SnapshotSource, SnapshotStore,
    parse_snapshot_stem,
};

mod dynamic;
mod fixtures;

pub use dynamic::{DynamicMockController, DynamicMockStore, MockBehavior};

const STORE_NAME: &str = "pricetrail-mock";

fn maybe_fail(source: &str, capability: &'static str) -> Result<(), PricetrailError> {
    match source {
        "FAIL" => Err(PricetrailError::source_failure(
            source,
            format!("forced failure: {capability}"),
        )),
        _ => Ok(()),
    }
}

async fn maybe_stall(source: &str) {
    // Short enough to keep tests fast, long enough to trip a tight timeout.
    if source == "TIMEOUT" {
        tokio::time::sleep(std::time::Duration::from_millis(200)).await;
    }
}

/// Mock snapshot store for CI-safe tests and demos. Serves deterministic
/// captures from static fixtures.
///
/// Besides the fixture sources (`sok`, `migros`), two names trigger special
/// behavior: `FAIL` returns a `Source` error and `TIMEOUT` stalls briefly
/// before returning no captures. Any other name is `NotFound`.
pub struct MockStore {
    listed: Vec<String>,
}

impl Default for MockStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MockStore {
    /// A store listing every fixture source.
    #[must_use]
    pub fn new() -> Self {
        Self {
            listed: fixtures::SOURCES.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    /// A store that lists exactly `sources`, which may include unknown or
    /// special names.
    #[must_use]
    pub fn with_sources<I, S>(sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            listed: sources.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl SnapshotStore for MockStore {
    fn name(&self) -> &str {
        STORE_NAME
    }

    async fn sources(&self) -> Result<Vec<String>, PricetrailError> {
        Ok(self.listed.clone())
    }

    async fn dated_snapshots(
        &self,
        source: &str,
    ) -> Result<Vec<(NaiveDate, Snapshot)>, PricetrailError> {
        maybe_fail(source, "dated_snapshots")?;
        maybe_stall(source).await;
        if source == "TIMEOUT" {
            return Ok(Vec::new());
        }
        let captures = fixtures::captures_by_source(source)
            .ok_or_else(|| PricetrailError::not_found(format!("snapshots for {source}")))?;
        captures
            .into_iter()
            .map(|(stem, items)| -> Result<_, PricetrailError> {
                Ok((parse_snapshot_stem(stem)?, Snapshot::new(source, items)))
            })
            .collect()
    }
}

/// Mock live catalog. Returns the current fixture listing of one source,
/// duplicates included, the way a scraper would.
pub struct MockSource {
    name: String,
}

impl MockSource {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl SnapshotSource for MockSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn items(&self) -> Result<Vec<Item>, PricetrailError> {
        maybe_fail(&self.name, "items")?;
        maybe_stall(&self.name).await;
        if self.name == "TIMEOUT" {
            return Ok(Vec::new());
        }
        fixtures::live_by_source(&self.name)
            .ok_or_else(|| PricetrailError::not_found(format!("catalog for {}", self.name)))
    }
}
