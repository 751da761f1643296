// Shared fixtures for orchestrator tests.
use std::sync::Arc;

use async_trait::async_trait;
use pricetrail::{Decimal, Item, NaiveDate, Pricetrail, PricetrailError, SnapshotSource};
use pricetrail_mock::MockStore;

pub const SOK: &str = "sok";
pub const MIGROS: &str = "migros";

/// Shorthand for a 2021-11 calendar day, the month the mock fixtures cover.
pub fn nov(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2021, 11, d).expect("invalid date")
}

/// Decimal from integer cents.
pub fn cents(v: i64) -> Decimal {
    Decimal::new(v, 2)
}

/// Orchestrator over the fixture store.
pub fn mock_trail() -> Pricetrail {
    Pricetrail::builder()
        .with_store(Arc::new(MockStore::new()))
        .build()
        .expect("store registered")
}

/// A live source that always returns the given items.
pub struct StaticSource {
    pub name: &'static str,
    pub items: Vec<Item>,
}

#[async_trait]
impl SnapshotSource for StaticSource {
    fn name(&self) -> &str {
        self.name
    }

    async fn items(&self) -> Result<Vec<Item>, PricetrailError> {
        Ok(self.items.clone())
    }
}

/// Convenience constructor for `StaticSource` rows priced in cents.
pub fn static_source(name: &'static str, rows: &[(&str, i64)]) -> Arc<StaticSource> {
    Arc::new(StaticSource {
        name,
        items: rows
            .iter()
            .map(|(n, c)| Item::new(*n, cents(*c), "misc"))
            .collect(),
    })
}
