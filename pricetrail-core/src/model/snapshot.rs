use serde::{Deserialize, Serialize};

use super::item::Item;
use super::price::round_price;
use crate::series::dedup::dedup_items;

/// One source's product list captured at one point in time.
///
/// Item names are unique: construction runs [`dedup_items`], so a later item
/// with an already-seen name replaces the earlier one. Prices are rounded to
/// two fractional digits here as well, so items built as struct literals end
/// up on the same grid as those from [`Item::new`]. Snapshots are immutable
/// once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawSnapshot")]
pub struct Snapshot {
    name: String,
    items: Vec<Item>,
}

#[derive(Deserialize)]
struct RawSnapshot {
    name: String,
    #[serde(default)]
    items: Vec<Item>,
}

impl From<RawSnapshot> for Snapshot {
    fn from(raw: RawSnapshot) -> Self {
        Self::new(raw.name, raw.items)
    }
}

impl Snapshot {
    /// Build a snapshot, deduplicating `items` by name (last occurrence wins).
    pub fn new(name: impl Into<String>, items: impl IntoIterator<Item = Item>) -> Self {
        let items = items.into_iter().map(|mut item| {
            item.price = round_price(item.price);
            item
        });
        Self {
            name: name.into(),
            items: dedup_items(items),
        }
    }

    /// Source identifier.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Deduplicated items.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Look up an item by product name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.name == name)
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if the snapshot holds no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Consume the snapshot and return its parts.
    #[must_use]
    pub fn into_parts(self) -> (String, Vec<Item>) {
        (self.name, self.items)
    }
}
