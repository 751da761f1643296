use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::key::ProductKey;
use super::price::round_price;

/// Opaque per-item metadata (brand, serial number, ...). The core never inspects it.
pub type Metadata = BTreeMap<String, serde_json::Value>;

/// One product observation inside a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Product name; unique within a deduplicated snapshot.
    pub name: String,
    /// Observed price, stored with two fractional digits.
    #[serde(with = "crate::codec::price_float")]
    pub price: Decimal,
    /// Category the source filed the product under.
    pub category: String,
    /// Source-specific extras.
    #[serde(default)]
    pub metadata: Metadata,
}

impl Item {
    /// Build an item with empty metadata. The price is rounded to two fractional digits.
    pub fn new(name: impl Into<String>, price: Decimal, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price: round_price(price),
            category: category.into(),
            metadata: Metadata::new(),
        }
    }

    /// Attach a metadata entry.
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// The identity this observation is merged under.
    #[must_use]
    pub fn key(&self) -> ProductKey {
        ProductKey::new(self.name.clone(), self.category.clone())
    }
}
