use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::model::Snapshot;

/// Price movement of one product between two snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceDelta {
    /// Product name.
    pub name: String,
    /// Price in the older snapshot.
    #[serde(with = "crate::codec::price_float")]
    pub before: Decimal,
    /// Price in the newer snapshot.
    #[serde(with = "crate::codec::price_float")]
    pub after: Decimal,
}

impl PriceDelta {
    /// Signed change `after − before`.
    #[must_use]
    pub fn change(&self) -> Decimal {
        self.after - self.before
    }
}

/// Products added, removed, and repriced between two snapshots of one source.
///
/// Products are matched by name only. Every list is sorted by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotDiff {
    /// Present only in the newer snapshot, with their price.
    pub added: Vec<(String, Decimal)>,
    /// Present only in the older snapshot, with their last price.
    pub removed: Vec<(String, Decimal)>,
    /// Present in both with different prices.
    pub changed: Vec<PriceDelta>,
}

impl SnapshotDiff {
    /// Compare `old` against `new`.
    #[must_use]
    pub fn between(old: &Snapshot, new: &Snapshot) -> Self {
        let before: BTreeMap<&str, Decimal> = old
            .items()
            .iter()
            .map(|i| (i.name.as_str(), i.price))
            .collect();
        let after: BTreeMap<&str, Decimal> = new
            .items()
            .iter()
            .map(|i| (i.name.as_str(), i.price))
            .collect();

        let mut diff = Self::default();
        for (name, &price) in &after {
            match before.get(name) {
                None => diff.added.push(((*name).to_string(), price)),
                Some(&prev) if prev != price => diff.changed.push(PriceDelta {
                    name: (*name).to_string(),
                    before: prev,
                    after: price,
                }),
                Some(_) => {}
            }
        }
        for (name, &price) in &before {
            if !after.contains_key(name) {
                diff.removed.push(((*name).to_string(), price));
            }
        }
        diff
    }

    /// True when the two snapshots carry the same products at the same prices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }
}
