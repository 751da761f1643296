use std::collections::BTreeMap;

use pricetrail_core::{Price, ProductKey, SeriesView};

/// Products grouped by how many price samples they have, fewest samples first.
pub type VolatilityGroups<'a> = BTreeMap<usize, Vec<(&'a ProductKey, &'a [Price])>>;

/// Group products by sample count, keeping only those with strictly more
/// than `threshold` samples. Within a group products are in key order.
#[must_use]
pub fn most_volatile(view: &SeriesView, threshold: usize) -> VolatilityGroups<'_> {
    let mut groups: VolatilityGroups<'_> = BTreeMap::new();
    for (key, prices) in view.iter() {
        if prices.len() > threshold {
            groups.entry(prices.len()).or_default().push((key, prices));
        }
    }
    groups
}
