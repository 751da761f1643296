use std::collections::HashMap;

use crate::model::Item;

/// Collapse items that share a product name, keeping the last occurrence.
///
/// - The surviving item fully replaces earlier ones (price, category, metadata).
/// - Output order follows the first appearance of each name.
/// - Applying the function to its own output is a no-op.
#[must_use]
pub fn dedup_items<I>(items: I) -> Vec<Item>
where
    I: IntoIterator<Item = Item>,
{
    let items = items.into_iter();
    let mut slot_by_name: HashMap<String, usize> = HashMap::with_capacity(items.size_hint().0);
    let mut out: Vec<Item> = Vec::with_capacity(items.size_hint().0);

    for item in items {
        if let Some(&slot) = slot_by_name.get(&item.name) {
            #[cfg(feature = "tracing")]
            tracing::trace!(name = %item.name, "replacing duplicate item");
            out[slot] = item;
        } else {
            slot_by_name.insert(item.name.clone(), out.len());
            out.push(item);
        }
    }
    out
}
