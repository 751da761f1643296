use pricetrail_core::{Decimal, Item};

mod migros;
mod sok;

pub const SOURCES: &[&str] = &["migros", "sok"];

/// Stored captures of a source as `(file stem, raw items)`.
pub fn captures_by_source(source: &str) -> Option<Vec<(&'static str, Vec<Item>)>> {
    match source {
        "sok" => Some(sok::captures()),
        "migros" => Some(migros::captures()),
        _ => None,
    }
}

/// Listing a live source would return right now.
pub fn live_by_source(source: &str) -> Option<Vec<Item>> {
    match source {
        "sok" => Some(sok::live()),
        "migros" => Some(migros::live()),
        _ => None,
    }
}

fn item(name: &str, cents: i64, category: &str) -> Item {
    Item::new(name, Decimal::new(cents, 2), category)
}
