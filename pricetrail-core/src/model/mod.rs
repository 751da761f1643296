//! Data model of the reconciliation core.

mod item;
mod key;
mod merged;
mod price;
mod snapshot;

pub use item::{Item, Metadata};
pub use key::ProductKey;
pub use merged::MergedSeries;
pub use price::{PRICE_SCALE, Price};
pub use snapshot::Snapshot;

pub(crate) use merged::check_invariants;
pub(crate) use price::round_price;
