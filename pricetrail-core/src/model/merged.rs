use std::collections::BTreeMap;
use std::sync::OnceLock;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::key::ProductKey;
use super::snapshot::Snapshot;
use crate::series::merge::Reconciler;
use crate::series::view::SeriesView;
use pricetrail_types::{PricetrailError, Result};

/// Delta-encoded price history of one source across `N` dated snapshots.
///
/// Invariants:
/// - `collection_dates` is strictly ascending;
/// - every delta sequence has exactly `collection_dates.len()` entries, with
///   `None` marking a slot where the product was not observed.
///
/// The reconstructed [`SeriesView`] is computed on first access through
/// [`MergedSeries::price_view`] and cached inside this instance. Any mutation
/// ([`MergedSeries::append`]) drops the cache.
#[derive(Debug, Clone)]
pub struct MergedSeries {
    name: String,
    collection_dates: Vec<NaiveDate>,
    deltas: BTreeMap<ProductKey, Vec<Option<Decimal>>>,
    view: OnceLock<SeriesView>,
}

impl PartialEq for MergedSeries {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.collection_dates == other.collection_dates
            && self.deltas == other.deltas
    }
}

impl Eq for MergedSeries {}

impl MergedSeries {
    /// A series with no collection dates and no products.
    pub fn empty(name: impl Into<String>) -> Self {
        Self::from_parts_unchecked(name.into(), Vec::new(), BTreeMap::new())
    }

    /// Assemble a series from raw parts, validating both invariants.
    ///
    /// # Errors
    /// Returns `InvalidArg` if the dates are not strictly ascending or a delta
    /// sequence does not have one entry per date.
    pub fn from_parts(
        name: impl Into<String>,
        collection_dates: Vec<NaiveDate>,
        deltas: BTreeMap<ProductKey, Vec<Option<Decimal>>>,
    ) -> Result<Self> {
        check_invariants(&collection_dates, &deltas).map_err(PricetrailError::InvalidArg)?;
        Ok(Self::from_parts_unchecked(
            name.into(),
            collection_dates,
            deltas,
        ))
    }

    pub(crate) fn from_parts_unchecked(
        name: String,
        collection_dates: Vec<NaiveDate>,
        deltas: BTreeMap<ProductKey, Vec<Option<Decimal>>>,
    ) -> Self {
        Self {
            name,
            collection_dates,
            deltas,
            view: OnceLock::new(),
        }
    }

    /// Source identifier.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ascending collection dates; slot `i` refers to `collection_dates()[i]`.
    #[must_use]
    pub fn collection_dates(&self) -> &[NaiveDate] {
        &self.collection_dates
    }

    /// Per-product delta sequences.
    #[must_use]
    pub const fn deltas(&self) -> &BTreeMap<ProductKey, Vec<Option<Decimal>>> {
        &self.deltas
    }

    /// Delta sequence of one product, if it was ever observed.
    #[must_use]
    pub fn deltas_for(&self, key: &ProductKey) -> Option<&[Option<Decimal>]> {
        self.deltas.get(key).map(Vec::as_slice)
    }

    /// Number of slots (`N`).
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.collection_dates.len()
    }

    /// Number of distinct products.
    #[must_use]
    pub fn product_count(&self) -> usize {
        self.deltas.len()
    }

    /// True when no snapshot has been merged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.collection_dates.is_empty()
    }

    /// Absolute price history per product, reconstructed on first call and cached.
    pub fn price_view(&self) -> &SeriesView {
        self.view.get_or_init(|| {
            #[cfg(feature = "tracing")]
            tracing::debug!(source = %self.name, products = self.deltas.len(), "reconstructing series view");
            SeriesView::reconstruct(self)
        })
    }

    /// Most recent absolute price of every product that has at least one observation.
    #[must_use]
    pub fn last_known_prices(&self) -> BTreeMap<ProductKey, Decimal> {
        self.deltas
            .iter()
            .filter_map(|(key, seq)| {
                let mut values = seq.iter().flatten().peekable();
                values.peek()?;
                Some((key.clone(), values.copied().sum::<Decimal>()))
            })
            .collect()
    }

    /// Extend the series by one slot holding `snapshot`, observed on `date`.
    ///
    /// The result is identical to merging all snapshots again in one batch.
    /// The cached view is discarded.
    ///
    /// # Errors
    /// Returns `InvalidArg` if `date` is not strictly after the last collection date.
    pub fn append(&mut self, date: NaiveDate, snapshot: &Snapshot) -> Result<()> {
        if let Some(last) = self.collection_dates.last()
            && *last >= date
        {
            return Err(PricetrailError::InvalidArg(format!(
                "cannot append {date} to {}: last collection date is {last}",
                self.name
            )));
        }
        let current = std::mem::replace(self, Self::empty(self.name.clone()));
        let mut reconciler = Reconciler::resume(current);
        reconciler.push_slot(date, snapshot);
        *self = reconciler.finish();
        Ok(())
    }

    /// Consume the series and return `(name, collection_dates, deltas)`.
    #[must_use]
    pub fn into_parts(
        self,
    ) -> (
        String,
        Vec<NaiveDate>,
        BTreeMap<ProductKey, Vec<Option<Decimal>>>,
    ) {
        (self.name, self.collection_dates, self.deltas)
    }
}

pub(crate) fn check_invariants(
    dates: &[NaiveDate],
    deltas: &BTreeMap<ProductKey, Vec<Option<Decimal>>>,
) -> core::result::Result<(), String> {
    if let Some(w) = dates.windows(2).find(|w| w[0] >= w[1]) {
        return Err(format!(
            "collection dates must be strictly ascending: {} is followed by {}",
            w[0], w[1]
        ));
    }
    let n = dates.len();
    if let Some((key, seq)) = deltas.iter().find(|(_, seq)| seq.len() != n) {
        return Err(format!(
            "delta sequence for {key} has {} entries, expected {n}",
            seq.len()
        ));
    }
    Ok(())
}
