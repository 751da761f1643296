use std::collections::{BTreeMap, HashMap, btree_map::Entry};

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::model::{MergedSeries, ProductKey, Snapshot};
use pricetrail_types::{DuplicateDatePolicy, PricetrailError, Result};

/// Folds a source's dated snapshots into a delta-encoded [`MergedSeries`].
///
/// Slots are processed in ascending date order. For every item of the snapshot
/// in slot `i`:
/// - a key seen for the first time starts with `i` leading `None`s;
/// - a key that skipped slots since its last observation is back-filled with
///   `None` up to `i` when it is touched again, not eagerly;
/// - the appended delta is `observed − last known price` (0 for a new key), so
///   the first delta of every key is its absolute price.
///
/// [`Reconciler::finish`] right-pads every sequence with `None` to `N` entries.
/// Prices are not validated; a negative price is merged like any other.
#[derive(Debug)]
pub struct Reconciler {
    name: String,
    dates: Vec<NaiveDate>,
    deltas: BTreeMap<ProductKey, Vec<Option<Decimal>>>,
    last_known: HashMap<ProductKey, Decimal>,
}

impl Reconciler {
    /// Start an empty reconciliation for source `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dates: Vec::new(),
            deltas: BTreeMap::new(),
            last_known: HashMap::new(),
        }
    }

    /// Continue reconciling on top of an existing series.
    ///
    /// The last known price of each product is recovered as the running sum of
    /// its recorded deltas.
    #[must_use]
    pub fn resume(series: MergedSeries) -> Self {
        let last_known = series.last_known_prices().into_iter().collect();
        let (name, dates, deltas) = series.into_parts();
        Self {
            name,
            dates,
            deltas,
            last_known,
        }
    }

    /// Merge a date-keyed batch of snapshots.
    ///
    /// An empty map yields an empty series (no dates, no products).
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "pricetrail_core::merge",
            skip_all,
            fields(slots = snapshots.len()),
        )
    )]
    pub fn merge(name: impl Into<String>, snapshots: BTreeMap<NaiveDate, Snapshot>) -> MergedSeries {
        let mut reconciler = Self::new(name);
        for (date, snapshot) in &snapshots {
            reconciler.push_slot(*date, snapshot);
        }
        reconciler.finish()
    }

    /// Merge an arbitrary sequence of `(date, snapshot)` pairs.
    ///
    /// Pairs are sorted by date; snapshots that share a date are resolved by
    /// `policy`, using input order as the tie-break.
    ///
    /// # Errors
    /// Returns `DuplicateDate` when `policy` is [`DuplicateDatePolicy::Reject`]
    /// and two pairs share a date.
    pub fn merge_dated<I>(
        name: impl Into<String>,
        snapshots: I,
        policy: DuplicateDatePolicy,
    ) -> Result<MergedSeries>
    where
        I: IntoIterator<Item = (NaiveDate, Snapshot)>,
    {
        let name = name.into();
        let mut by_date: BTreeMap<NaiveDate, Snapshot> = BTreeMap::new();
        for (date, snapshot) in snapshots {
            match by_date.entry(date) {
                Entry::Vacant(v) => {
                    v.insert(snapshot);
                }
                Entry::Occupied(mut o) => match policy {
                    DuplicateDatePolicy::KeepFirst => {
                        #[cfg(feature = "tracing")]
                        tracing::debug!(source = %name, %date, "duplicate date, keeping earlier snapshot");
                    }
                    DuplicateDatePolicy::Reject => {
                        return Err(PricetrailError::DuplicateDate {
                            name,
                            date: date.to_string(),
                        });
                    }
                    #[allow(clippy::wildcard_in_or_patterns)]
                    DuplicateDatePolicy::KeepLast | _ => {
                        #[cfg(feature = "tracing")]
                        tracing::debug!(source = %name, %date, "duplicate date, keeping later snapshot");
                        o.insert(snapshot);
                    }
                },
            }
        }
        Ok(Self::merge(name, by_date))
    }

    /// Add the next slot.
    ///
    /// # Errors
    /// Returns `InvalidArg` if `date` is not strictly after every date pushed so far.
    pub fn push(&mut self, date: NaiveDate, snapshot: &Snapshot) -> Result<()> {
        if let Some(last) = self.dates.last()
            && *last >= date
        {
            return Err(PricetrailError::InvalidArg(format!(
                "slot dates must increase: {date} does not follow {last}"
            )));
        }
        self.push_slot(date, snapshot);
        Ok(())
    }

    /// Number of slots pushed so far.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.dates.len()
    }

    // Caller guarantees `date` is after every pushed date.
    pub(crate) fn push_slot(&mut self, date: NaiveDate, snapshot: &Snapshot) {
        let slot = self.dates.len();
        self.dates.push(date);

        for item in snapshot.items() {
            let key = item.key();
            let seq = self.deltas.entry(key.clone()).or_default();
            if seq.len() < slot {
                seq.resize(slot, None);
            }
            let last = self.last_known.get(&key).copied().unwrap_or(Decimal::ZERO);
            seq.push(Some(item.price - last));
            self.last_known.insert(key, item.price);
        }
    }

    /// Pad every sequence to the slot count and produce the series.
    #[must_use]
    pub fn finish(mut self) -> MergedSeries {
        let n = self.dates.len();
        for seq in self.deltas.values_mut() {
            if seq.len() < n {
                seq.resize(n, None);
            }
        }
        MergedSeries::from_parts_unchecked(self.name, self.dates, self.deltas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Item;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 11, day).unwrap()
    }

    fn snap(items: &[(&str, i64)]) -> Snapshot {
        Snapshot::new(
            "sok",
            items
                .iter()
                .map(|(n, cents)| Item::new(*n, Decimal::new(*cents, 2), "food")),
        )
    }

    #[test]
    fn new_key_gets_leading_nils() {
        let mut map = BTreeMap::new();
        map.insert(d(1), snap(&[("a", 100)]));
        map.insert(d(2), snap(&[("a", 100)]));
        map.insert(d(3), snap(&[("a", 120), ("b", 999)]));
        let merged = Reconciler::merge("sok", map);
        let b = merged.deltas_for(&ProductKey::new("b", "food")).unwrap();
        assert_eq!(b, &[None, None, Some(Decimal::new(999, 2))]);
    }

    #[test]
    fn push_rejects_non_increasing_dates() {
        let mut r = Reconciler::new("sok");
        r.push(d(2), &snap(&[])).unwrap();
        assert!(matches!(
            r.push(d(2), &snap(&[])),
            Err(PricetrailError::InvalidArg(_))
        ));
        assert!(r.push(d(1), &snap(&[])).is_err());
        assert_eq!(r.slot_count(), 1);
    }
}
