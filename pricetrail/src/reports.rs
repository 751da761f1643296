use std::collections::BTreeMap;

use pricetrail_core::{MergedSeries, NaiveDate, PricetrailError, Snapshot};

/// Result of reconciling every source of a store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Merged series keyed by source name.
    pub series: BTreeMap<String, MergedSeries>,
    /// Sources that could not be reconciled, already attributed to their source.
    pub warnings: Vec<PricetrailError>,
}

/// Result of capturing every registered live source once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureReport {
    /// Collection date the snapshots are filed under.
    pub date: NaiveDate,
    /// Deduplicated snapshots keyed by source name.
    pub snapshots: BTreeMap<String, Snapshot>,
    /// Sources that failed or timed out.
    pub warnings: Vec<PricetrailError>,
}

impl CaptureReport {
    /// Append every captured snapshot to its source's series as a new slot.
    ///
    /// Sources without a series yet start from an empty one. Nothing is
    /// modified unless every append can succeed.
    ///
    /// # Errors
    /// Returns `InvalidArg` if `date` is not after the last collection date of
    /// a series that would receive a snapshot.
    pub fn append_to(
        &self,
        series: &mut BTreeMap<String, MergedSeries>,
    ) -> Result<(), PricetrailError> {
        for name in self.snapshots.keys() {
            if let Some(existing) = series.get(name)
                && let Some(last) = existing.collection_dates().last()
                && *last >= self.date
            {
                return Err(PricetrailError::InvalidArg(format!(
                    "capture date {} does not follow {last} for {name}",
                    self.date
                )));
            }
        }
        for (name, snapshot) in &self.snapshots {
            series
                .entry(name.clone())
                .or_insert_with(|| MergedSeries::empty(name.clone()))
                .append(self.date, snapshot)?;
        }
        Ok(())
    }
}
