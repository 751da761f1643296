use std::collections::BTreeMap;

use pricetrail_core::{NaiveDate, PricetrailError};

use crate::core::tag_err;
use crate::reports::CaptureReport;
use crate::util::{collapse_errors, join_with_deadline};
use crate::Pricetrail;

impl Pricetrail {
    /// Snapshot every registered live source once and file the results under `date`.
    ///
    /// Sources run concurrently, each bounded by the per-call timeout. Items
    /// are deduplicated per source. A failing source becomes a warning.
    ///
    /// # Errors
    /// - `InvalidArg` if no live source is registered.
    /// - `RequestTimeout("capture")` if the overall deadline elapses.
    /// - `NotFound` or `AllSourcesFailed` if every source failed.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "pricetrail::capture", skip(self), fields(date = %date))
    )]
    pub async fn capture(&self, date: NaiveDate) -> Result<CaptureReport, PricetrailError> {
        if self.sources.is_empty() {
            return Err(PricetrailError::InvalidArg(
                "no live sources registered; add one via with_source(...)".to_string(),
            ));
        }

        let tasks = self.sources.iter().map(|source| {
            let timeout = self.cfg.store_timeout;
            async move {
                let name = source.name();
                let res = Self::store_call_with_timeout(name, timeout, source.snapshot())
                    .await
                    .map_err(|e| tag_err(name, e));
                (name, res)
            }
        });
        let joined = join_with_deadline(tasks, self.cfg.request_timeout)
            .await
            .map_err(|_| PricetrailError::request_timeout("capture"))?;

        let mut snapshots = BTreeMap::new();
        let mut warnings = Vec::new();
        for (name, result) in joined {
            match result {
                Ok(snapshot) => {
                    snapshots.insert(name.to_string(), snapshot);
                }
                Err(e) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(source = name, error = %e, "capture failed");
                    warnings.push(e);
                }
            }
        }

        if snapshots.is_empty() {
            return Err(collapse_errors(warnings, Some("live catalogs".to_string())));
        }
        Ok(CaptureReport {
            date,
            snapshots,
            warnings,
        })
    }
}
