use std::collections::BTreeMap;

use pricetrail_core::{MergedSeries, PricetrailError, Reconciler};

use crate::core::tag_err;
use crate::reports::ReconcileReport;
use crate::util::{collapse_errors, join_with_deadline};
use crate::Pricetrail;

impl Pricetrail {
    /// Load every stored capture of `source` and merge it into one series.
    ///
    /// Captures sharing a collection date are resolved with the configured
    /// [`DuplicateDatePolicy`](pricetrail_core::DuplicateDatePolicy). A source
    /// with no captures yields an empty series.
    ///
    /// # Errors
    /// - `InvalidArg` if no store is registered.
    /// - `StoreTimeout` if the store call exceeds the per-call timeout.
    /// - `NotFound` if the store does not know `source`.
    /// - `DuplicateDate` under the `Reject` policy.
    /// - Any other store failure, attributed to the store as `Source`.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "pricetrail::reconcile", skip(self), fields(source = %source))
    )]
    pub async fn reconcile(&self, source: &str) -> Result<MergedSeries, PricetrailError> {
        let store = self.store()?;
        let captures = Self::store_call_with_timeout(
            source,
            self.cfg.store_timeout,
            store.dated_snapshots(source),
        )
        .await
        .map_err(|e| tag_err(store.name(), e))?;

        #[cfg(feature = "tracing")]
        tracing::debug!(captures = captures.len(), "loaded captures");

        Reconciler::merge_dated(source, captures, self.cfg.duplicate_dates)
    }

    /// Reconcile every source the store lists, concurrently.
    ///
    /// A failing source does not abort the batch: its error lands in
    /// [`ReconcileReport::warnings`].
    ///
    /// # Errors
    /// - `InvalidArg` if no store is registered.
    /// - `RequestTimeout("reconcile_all")` if the overall deadline elapses.
    /// - `NotFound` or `AllSourcesFailed` if sources were listed but none succeeded.
    /// - Errors from listing sources, attributed to the store.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "pricetrail::reconcile_all", skip(self))
    )]
    pub async fn reconcile_all(&self) -> Result<ReconcileReport, PricetrailError> {
        let store = self.store()?;
        let sources = Self::store_call_with_timeout(
            store.name(),
            self.cfg.store_timeout,
            store.sources(),
        )
        .await
        .map_err(|e| tag_err(store.name(), e))?;

        if sources.is_empty() {
            return Ok(ReconcileReport::default());
        }

        let tasks = sources.iter().map(|source| async move {
            (source.as_str(), self.reconcile(source).await)
        });
        let joined = join_with_deadline(tasks, self.cfg.request_timeout)
            .await
            .map_err(|_| PricetrailError::request_timeout("reconcile_all"))?;

        let mut series = BTreeMap::new();
        let mut warnings = Vec::new();
        for (source, result) in joined {
            match result {
                Ok(merged) => {
                    series.insert(source.to_string(), merged);
                }
                Err(e) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(source, error = %e, "dropping source from reconcile_all");
                    warnings.push(e);
                }
            }
        }

        if series.is_empty() {
            return Err(collapse_errors(
                warnings,
                Some(format!("snapshots in {}", store.name())),
            ));
        }
        Ok(ReconcileReport { series, warnings })
    }
}
