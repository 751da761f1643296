use std::sync::Arc;

use pricetrail_core::{MergedSeries, SnapshotSource, SnapshotStore};
use pricetrail_types::{
    AnalysisConfig, DuplicateDatePolicy, KeyEncoding, PricetrailConfig, PricetrailError,
};

/// Orchestrator that reconciles stored snapshots and captures live sources.
pub struct Pricetrail {
    pub(crate) store: Option<Arc<dyn SnapshotStore>>,
    pub(crate) sources: Vec<Arc<dyn SnapshotSource>>,
    pub(crate) cfg: PricetrailConfig,
}

/// Builder for constructing a `Pricetrail` orchestrator with custom configuration.
pub struct PricetrailBuilder {
    store: Option<Arc<dyn SnapshotStore>>,
    sources: Vec<Arc<dyn SnapshotSource>>,
    cfg: PricetrailConfig,
}

impl Default for PricetrailBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PricetrailBuilder {
    /// Create a new builder with the default configuration.
    ///
    /// Starts with no store and no live sources; register at least one of
    /// them before calling [`build`](Self::build).
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: None,
            sources: vec![],
            cfg: PricetrailConfig::default(),
        }
    }

    /// Register the snapshot store used by `reconcile` and `reconcile_all`.
    ///
    /// A later call replaces the earlier store.
    #[must_use]
    pub fn with_store(mut self, store: Arc<dyn SnapshotStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Register a live source used by `capture`.
    ///
    /// Sources are captured in registration order. Registering two sources
    /// with the same name is rejected by [`build`](Self::build).
    #[must_use]
    pub fn with_source(mut self, source: Arc<dyn SnapshotSource>) -> Self {
        self.sources.push(source);
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: PricetrailConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Select how snapshots sharing a collection date are resolved.
    #[must_use]
    pub const fn duplicate_dates(mut self, policy: DuplicateDatePolicy) -> Self {
        self.cfg.duplicate_dates = policy;
        self
    }

    /// Select the product-key encoding used by [`Pricetrail::encode`].
    #[must_use]
    pub const fn key_encoding(mut self, encoding: KeyEncoding) -> Self {
        self.cfg.key_encoding = encoding;
        self
    }

    /// Set the timeout applied to each individual store or source call.
    #[must_use]
    pub const fn store_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.cfg.store_timeout = timeout;
        self
    }

    /// Set an overall deadline for fan-out operations (`reconcile_all`, `capture`).
    ///
    /// When exceeded, the operation returns a `RequestTimeout` error and no
    /// partial report.
    #[must_use]
    pub const fn request_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.cfg.request_timeout = Some(timeout);
        self
    }

    /// Set the tunables used by the analysis helpers.
    #[must_use]
    pub const fn analysis(mut self, analysis: AnalysisConfig) -> Self {
        self.cfg.analysis = analysis;
        self
    }

    /// Build the `Pricetrail` orchestrator.
    ///
    /// # Errors
    /// Returns `InvalidArg` if neither a store nor a source was registered, or
    /// if two live sources share a name.
    pub fn build(self) -> Result<Pricetrail, PricetrailError> {
        if self.store.is_none() && self.sources.is_empty() {
            return Err(PricetrailError::InvalidArg(
                "nothing registered; add a store via with_store(...) or a source via with_source(...)"
                    .to_string(),
            ));
        }

        let mut seen = std::collections::HashSet::new();
        for s in &self.sources {
            if !seen.insert(s.name()) {
                return Err(PricetrailError::InvalidArg(format!(
                    "duplicate source '{}' registered",
                    s.name()
                )));
            }
        }

        Ok(Pricetrail {
            store: self.store,
            sources: self.sources,
            cfg: self.cfg,
        })
    }
}

/// Attribute a collaborator error to `name` unless it already carries its origin.
pub fn tag_err(name: &str, e: PricetrailError) -> PricetrailError {
    match e {
        e @ (PricetrailError::NotFound { .. }
        | PricetrailError::Source { .. }
        | PricetrailError::StoreTimeout { .. }
        | PricetrailError::RequestTimeout { .. }
        | PricetrailError::AllSourcesFailed(_)) => e,
        other => PricetrailError::Source {
            name: name.to_string(),
            msg: other.to_string(),
        },
    }
}

/// Bound `fut` by an optional overall deadline.
///
/// On timeout returns `RequestTimeout("request")`; call sites remap the label.
pub(crate) async fn with_request_deadline<F, T>(
    deadline: Option<std::time::Duration>,
    fut: F,
) -> Result<T, PricetrailError>
where
    F: core::future::Future<Output = T>,
{
    match deadline {
        Some(d) => tokio::time::timeout(d, fut)
            .await
            .map_err(|_| PricetrailError::request_timeout("request")),
        None => Ok(fut.await),
    }
}

impl Pricetrail {
    /// Start building a new `Pricetrail` instance.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use pricetrail::Pricetrail;
    /// use pricetrail_mock::{MockSource, MockStore};
    ///
    /// let trail = Pricetrail::builder()
    ///     .with_store(Arc::new(MockStore::new()))
    ///     .with_source(Arc::new(MockSource::new("sok")))
    ///     .store_timeout(std::time::Duration::from_secs(5))
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> PricetrailBuilder {
        PricetrailBuilder::new()
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &PricetrailConfig {
        &self.cfg
    }

    /// Serialize `series` with the configured key encoding.
    ///
    /// # Errors
    /// Returns `Encode` if a product name cannot be expressed in that encoding.
    pub fn encode(&self, series: &MergedSeries) -> Result<String, PricetrailError> {
        series.to_json(self.cfg.key_encoding)
    }

    /// Wrap a store or source future with the per-call timeout.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "pricetrail::core::store_call_with_timeout",
            skip(fut),
            fields(
                source = name,
                timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            ),
        )
    )]
    pub(crate) async fn store_call_with_timeout<T, Fut>(
        name: &str,
        timeout: std::time::Duration,
        fut: Fut,
    ) -> Result<T, PricetrailError>
    where
        Fut: core::future::Future<Output = Result<T, PricetrailError>>,
    {
        (tokio::time::timeout(timeout, fut).await)
            .unwrap_or_else(|_| Err(PricetrailError::store_timeout(name)))
    }

    pub(crate) fn store(&self) -> Result<&Arc<dyn SnapshotStore>, PricetrailError> {
        self.store.as_ref().ok_or_else(|| {
            PricetrailError::InvalidArg("no snapshot store registered".to_string())
        })
    }
}
