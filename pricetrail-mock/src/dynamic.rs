use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use pricetrail_core::{NaiveDate, PricetrailError, Snapshot, SnapshotStore};

/// Instruction for how a call should behave for a given source.
#[derive(Clone)]
pub enum MockBehavior<T> {
    /// Return the provided value immediately.
    Return(T),
    /// Fail immediately with the provided error.
    Fail(PricetrailError),
    /// Hang indefinitely (simulate a stalled store).
    Hang,
}

#[derive(Default)]
struct InternalState {
    sources: Vec<String>,
    rules: HashMap<String, MockBehavior<Vec<(NaiveDate, Snapshot)>>>,
    requests: Vec<String>,
}

/// Controller handle used by tests to drive the dynamic store from the outside.
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockController {
    /// Replace the list returned by `sources`.
    pub async fn set_sources(&self, sources: Vec<String>) {
        let mut guard = self.state.lock().await;
        guard.sources = sources;
    }

    /// Set the behavior of `dated_snapshots` for one source.
    pub async fn set_behavior(
        &self,
        source: impl Into<String>,
        behavior: MockBehavior<Vec<(NaiveDate, Snapshot)>>,
    ) {
        let mut guard = self.state.lock().await;
        guard.rules.insert(source.into(), behavior);
    }

    /// Sources requested through `dated_snapshots`, in call order.
    pub async fn requests(&self) -> Vec<String> {
        self.state.lock().await.requests.clone()
    }

    /// Clear all configured behaviors and the request log.
    pub async fn clear_all_behaviors(&self) {
        let mut guard = self.state.lock().await;
        guard.sources.clear();
        guard.rules.clear();
        guard.requests.clear();
    }
}

/// A store that defers all behavior to an external controller.
pub struct DynamicMockStore {
    name: &'static str,
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockStore {
    /// Create a new dynamic store and its controller.
    #[must_use]
    pub fn new_with_controller(
        name: &'static str,
    ) -> (Arc<dyn SnapshotStore>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let controller = DynamicMockController {
            state: Arc::clone(&state),
        };
        let me = Arc::new(Self { name, state });
        (me as Arc<dyn SnapshotStore>, controller)
    }
}

#[async_trait]
impl SnapshotStore for DynamicMockStore {
    fn name(&self) -> &str {
        self.name
    }

    async fn sources(&self) -> Result<Vec<String>, PricetrailError> {
        Ok(self.state.lock().await.sources.clone())
    }

    async fn dated_snapshots(
        &self,
        source: &str,
    ) -> Result<Vec<(NaiveDate, Snapshot)>, PricetrailError> {
        // Take the rule out without holding the lock across the await below.
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.requests.push(source.to_string());
            guard.rules.get(source).cloned()
        };

        match behavior {
            Some(MockBehavior::Return(captures)) => Ok(captures),
            Some(MockBehavior::Fail(e)) => Err(e),
            Some(MockBehavior::Hang) => std::future::pending().await,
            None => Err(PricetrailError::not_found(format!("snapshots for {source}"))),
        }
    }
}
