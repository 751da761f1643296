use std::sync::Arc;
use std::time::Duration;

use crate::helpers::{MIGROS, SOK, mock_trail};
use pricetrail::{Pricetrail, PricetrailError};
use pricetrail_mock::{DynamicMockStore, MockBehavior, MockStore};

#[tokio::test]
async fn reconcile_all_covers_every_listed_source() {
    let report = mock_trail().reconcile_all().await.unwrap();
    assert!(report.warnings.is_empty());
    assert_eq!(
        report.series.keys().map(String::as_str).collect::<Vec<_>>(),
        vec![MIGROS, SOK]
    );
    assert_eq!(report.series[SOK].slot_count(), 4);
    assert_eq!(report.series[MIGROS].slot_count(), 3);
}

#[tokio::test]
async fn reconcile_all_turns_failures_into_warnings() {
    let trail = Pricetrail::builder()
        .with_store(Arc::new(MockStore::with_sources([SOK, "FAIL", "bim"])))
        .build()
        .unwrap();
    let report = trail.reconcile_all().await.unwrap();
    assert_eq!(report.series.len(), 1);
    assert_eq!(report.warnings.len(), 2);
    assert!(report.warnings.iter().any(PricetrailError::is_actionable));
    assert!(
        report
            .warnings
            .iter()
            .any(|e| matches!(e, PricetrailError::NotFound { .. }))
    );
}

#[tokio::test]
async fn reconcile_all_with_no_sources_is_empty() {
    let trail = Pricetrail::builder()
        .with_store(Arc::new(MockStore::with_sources(Vec::<String>::new())))
        .build()
        .unwrap();
    let report = trail.reconcile_all().await.unwrap();
    assert!(report.series.is_empty());
    assert!(report.warnings.is_empty());
}

#[tokio::test]
async fn reconcile_all_all_not_found_collapses() {
    let trail = Pricetrail::builder()
        .with_store(Arc::new(MockStore::with_sources(["bim", "a101"])))
        .build()
        .unwrap();
    let err = trail.reconcile_all().await.unwrap_err();
    assert!(matches!(err, PricetrailError::NotFound { .. }));
}

#[tokio::test]
async fn reconcile_all_all_failed_aggregates() {
    let trail = Pricetrail::builder()
        .with_store(Arc::new(MockStore::with_sources(["FAIL", "bim"])))
        .build()
        .unwrap();
    match trail.reconcile_all().await.unwrap_err() {
        PricetrailError::AllSourcesFailed(errs) => assert_eq!(errs.len(), 2),
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn reconcile_all_per_source_timeout_is_a_warning() {
    let trail = Pricetrail::builder()
        .with_store(Arc::new(MockStore::with_sources([SOK, "TIMEOUT"])))
        .store_timeout(Duration::from_millis(20))
        .build()
        .unwrap();
    let report = trail.reconcile_all().await.unwrap();
    assert_eq!(report.series.len(), 1);
    assert_eq!(report.warnings, vec![PricetrailError::store_timeout("TIMEOUT")]);
}

#[tokio::test]
async fn reconcile_all_respects_request_deadline() {
    let (store, controller) = DynamicMockStore::new_with_controller("dyn");
    controller.set_sources(vec![SOK.into()]).await;
    controller.set_behavior(SOK, MockBehavior::Hang).await;
    let trail = Pricetrail::builder()
        .with_store(store)
        .request_timeout(Duration::from_millis(20))
        .build()
        .unwrap();
    let err = trail.reconcile_all().await.unwrap_err();
    assert_eq!(err, PricetrailError::request_timeout("reconcile_all"));
    assert_eq!(controller.requests().await, vec![SOK]);
}
