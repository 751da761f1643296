use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use crate::helpers::{SOK, cents, mock_trail, nov, static_source};
use pricetrail::{Pricetrail, PricetrailError, ProductKey};
use pricetrail_mock::{MockSource, MockStore};

#[tokio::test]
async fn capture_dedups_each_source() {
    let trail = Pricetrail::builder()
        .with_source(Arc::new(MockSource::new("sok")))
        .with_source(Arc::new(MockSource::new("migros")))
        .build()
        .unwrap();
    let report = trail.capture(nov(6)).await.unwrap();
    assert_eq!(report.date, nov(6));
    assert!(report.warnings.is_empty());
    assert_eq!(report.snapshots["sok"].len(), 4);
    assert_eq!(report.snapshots["sok"].get("eggs").unwrap().price, cents(315));
    assert_eq!(report.snapshots["migros"].name(), "migros");
}

#[tokio::test]
async fn capture_failures_become_warnings() {
    let trail = Pricetrail::builder()
        .with_source(Arc::new(MockSource::new("sok")))
        .with_source(Arc::new(MockSource::new("FAIL")))
        .with_source(Arc::new(MockSource::new("TIMEOUT")))
        .store_timeout(Duration::from_millis(20))
        .build()
        .unwrap();
    let report = trail.capture(nov(6)).await.unwrap();
    assert_eq!(report.snapshots.len(), 1);
    assert_eq!(report.warnings.len(), 2);
    assert!(report.warnings.contains(&PricetrailError::store_timeout("TIMEOUT")));
}

#[tokio::test]
async fn capture_all_failed_is_an_error() {
    let trail = Pricetrail::builder()
        .with_source(Arc::new(MockSource::new("FAIL")))
        .build()
        .unwrap();
    assert!(matches!(
        trail.capture(nov(6)).await,
        Err(PricetrailError::AllSourcesFailed(_))
    ));
}

#[tokio::test]
async fn capture_without_sources_is_invalid() {
    assert!(matches!(
        mock_trail().capture(nov(6)).await,
        Err(PricetrailError::InvalidArg(_))
    ));
}

#[tokio::test]
async fn capture_appends_to_reconciled_series() {
    let trail = Pricetrail::builder()
        .with_store(Arc::new(MockStore::new()))
        .with_source(Arc::new(MockSource::new("sok")))
        .with_source(static_source("a101", &[("tea", 500)]))
        .build()
        .unwrap();
    let mut series = trail.reconcile_all().await.unwrap().series;

    let report = trail.capture(nov(6)).await.unwrap();
    report.append_to(&mut series).unwrap();

    let sok = &series[SOK];
    assert_eq!(sok.slot_count(), 5);
    let milk = sok.price_view().latest(&ProductKey::new("milk", "dairy")).unwrap();
    assert_eq!(milk.value, cents(1300));
    assert_eq!(milk.date, nov(6));

    // A source seen for the first time starts a fresh series.
    let a101 = &series["a101"];
    assert_eq!(a101.collection_dates(), &[nov(6)]);
    // migros was not captured and keeps its slots.
    assert_eq!(series["migros"].slot_count(), 3);
}

#[tokio::test]
async fn capture_append_rejects_stale_date_atomically() {
    let trail = Pricetrail::builder()
        .with_store(Arc::new(MockStore::new()))
        .with_source(static_source("a101", &[("tea", 500)]))
        .with_source(Arc::new(MockSource::new("sok")))
        .build()
        .unwrap();
    let mut series = trail.reconcile_all().await.unwrap().series;
    let before: BTreeMap<_, _> = series.clone();

    let report = trail.capture(nov(5)).await.unwrap();
    assert!(matches!(
        report.append_to(&mut series),
        Err(PricetrailError::InvalidArg(_))
    ));
    assert_eq!(series, before);
}
