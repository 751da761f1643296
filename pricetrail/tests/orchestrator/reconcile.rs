use std::sync::Arc;
use std::time::Duration;

use crate::helpers::{MIGROS, SOK, cents, mock_trail, nov};
use pricetrail::{DuplicateDatePolicy, MergedSeries, Pricetrail, PricetrailError, ProductKey};
use pricetrail_mock::{DynamicMockStore, MockBehavior, MockStore};

#[tokio::test]
async fn reconcile_merges_fixture_captures() {
    let series = mock_trail().reconcile(SOK).await.unwrap();
    assert_eq!(series.name(), SOK);
    assert_eq!(series.collection_dates(), &[nov(1), nov(2), nov(4), nov(5)]);

    let eggs = ProductKey::new("eggs", "dairy");
    assert_eq!(
        series.deltas_for(&eggs).unwrap(),
        &[Some(cents(300)), Some(cents(25)), None, Some(cents(-15))]
    );
    let cheese = ProductKey::new("cheese", "dairy");
    assert_eq!(
        series.deltas_for(&cheese).unwrap(),
        &[None, None, Some(cents(4590)), Some(cents(0))]
    );
}

#[tokio::test]
async fn reconcile_keeps_later_capture_of_a_day_by_default() {
    let series = mock_trail().reconcile(SOK).await.unwrap();
    let milk = series
        .price_view()
        .get(&ProductKey::new("milk", "dairy"))
        .unwrap();
    assert_eq!(milk[1].value, cents(1050));
    assert_eq!(milk[1].date, nov(2));
}

#[tokio::test]
async fn reconcile_policy_keep_first_and_reject() {
    let first = Pricetrail::builder()
        .with_store(Arc::new(MockStore::new()))
        .duplicate_dates(DuplicateDatePolicy::KeepFirst)
        .build()
        .unwrap();
    let series = first.reconcile(SOK).await.unwrap();
    let milk = series
        .price_view()
        .get(&ProductKey::new("milk", "dairy"))
        .unwrap();
    assert_eq!(milk[1].value, cents(1000));

    let strict = Pricetrail::builder()
        .with_store(Arc::new(MockStore::new()))
        .duplicate_dates(DuplicateDatePolicy::Reject)
        .build()
        .unwrap();
    assert!(matches!(
        strict.reconcile(SOK).await,
        Err(PricetrailError::DuplicateDate { .. })
    ));
    // migros has one capture per day
    assert!(strict.reconcile(MIGROS).await.is_ok());
}

#[tokio::test]
async fn reconcile_sorts_captures_returned_out_of_order() {
    let series = mock_trail().reconcile(MIGROS).await.unwrap();
    assert_eq!(series.collection_dates(), &[nov(1), nov(3), nov(8)]);
    let water: Vec<_> = series.price_view().by_name("water").collect();
    assert_eq!(water.len(), 2);
}

#[tokio::test]
async fn reconcile_unknown_source_is_not_found() {
    let err = mock_trail().reconcile("bim").await.unwrap_err();
    assert!(matches!(err, PricetrailError::NotFound { .. }));
}

#[tokio::test]
async fn reconcile_store_failure_keeps_origin() {
    let err = mock_trail().reconcile("FAIL").await.unwrap_err();
    assert!(matches!(err, PricetrailError::Source { ref name, .. } if name == "FAIL"));
}

#[tokio::test]
async fn reconcile_tags_untagged_store_errors() {
    let (store, controller) = DynamicMockStore::new_with_controller("flaky");
    controller
        .set_behavior(SOK, MockBehavior::Fail(PricetrailError::Other("disk".into())))
        .await;
    let trail = Pricetrail::builder().with_store(store).build().unwrap();
    match trail.reconcile(SOK).await.unwrap_err() {
        PricetrailError::Source { name, msg } => {
            assert_eq!(name, "flaky");
            assert!(msg.contains("disk"));
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn reconcile_hanging_store_times_out() {
    let (store, controller) = DynamicMockStore::new_with_controller("dyn");
    controller.set_behavior(SOK, MockBehavior::Hang).await;
    let trail = Pricetrail::builder()
        .with_store(store)
        .store_timeout(Duration::from_millis(20))
        .build()
        .unwrap();
    let err = trail.reconcile(SOK).await.unwrap_err();
    assert_eq!(err, PricetrailError::store_timeout(SOK));
}

#[tokio::test]
async fn reconcile_source_without_captures_is_empty() {
    let (store, controller) = DynamicMockStore::new_with_controller("dyn");
    controller.set_behavior(SOK, MockBehavior::Return(vec![])).await;
    let trail = Pricetrail::builder().with_store(store).build().unwrap();
    assert_eq!(trail.reconcile(SOK).await.unwrap(), MergedSeries::empty(SOK));
}
