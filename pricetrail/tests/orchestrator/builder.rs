use std::sync::Arc;
use std::time::Duration;

use pricetrail::{KeyEncoding, MergedSeries, Pricetrail, PricetrailError};
use pricetrail_mock::{MockSource, MockStore};

#[test]
fn build_requires_store_or_source() {
    let err = Pricetrail::builder().build().err().unwrap();
    assert!(matches!(err, PricetrailError::InvalidArg(_)));
}

#[test]
fn build_rejects_duplicate_source_names() {
    let err = Pricetrail::builder()
        .with_source(Arc::new(MockSource::new("sok")))
        .with_source(Arc::new(MockSource::new("sok")))
        .build()
        .err()
        .unwrap();
    assert!(matches!(err, PricetrailError::InvalidArg(msg) if msg.contains("sok")));
}

#[test]
fn setters_land_in_config() {
    let trail = Pricetrail::builder()
        .with_store(Arc::new(MockStore::new()))
        .store_timeout(Duration::from_millis(250))
        .request_timeout(Duration::from_secs(2))
        .key_encoding(KeyEncoding::Structured)
        .build()
        .unwrap();
    let cfg = trail.config();
    assert_eq!(cfg.store_timeout, Duration::from_millis(250));
    assert_eq!(cfg.request_timeout, Some(Duration::from_secs(2)));
    assert_eq!(cfg.key_encoding, KeyEncoding::Structured);
}

#[test]
fn encode_uses_configured_key_encoding() {
    let trail = Pricetrail::builder()
        .with_store(Arc::new(MockStore::new()))
        .key_encoding(KeyEncoding::Structured)
        .build()
        .unwrap();
    let raw = trail.encode(&MergedSeries::empty("sok")).unwrap();
    assert!(raw.contains(r#""items":[]"#));
}

#[tokio::test]
async fn reconcile_without_store_is_invalid() {
    let trail = Pricetrail::builder()
        .with_source(Arc::new(MockSource::new("sok")))
        .build()
        .unwrap();
    assert!(matches!(
        trail.reconcile("sok").await,
        Err(PricetrailError::InvalidArg(_))
    ));
}
