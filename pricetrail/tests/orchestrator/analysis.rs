use std::sync::Arc;

use crate::helpers::{SOK, cents, mock_trail, nov};
use pricetrail::analysis::{most_volatile, price_changes};
use pricetrail::{
    AnalysisConfig, ChangeWindow, Item, PriceChangeMode, Pricetrail, ProductKey, Reconciler,
    Snapshot,
};
use pricetrail_mock::MockStore;

#[tokio::test]
async fn volatility_groups_by_sample_count() {
    let series = mock_trail().reconcile(SOK).await.unwrap();
    let groups = most_volatile(series.price_view(), 2);
    // milk and bread have 4 samples, eggs 3, cheese 2 (dropped).
    assert_eq!(groups.keys().copied().collect::<Vec<_>>(), vec![3, 4]);
    let four: Vec<&str> = groups[&4].iter().map(|(k, _)| k.name.as_str()).collect();
    assert_eq!(four, vec!["bread", "milk"]);

    // The default threshold of 3 needs strictly more than 3 samples.
    let trail = mock_trail();
    assert_eq!(trail.most_volatile(&series).keys().copied().collect::<Vec<_>>(), vec![4]);
}

#[tokio::test]
async fn latest_pair_changes_are_ranked() {
    let series = mock_trail().reconcile(SOK).await.unwrap();
    let report = price_changes(
        series.price_view(),
        PriceChangeMode::LatestPair,
        ChangeWindow::All,
        nov(30),
        50,
    );
    // Of the last two samples per product only eggs differ (3.25 on 11-02, 3.10 on 11-05).
    assert!(report.increased.is_empty());
    assert_eq!(report.decreased.len(), 1);
    assert_eq!(report.decreased[0].key, ProductKey::new("eggs", "dairy"));
    assert_eq!(report.decreased[0].change(), cents(-15));
    assert_eq!(report.decreased[0].from.date, nov(2));
}

#[tokio::test]
async fn first_last_changes_are_ranked() {
    let series = mock_trail().reconcile(SOK).await.unwrap();
    let report = price_changes(
        series.price_view(),
        PriceChangeMode::FirstLast,
        ChangeWindow::All,
        nov(30),
        50,
    );
    let rises: Vec<(&str, _)> = report
        .increased
        .iter()
        .map(|r| (r.key.name.as_str(), r.change()))
        .collect();
    assert_eq!(rises, vec![("milk", cents(250)), ("bread", cents(25)), ("eggs", cents(10))]);
    assert!(report.decreased.is_empty());
}

#[test]
fn windows_filter_on_latest_sample() {
    let mut batch = std::collections::BTreeMap::new();
    let snap = |rows: &[(&str, i64)]| {
        Snapshot::new(
            "a101",
            rows.iter().map(|(n, c)| Item::new(*n, cents(*c), "misc")),
        )
    };
    batch.insert(nov(1), snap(&[("old", 100), ("weekly", 100), ("daily", 100)]));
    batch.insert(nov(2), snap(&[("old", 200)]));
    batch.insert(nov(15), snap(&[("weekly", 200)]));
    batch.insert(nov(22), snap(&[("daily", 50)]));
    let series = Reconciler::merge("a101", batch);
    let view = series.price_view();
    let today = nov(23);

    let names = |w| {
        let r = price_changes(view, PriceChangeMode::LatestPair, w, today, 50);
        let mut v: Vec<String> = r
            .increased
            .iter()
            .chain(&r.decreased)
            .map(|c| c.key.name.clone())
            .collect();
        v.sort();
        v
    };
    assert_eq!(names(ChangeWindow::All), vec!["daily", "old", "weekly"]);
    // 11-22 is the first day inside the daily window; 11-15 the first inside the weekly one.
    assert_eq!(names(ChangeWindow::Weekly), vec!["daily", "weekly"]);
    assert_eq!(names(ChangeWindow::Daily), vec!["daily"]);
}

#[test]
fn max_items_truncates_each_direction() {
    let mut batch = std::collections::BTreeMap::new();
    let first: Vec<Item> = (0..5)
        .map(|i| Item::new(format!("p{i}"), cents(1000), "misc"))
        .collect();
    let second: Vec<Item> = (0..5)
        .map(|i| Item::new(format!("p{i}"), cents(1000 + (i - 2) * 100), "misc"))
        .collect();
    batch.insert(nov(1), Snapshot::new("a101", first));
    batch.insert(nov(2), Snapshot::new("a101", second));
    let series = Reconciler::merge("a101", batch);

    let trail = Pricetrail::builder()
        .with_store(Arc::new(MockStore::new()))
        .analysis(AnalysisConfig {
            max_items: 1,
            ..AnalysisConfig::default()
        })
        .build()
        .unwrap();
    let report = trail.price_changes(&series, nov(3));
    assert_eq!(report.increased.len(), 1);
    assert_eq!(report.increased[0].key.name, "p4");
    assert_eq!(report.decreased.len(), 1);
    assert_eq!(report.decreased[0].key.name, "p0");
}
