use std::sync::Arc;

use pricetrail::{NaiveDate, Pricetrail, SnapshotDiff, SnapshotStore};
use pricetrail_mock::{MockSource, MockStore};
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Suggested: RUST_LOG=info,pricetrail=debug,pricetrail_core=debug (with --features tracing)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_span_events(FmtSpan::CLOSE)
        .try_init();

    // 1. Wire the fixture store and two live catalogs into the orchestrator.
    let store = Arc::new(MockStore::new());
    let trail = Pricetrail::builder()
        .with_store(store.clone())
        .with_source(Arc::new(MockSource::new("sok")))
        .with_source(Arc::new(MockSource::new("migros")))
        .build()?;

    // 2. Reconcile every stored source into a delta-encoded series.
    let report = trail.reconcile_all().await?;
    for warning in &report.warnings {
        println!("warning: {warning}");
    }
    let mut series = report.series;

    // 3. Capture today's catalogs and append them as a new slot.
    let today = NaiveDate::from_ymd_opt(2021, 11, 9).ok_or("invalid date")?;
    let capture = trail.capture(today).await?;
    capture.append_to(&mut series)?;

    for (name, merged) in &series {
        println!(
            "{name}: {} products over {} collection dates",
            merged.product_count(),
            merged.slot_count()
        );

        // 4. What moved since the previous capture?
        let changes = trail.price_changes(merged, today);
        for row in &changes.increased {
            println!(
                "  + {:<12} {} -> {} [{} -> {}]",
                row.key.name, row.from, row.to, row.from.date, row.to.date
            );
        }
        for row in &changes.decreased {
            println!(
                "  - {:<12} {} -> {} [{} -> {}]",
                row.key.name, row.from, row.to, row.from.date, row.to.date
            );
        }

        // 5. Products with the longest histories.
        for (samples, group) in trail.most_volatile(merged).iter().rev().take(1) {
            let names: Vec<String> = group.iter().map(|(k, _)| k.to_string()).collect();
            println!("  {samples} samples: {}", names.join(", "));
        }
    }

    // 6. Compare today's sok catalog with the latest stored capture.
    let mut stored = store.dated_snapshots("sok").await?;
    stored.sort_by_key(|(date, _)| *date);
    if let (Some((_, previous)), Some(current)) = (stored.last(), capture.snapshots.get("sok")) {
        let diff = SnapshotDiff::between(previous, current);
        println!(
            "sok diff: {} added, {} removed, {} repriced",
            diff.added.len(),
            diff.removed.len(),
            diff.changed.len()
        );
    }

    // 7. Persist with the configured key encoding.
    if let Some(sok) = series.get("sok") {
        println!("{}", trail.encode(sok)?);
    }

    Ok(())
}
