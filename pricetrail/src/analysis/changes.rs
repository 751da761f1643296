use std::cmp::Reverse;

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;

use pricetrail_core::{ChangeWindow, Price, PriceChangeMode, ProductKey, SeriesView};

/// One product's movement between the two compared samples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceChange {
    /// Product the samples belong to.
    pub key: ProductKey,
    /// Earlier compared sample.
    pub from: Price,
    /// Latest sample.
    pub to: Price,
}

impl PriceChange {
    /// Signed change `to − from`.
    #[must_use]
    pub fn change(&self) -> Decimal {
        self.to - self.from
    }
}

/// Price rises and drops, each ranked by magnitude.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceChangeReport {
    /// Largest rise first.
    pub increased: Vec<PriceChange>,
    /// Largest drop first.
    pub decreased: Vec<PriceChange>,
}

fn window_start(window: ChangeWindow, today: NaiveDate) -> Option<NaiveDate> {
    let yesterday = today.checked_sub_days(Days::new(1))?;
    match window {
        ChangeWindow::Daily => Some(yesterday),
        ChangeWindow::Weekly => yesterday.checked_sub_days(Days::new(7)),
        #[allow(clippy::wildcard_in_or_patterns)]
        ChangeWindow::All | _ => None,
    }
}

/// Rank products whose price moved between two of their samples.
///
/// Only products with at least two samples take part. `mode` picks the pair
/// compared against the latest sample; `window` drops products whose latest
/// sample is older than the window start (`today` minus one day, minus a
/// further week for [`ChangeWindow::Weekly`]). Unchanged products are
/// dropped. Ties keep key order. Each list holds at most `max_items` rows.
#[must_use]
pub fn price_changes(
    view: &SeriesView,
    mode: PriceChangeMode,
    window: ChangeWindow,
    today: NaiveDate,
    max_items: usize,
) -> PriceChangeReport {
    let start = window_start(window, today);
    let mut report = PriceChangeReport::default();

    for (key, prices) in view.iter() {
        let [.., before_last, last] = prices else {
            continue;
        };
        if let Some(start) = start
            && last.date < start
        {
            continue;
        }
        let from = match mode {
            PriceChangeMode::FirstLast => prices[0],
            #[allow(clippy::wildcard_in_or_patterns)]
            PriceChangeMode::LatestPair | _ => *before_last,
        };
        let row = PriceChange {
            key: key.clone(),
            from,
            to: *last,
        };
        match row.change() {
            c if c > Decimal::ZERO => report.increased.push(row),
            c if c < Decimal::ZERO => report.decreased.push(row),
            _ => {}
        }
    }

    // Stable sorts keep key order among equal changes.
    report.increased.sort_by_key(|r| Reverse(r.change()));
    report.decreased.sort_by_key(PriceChange::change);
    report.increased.truncate(max_items);
    report.decreased.truncate(max_items);
    report
}
