//! Read-only analyses over a reconstructed [`SeriesView`](pricetrail_core::SeriesView).

mod changes;
mod volatility;

pub use changes::{PriceChange, PriceChangeReport, price_changes};
pub use volatility::{VolatilityGroups, most_volatile};

use pricetrail_core::{MergedSeries, NaiveDate};

use crate::Pricetrail;

impl Pricetrail {
    /// [`most_volatile`] over `series` with the configured threshold.
    #[must_use]
    pub fn most_volatile<'a>(&self, series: &'a MergedSeries) -> VolatilityGroups<'a> {
        most_volatile(series.price_view(), self.cfg.analysis.volatility_threshold)
    }

    /// [`price_changes`] over `series` with the configured mode, window and row limit.
    #[must_use]
    pub fn price_changes(&self, series: &MergedSeries, today: NaiveDate) -> PriceChangeReport {
        let a = &self.cfg.analysis;
        price_changes(series.price_view(), a.change_mode, a.window, today, a.max_items)
    }
}
