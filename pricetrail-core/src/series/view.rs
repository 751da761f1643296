use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::model::{MergedSeries, Price, ProductKey};

/// Absolute price history per product, derived from a [`MergedSeries`].
///
/// Each sequence is date-ascending and has one [`Price`] per non-`None` delta.
/// Obtain a cached instance with [`MergedSeries::price_view`]; the returned
/// sequences are shared and must be treated as read-only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeriesView {
    prices: BTreeMap<ProductKey, Vec<Price>>,
}

impl SeriesView {
    /// Rebuild absolute prices by running-summing each product's deltas.
    ///
    /// `None` slots emit nothing. The first present delta starts from zero, so
    /// it becomes the product's absolute starting price.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "pricetrail_core::reconstruct",
            skip_all,
            fields(source = %series.name(), slots = series.slot_count()),
        )
    )]
    #[must_use]
    pub fn reconstruct(series: &MergedSeries) -> Self {
        let dates = series.collection_dates();
        let prices = series
            .deltas()
            .iter()
            .map(|(key, seq)| {
                let mut running: Option<Decimal> = None;
                let samples: Vec<Price> = seq
                    .iter()
                    .zip(dates)
                    .filter_map(|(delta, date)| {
                        let delta = (*delta)?;
                        let price = running.unwrap_or(Decimal::ZERO) + delta;
                        running = Some(price);
                        Some(Price::new(price, *date))
                    })
                    .collect();
                (key.clone(), samples)
            })
            .collect();
        Self { prices }
    }

    /// Price history of one product.
    #[must_use]
    pub fn get(&self, key: &ProductKey) -> Option<&[Price]> {
        self.prices.get(key).map(Vec::as_slice)
    }

    /// Every product history whose key carries `name`, across categories.
    pub fn by_name<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = (&'a ProductKey, &'a [Price])> + 'a {
        self.prices
            .iter()
            .filter(move |(key, _)| key.name == name)
            .map(|(key, prices)| (key, prices.as_slice()))
    }

    /// Most recent sample of one product.
    #[must_use]
    pub fn latest(&self, key: &ProductKey) -> Option<&Price> {
        self.prices.get(key).and_then(|p| p.last())
    }

    /// Iterate over all products in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&ProductKey, &[Price])> {
        self.prices.iter().map(|(key, prices)| (key, prices.as_slice()))
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    /// True if the view has no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}
