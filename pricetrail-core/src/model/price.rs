use core::cmp::Ordering;
use core::fmt;
use core::ops::Sub;

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Fractional digits kept for prices entering the model.
pub const PRICE_SCALE: u32 = 2;

pub(crate) fn round_price(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointNearestEven)
}

/// An absolute price observed on a collection date.
///
/// Ordering and subtraction look at the value; the date is carried along for
/// display and recency filters. Ties on value fall back to the date so that
/// `Ord` agrees with `Eq`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Price {
    /// Absolute value, rounded to [`PRICE_SCALE`] fractional digits.
    #[serde(with = "crate::codec::price_float")]
    pub value: Decimal,
    /// Collection date the value was observed on.
    pub date: NaiveDate,
}

impl Price {
    /// Build a price, rounding `value` to [`PRICE_SCALE`] fractional digits.
    #[must_use]
    pub fn new(value: Decimal, date: NaiveDate) -> Self {
        Self {
            value: round_price(value),
            date,
        }
    }
}

impl PartialOrd for Price {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Price {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value
            .cmp(&other.value)
            .then_with(|| self.date.cmp(&other.date))
    }
}

impl Sub for Price {
    type Output = Decimal;

    fn sub(self, rhs: Self) -> Decimal {
        self.value - rhs.value
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.value)
    }
}
