//! Persisted JSON representation.
//!
//! Snapshot:
//! ```json
//! { "name": "sok", "items": [ { "name": "..", "price": 12.5, "category": "..", "metadata": {} } ] }
//! ```
//!
//! Merged series (joined keys):
//! ```json
//! { "name": "sok",
//!   "items": { "milk\u001fdairy": [10.0, null, 2.5] },
//!   "collection_dates": ["20211101", "20211102", "20211103"] }
//! ```
//!
//! With structured keys `items` is an array of
//! `{ "key": { "name": .., "category": .. }, "deltas": [..] }`. Decoding accepts
//! both forms; encoding uses the requested [`KeyEncoding`].

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::model::{MergedSeries, ProductKey, Snapshot};
use pricetrail_types::{KeyEncoding, PricetrailError, Result};

/// Format of collection dates on the wire (`20211107`).
pub const DATE_FORMAT: &str = "%Y%m%d";

/// Format of snapshot file stems written by capture jobs (`211107_093000`).
pub const SNAPSHOT_STEM_FORMAT: &str = "%y%m%d_%H%M%S";

/// Separator between name and category in a joined product key (ASCII unit separator).
pub const KEY_SEPARATOR: char = '\u{1f}';

/// Serde adapter: prices as JSON numbers, rounded to two fractional digits on read.
pub(crate) mod price_float {
    use rust_decimal::Decimal;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(value, serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
        rust_decimal::serde::float::deserialize(deserializer).map(crate::model::round_price)
    }
}

// Deltas travel as plain numbers and are never re-rounded.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(transparent)]
struct WireDelta(#[serde(with = "rust_decimal::serde::float")] Decimal);

type WireDeltas = Vec<Option<WireDelta>>;

#[derive(Debug, Serialize, Deserialize)]
struct StructuredEntry {
    key: ProductKey,
    deltas: WireDeltas,
}

// Joined entries in document order. A map type would let a repeated key
// overwrite the earlier one before the decoder could see it.
#[derive(Debug)]
struct JoinedItems(Vec<(String, WireDeltas)>);

impl Serialize for JoinedItems {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, seq) in &self.0 {
            map.serialize_entry(key, seq)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for JoinedItems {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> serde::de::Visitor<'de> for EntriesVisitor {
            type Value = JoinedItems;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("an object of joined product keys to delta sequences")
            }

            fn visit_map<A: serde::de::MapAccess<'de>>(
                self,
                mut access: A,
            ) -> core::result::Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some(entry) = access.next_entry::<String, WireDeltas>()? {
                    entries.push(entry);
                }
                Ok(JoinedItems(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum WireItems {
    Joined(JoinedItems),
    Structured(Vec<StructuredEntry>),
}

#[derive(Debug, Serialize, Deserialize)]
struct MergedSeriesDoc {
    name: String,
    items: WireItems,
    collection_dates: Vec<String>,
}

/// Encode a product key as `name` + [`KEY_SEPARATOR`] + `category`.
///
/// # Errors
/// Returns `Encode` if the name contains the separator; such a key could not
/// be split back unambiguously.
pub fn encode_key(key: &ProductKey) -> Result<String> {
    if key.name.contains(KEY_SEPARATOR) {
        return Err(PricetrailError::Encode(format!(
            "product name {:?} contains the key separator",
            key.name
        )));
    }
    Ok(format!("{}{KEY_SEPARATOR}{}", key.name, key.category))
}

/// Split a joined key at its first separator.
///
/// # Errors
/// Returns `Decode` if the separator is missing.
pub fn decode_key(raw: &str) -> Result<ProductKey> {
    raw.split_once(KEY_SEPARATOR)
        .map(|(name, category)| ProductKey::new(name, category))
        .ok_or_else(|| PricetrailError::decode(format!("product key {raw:?} has no separator")))
}

/// Format a collection date with [`DATE_FORMAT`].
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a collection date written with [`DATE_FORMAT`].
///
/// # Errors
/// Returns `Decode` if the string is not a valid compact date.
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|e| PricetrailError::decode(format!("collection date {raw:?}: {e}")))
}

/// Calendar date of a snapshot file stem such as `211107_093000` or
/// `211107_093000.json.gz`. The time of day is dropped.
///
/// # Errors
/// Returns `Decode` if the stem does not follow [`SNAPSHOT_STEM_FORMAT`].
pub fn parse_snapshot_stem(stem: &str) -> Result<NaiveDate> {
    let bare = stem.split('.').next().unwrap_or(stem);
    NaiveDateTime::parse_from_str(bare, SNAPSHOT_STEM_FORMAT)
        .map(|dt| dt.date())
        .map_err(|e| PricetrailError::decode(format!("snapshot stem {stem:?}: {e}")))
}

fn encode_doc(series: &MergedSeries, encoding: KeyEncoding) -> Result<MergedSeriesDoc> {
    let wire = |seq: &[Option<Decimal>]| -> WireDeltas {
        seq.iter().map(|d| d.map(WireDelta)).collect()
    };
    let items = match encoding {
        KeyEncoding::Structured => WireItems::Structured(
            series
                .deltas()
                .iter()
                .map(|(key, seq)| StructuredEntry {
                    key: key.clone(),
                    deltas: wire(seq),
                })
                .collect(),
        ),
        // Joined also covers encodings added later.
        #[allow(clippy::wildcard_in_or_patterns)]
        KeyEncoding::Joined | _ => WireItems::Joined(JoinedItems(
            series
                .deltas()
                .iter()
                .map(|(key, seq)| Ok((encode_key(key)?, wire(seq))))
                .collect::<Result<_>>()?,
        )),
    };
    Ok(MergedSeriesDoc {
        name: series.name().to_string(),
        items,
        collection_dates: series
            .collection_dates()
            .iter()
            .copied()
            .map(format_date)
            .collect(),
    })
}

fn decode_doc(doc: MergedSeriesDoc) -> Result<MergedSeries> {
    let dates = doc
        .collection_dates
        .iter()
        .map(String::as_str)
        .map(parse_date)
        .collect::<Result<Vec<_>>>()?;

    let unwire = |seq: WireDeltas| -> Vec<Option<Decimal>> {
        seq.into_iter().map(|d| d.map(|WireDelta(v)| v)).collect()
    };
    let entries: Vec<(ProductKey, WireDeltas)> = match doc.items {
        WireItems::Joined(JoinedItems(pairs)) => pairs
            .into_iter()
            .map(|(raw, seq)| Ok((decode_key(&raw)?, seq)))
            .collect::<Result<_>>()?,
        WireItems::Structured(entries) => entries.into_iter().map(|e| (e.key, e.deltas)).collect(),
    };
    let mut deltas: BTreeMap<ProductKey, Vec<Option<Decimal>>> = BTreeMap::new();
    for (key, seq) in entries {
        if deltas.contains_key(&key) {
            return Err(PricetrailError::decode(format!(
                "product key {key} appears twice"
            )));
        }
        deltas.insert(key, unwire(seq));
    }

    crate::model::check_invariants(&dates, &deltas).map_err(PricetrailError::Decode)?;
    Ok(MergedSeries::from_parts_unchecked(doc.name, dates, deltas))
}

impl MergedSeries {
    /// Serialize to a JSON string using `encoding` for product keys.
    ///
    /// # Errors
    /// Returns `Encode` if a key cannot be expressed in `encoding`.
    pub fn to_json(&self, encoding: KeyEncoding) -> Result<String> {
        let doc = encode_doc(self, encoding)?;
        serde_json::to_string(&doc).map_err(|e| PricetrailError::Encode(e.to_string()))
    }

    /// Parse a JSON string written by [`MergedSeries::to_json`] (either key encoding).
    ///
    /// # Errors
    /// Returns `Decode` on malformed JSON, keys, or dates, or if the decoded
    /// data violates the series invariants. No partial series is returned.
    pub fn from_json(raw: &str) -> Result<Self> {
        let doc: MergedSeriesDoc =
            serde_json::from_str(raw).map_err(|e| PricetrailError::decode(e.to_string()))?;
        decode_doc(doc)
    }
}

impl Serialize for MergedSeries {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        encode_doc(self, KeyEncoding::Joined)
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for MergedSeries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        let doc = MergedSeriesDoc::deserialize(deserializer)?;
        decode_doc(doc).map_err(serde::de::Error::custom)
    }
}

impl Snapshot {
    /// Serialize to a JSON string.
    ///
    /// # Errors
    /// Returns `Encode` if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| PricetrailError::Encode(e.to_string()))
    }

    /// Parse a snapshot, deduplicating its items.
    ///
    /// # Errors
    /// Returns `Decode` on malformed JSON.
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| PricetrailError::decode(e.to_string()))
    }
}
