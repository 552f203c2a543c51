//! Deterministic merge of per-region item lists.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::{Collection, SortOrder, TaggedItem};

/// Caller-specified ordering: candidate timestamp fields plus a direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    fields: Vec<String>,
    order: SortOrder,
}

impl SortKey {
    /// Order by the first resolvable field among `fields`, in `order`.
    pub fn new<I, S>(fields: I, order: SortOrder) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
            order,
        }
    }

    /// Default key for a collection: `actionAt`, then the collection timestamp.
    #[must_use]
    pub fn for_collection(collection: Collection, order: SortOrder) -> Self {
        Self::new(collection.sort_fields(), order)
    }

    /// Candidate fields in priority order.
    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Sort direction.
    #[must_use]
    pub const fn order(&self) -> SortOrder {
        self.order
    }

    /// Resolve an item's key as epoch milliseconds.
    ///
    /// The first candidate field that is present and parses as a timestamp wins.
    #[must_use]
    pub fn resolve(&self, item: &Value) -> Option<i64> {
        self.fields
            .iter()
            .filter_map(|f| item.get(f))
            .find_map(parse_timestamp_millis)
    }

    /// Compare two resolved keys.
    ///
    /// Unresolved keys are equal to each other and sort after every resolved
    /// key in both directions, which keeps the order total.
    #[must_use]
    pub fn compare(&self, a: Option<i64>, b: Option<i64>) -> Ordering {
        match (a, b) {
            (Some(x), Some(y)) => match self.order {
                SortOrder::Asc => x.cmp(&y),
                SortOrder::Desc => y.cmp(&x),
            },
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

/// Parse a JSON timestamp into epoch milliseconds.
///
/// Accepts RFC 3339 strings, naive `YYYY-MM-DDTHH:MM:SS[.f]` and
/// `YYYY-MM-DD HH:MM:SS[.f]` (read as UTC), date-only `YYYY-MM-DD`, integer
/// strings, and JSON numbers, all numbers being epoch milliseconds.
#[must_use]
pub fn parse_timestamp_millis(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => n
            .as_i64()
            // saturating float-to-int cast; NaN cannot occur in serde_json numbers
            .or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => parse_timestamp_str(s.trim()),
        _ => None,
    }
}

fn parse_timestamp_str(s: &str) -> Option<i64> {
    if s.is_empty() {
        return None;
    }
    if let Ok(ms) = s.parse::<i64>() {
        return Some(ms);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc().timestamp_millis());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().timestamp_millis())
}

/// Concatenate per-region lists in the given order and stable-sort by `key`.
///
/// Items with equal keys keep their concatenation order: earlier regions
/// first, then each region's own order.
#[must_use]
pub fn merge_sorted<I>(lists: I, key: &SortKey) -> Vec<TaggedItem>
where
    I: IntoIterator<Item = Vec<TaggedItem>>,
{
    let mut keyed: Vec<(Option<i64>, TaggedItem)> = lists
        .into_iter()
        .flatten()
        .map(|t| (key.resolve(&t.item), t))
        .collect();
    // slice::sort_by is stable
    keyed.sort_by(|(a, _), (b, _)| key.compare(*a, *b));
    keyed.into_iter().map(|(_, t)| t).collect()
}
