//! Extraction of homogeneous item lists from differently-shaped region payloads.

use std::time::Duration;

use serde_json::Value;

use crate::{Provenance, Region, RegioError, TaggedItem};

/// One way of locating the item list inside a region payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractStrategy {
    /// `{"result": {"data": [...]}}`
    ResultData,
    /// `{"result": [...]}`
    Result,
    /// `[...]`
    Bare,
}

impl ExtractStrategy {
    /// Strategies in the order they are tried; the first match wins.
    pub const ORDERED: [Self; 3] = [Self::ResultData, Self::Result, Self::Bare];

    /// Borrow the list this strategy points at, if present.
    #[must_use]
    pub fn extract(self, payload: &Value) -> Option<&Vec<Value>> {
        match self {
            Self::ResultData => payload.get("result")?.get("data")?.as_array(),
            Self::Result => payload.get("result")?.as_array(),
            Self::Bare => payload.as_array(),
        }
    }

    fn take(self, payload: Value) -> Option<Vec<Value>> {
        let field = |v: Value, key: &str| match v {
            Value::Object(mut map) => map.remove(key),
            _ => None,
        };
        let list = match self {
            Self::ResultData => field(field(payload, "result")?, "data")?,
            Self::Result => field(payload, "result")?,
            Self::Bare => payload,
        };
        match list {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }
}

/// First strategy that finds a list in `payload`.
#[must_use]
pub fn detect_strategy(payload: &Value) -> Option<ExtractStrategy> {
    ExtractStrategy::ORDERED
        .into_iter()
        .find(|s| s.extract(payload).is_some())
}

/// Take ownership of the item list in `payload`, if any strategy finds one.
#[must_use]
pub fn extract_items(payload: Value) -> Option<Vec<Value>> {
    detect_strategy(&payload)?.take(payload)
}

/// Items of one region after extraction and tagging.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRegion {
    /// Tagged items in the region's own order.
    pub items: Vec<TaggedItem>,
    /// Set when the payload had no recognizable list.
    pub warning: Option<RegioError>,
}

/// Extract and tag the items of a successful region payload.
///
/// A payload with no recognizable list contributes no items and an
/// `UnexpectedShape` warning instead of failing the aggregate.
#[must_use]
pub fn normalize_payload(region: &Region, latency: Duration, payload: Value) -> NormalizedRegion {
    let Some(raw) = extract_items(payload) else {
        #[cfg(feature = "tracing")]
        tracing::warn!(
            target: "regio::normalize",
            region = %region.id,
            "payload has no list under result.data, result, or root; contributing no items"
        );
        return NormalizedRegion {
            items: Vec::new(),
            warning: Some(RegioError::UnexpectedShape {
                region: region.id.to_string(),
            }),
        };
    };
    let tag = Provenance::new(region, latency);
    NormalizedRegion {
        items: raw
            .into_iter()
            .map(|item| TaggedItem::new(item, tag.clone()))
            .collect(),
        warning: None,
    }
}
