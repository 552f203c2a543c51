//! Provenance types for merged multi-region collections.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::region::{Region, RegionId};

/// Which region produced an item and how long that region's call took.
///
/// A non-owning back-reference: it records origin only and is never used to
/// mutate the item it is attached to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provenance {
    /// Region id.
    pub region: RegionId,
    /// Region display name.
    pub display_name: String,
    /// Measured latency of the region call that produced the item.
    #[serde(rename = "latencyMs", with = "duration_ms")]
    pub latency: Duration,
}

impl Provenance {
    /// Tag for items produced by `region` in a call that took `latency`.
    #[must_use]
    pub fn new(region: &Region, latency: Duration) -> Self {
        Self {
            region: region.id.clone(),
            display_name: region.display_name.clone(),
            latency,
        }
    }
}

/// A raw regional item plus exactly one provenance tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggedItem {
    /// Item exactly as the region returned it.
    pub item: Value,
    /// Origin of the item.
    pub provenance: Provenance,
}

impl TaggedItem {
    /// Wrap `item` with `provenance`.
    #[must_use]
    pub const fn new(item: Value, provenance: Provenance) -> Self {
        Self { item, provenance }
    }

    /// Region that produced this item.
    #[must_use]
    pub const fn region(&self) -> &RegionId {
        &self.provenance.region
    }
}

/// Serialize a `Duration` as whole milliseconds.
pub mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    /// Serialize as `u64` milliseconds, saturating.
    ///
    /// # Errors
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }

    /// Deserialize from `u64` milliseconds.
    ///
    /// # Errors
    /// Propagates deserializer errors.
    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}
