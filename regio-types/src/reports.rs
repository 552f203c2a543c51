//! Envelopes produced by the orchestrator for callers.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::RegioError;
use crate::provenance::{TaggedItem, duration_ms};
use crate::region::RegionId;

/// Overall outcome of a multi-region aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AggregateStatus {
    /// Every targeted region succeeded.
    Success,
    /// At least one region succeeded and at least one failed.
    PartialSuccess,
    /// Every targeted region failed.
    Failure,
}

impl AggregateStatus {
    /// Derive the status from per-region counts.
    ///
    /// Zero targeted regions never reaches here; it is reported as `Failure`.
    #[must_use]
    pub const fn from_counts(succeeded: usize, failed: usize) -> Self {
        match (succeeded, failed) {
            (0, _) => Self::Failure,
            (_, 0) => Self::Success,
            _ => Self::PartialSuccess,
        }
    }

    /// HTTP-style status code surfaced to callers: 200, 207 or 503.
    #[must_use]
    pub const fn status_code(self) -> u16 {
        match self {
            Self::Success => 200,
            Self::PartialSuccess => 207,
            Self::Failure => 503,
        }
    }
}

/// Per-region line of the metadata block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionSummary {
    /// Region id.
    pub region: RegionId,
    /// Whether the region call succeeded.
    pub success: bool,
    /// Measured latency of the region call.
    #[serde(rename = "latencyMs", with = "duration_ms")]
    pub latency: Duration,
    /// Captured failure, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RegioError>,
}

/// Metadata describing how the regions contributed to an aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MultiRegionMetadata {
    /// Number of targeted regions.
    pub total_regions: usize,
    /// Regions that answered successfully.
    pub succeeded_regions: usize,
    /// Regions that failed, timed out or were cancelled.
    pub failed_regions: usize,
    /// One entry per targeted region, in fan-out order.
    pub per_region: Vec<RegionSummary>,
}

/// Page of merged items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionPage {
    /// Merged and sorted items.
    pub data: Vec<TaggedItem>,
    /// Requested page.
    pub page: u32,
    /// Requested page size (per region).
    pub limit: u32,
    /// Number of merged items; always `data.len()`.
    pub total: usize,
}

impl CollectionPage {
    /// Build a page; `total` is derived from `data`.
    #[must_use]
    pub fn new(data: Vec<TaggedItem>, page: u32, limit: u32) -> Self {
        let total = data.len();
        Self {
            data,
            page,
            limit,
            total,
        }
    }
}

/// Final caller-facing envelope.
///
/// The shape is identical whether the data came from the fan-out or from the
/// home-region fallback; only `multi_region_metadata` is absent on fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateEnvelope {
    /// Overall outcome.
    pub status: AggregateStatus,
    /// Merged page.
    pub result: CollectionPage,
    /// 200 on success, 207 on partial success, 503 on failure.
    pub status_code: u16,
    /// Present when the fan-out produced the data (or failed).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multi_region_metadata: Option<MultiRegionMetadata>,
    /// Non-fatal issues: per-region failures, normalization warnings, fallback errors.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<RegioError>,
}

impl AggregateEnvelope {
    /// Merged items.
    #[must_use]
    pub fn items(&self) -> &[TaggedItem] {
        &self.result.data
    }

    /// True when the data came from the home-region fallback.
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        self.multi_region_metadata.is_none()
    }
}
