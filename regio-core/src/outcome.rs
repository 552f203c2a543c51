use crate::invocation::RegionInvocationResult;
use crate::merge::{SortKey, merge_sorted};
use crate::normalize::normalize_payload;
use crate::{
    AggregateEnvelope, AggregateStatus, CollectionPage, MultiRegionMetadata, RegionSummary,
    RegioError, TaggedItem,
};

/// Fan-in of one aggregation: merged items plus per-region accounting.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateOutcome {
    /// Overall status derived from the per-region counts.
    pub status: AggregateStatus,
    /// Merged, sorted items of every successful region.
    pub items: Vec<TaggedItem>,
    /// One line per targeted region, in fan-out order.
    pub per_region: Vec<RegionSummary>,
    /// Regions that produced a body.
    pub total_succeeded: usize,
    /// Regions that failed, timed out, or were cancelled.
    pub total_failed: usize,
    /// Captured per-region failures and normalization warnings.
    pub warnings: Vec<RegioError>,
}

impl AggregateOutcome {
    /// Normalize, merge, and account for a settled fan-out.
    ///
    /// Never fails: a fan-out where every region failed yields a `Failure`
    /// outcome with no items.
    #[must_use]
    pub fn from_results(results: Vec<RegionInvocationResult>, key: &SortKey) -> Self {
        let mut per_region = Vec::with_capacity(results.len());
        let mut lists = Vec::with_capacity(results.len());
        let mut warnings = Vec::new();
        let mut total_succeeded = 0;
        let mut total_failed = 0;

        for r in results {
            per_region.push(r.summary());
            match r.outcome {
                Ok(payload) => {
                    total_succeeded += 1;
                    let normalized = normalize_payload(&r.region, r.latency, payload);
                    warnings.extend(normalized.warning);
                    lists.push(normalized.items);
                }
                Err(e) => {
                    total_failed += 1;
                    warnings.push(e);
                }
            }
        }

        Self {
            status: AggregateStatus::from_counts(total_succeeded, total_failed),
            items: merge_sorted(lists, key),
            per_region,
            total_succeeded,
            total_failed,
            warnings,
        }
    }

    /// Metadata block surfaced to callers.
    #[must_use]
    pub fn metadata(&self) -> MultiRegionMetadata {
        MultiRegionMetadata {
            total_regions: self.per_region.len(),
            succeeded_regions: self.total_succeeded,
            failed_regions: self.total_failed,
            per_region: self.per_region.clone(),
        }
    }

    /// Captured per-region failures, excluding normalization warnings.
    #[must_use]
    pub fn region_errors(&self) -> Vec<RegioError> {
        self.per_region
            .iter()
            .filter_map(|s| s.error.clone())
            .collect()
    }

    /// Assemble the caller-facing envelope.
    ///
    /// `total` is the merged item count, never a sum of regional totals.
    #[must_use]
    pub fn into_envelope(self, page: u32, limit: u32) -> AggregateEnvelope {
        let metadata = self.metadata();
        AggregateEnvelope {
            status: self.status,
            status_code: self.status.status_code(),
            result: CollectionPage::new(self.items, page, limit),
            multi_region_metadata: Some(metadata),
            warnings: self.warnings,
        }
    }
}
