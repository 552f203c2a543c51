use std::time::Duration;

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::{ErrorKind, Region, RegionSummary, RegioError};

/// Settled outcome of one region call.
///
/// Created fresh per call and consumed by the normalizer; exactly one exists
/// per targeted region regardless of how the call ended.
#[derive(Debug, Clone)]
pub struct RegionInvocationResult {
    /// Region that was invoked.
    pub region: Region,
    /// Raw JSON body on success, captured failure otherwise.
    pub outcome: Result<Value, RegioError>,
    /// Time from launch to settlement.
    pub latency: Duration,
    /// Wall-clock launch time.
    pub attempted_at: DateTime<Utc>,
}

impl RegionInvocationResult {
    /// Whether the region produced a body.
    #[must_use]
    pub const fn success(&self) -> bool {
        self.outcome.is_ok()
    }

    /// Captured failure, if any.
    #[must_use]
    pub fn error(&self) -> Option<&RegioError> {
        self.outcome.as_ref().err()
    }

    /// Classification of the captured failure, if any.
    #[must_use]
    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.error().map(RegioError::kind)
    }

    /// Metadata line for this region.
    #[must_use]
    pub fn summary(&self) -> RegionSummary {
        RegionSummary {
            region: self.region.id.clone(),
            success: self.success(),
            latency: self.latency,
            error: self.error().cloned(),
        }
    }
}
