use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::{Region, RegionId, RegionRequest, RegioError};

/// Invocation capability for one deployed region backend.
///
/// Implementations issue a single request and return the decoded JSON body.
/// Deadlines, cancellation and panic isolation are applied by the orchestrator,
/// so implementations only need to report their own transport failures.
#[async_trait]
pub trait RegionConnector: Send + Sync {
    /// Identity of the region this connector talks to.
    fn region(&self) -> &Region;

    /// Registry key of the region.
    fn id(&self) -> &RegionId {
        &self.region().id
    }

    /// Region-specific deadline used when a call does not override it.
    fn default_timeout(&self) -> Option<Duration> {
        None
    }

    /// Issue `req` against this region.
    ///
    /// # Errors
    /// Returns a transport, status, or data error describing why the region
    /// could not produce a JSON body.
    async fn fetch(&self, req: &RegionRequest) -> Result<Value, RegioError>;
}
