use std::time::Duration;

use regio_core::{RegionId, RegionInvocationResult, RegionRequest, RegioError};
use tokio_util::sync::CancellationToken;

use crate::Regio;

/// Per-call knobs for [`Regio::fan_out`].
#[derive(Debug, Clone, Default)]
pub struct FanOutOptions {
    /// Explicit target subset; `None` targets every registered region.
    pub targets: Option<Vec<RegionId>>,
    /// Per-region deadline override for this call.
    pub timeout: Option<Duration>,
    /// Caller cancellation; in-flight regions settle as `Cancelled` once triggered.
    pub cancel: Option<CancellationToken>,
}

impl FanOutOptions {
    /// Restrict the call to `targets`, in this order.
    #[must_use]
    pub fn targets<I, R>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<RegionId>,
    {
        self.targets = Some(targets.into_iter().map(Into::into).collect());
        self
    }

    /// Override the per-region deadline.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Attach a cancellation token.
    #[must_use]
    pub fn cancel(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }
}

impl Regio {
    /// Invoke `req` against every targeted region concurrently and wait for all
    /// of them to settle.
    ///
    /// Behavior:
    /// - Every call starts before any is awaited; total latency tracks the
    ///   slowest region, bounded by its deadline.
    /// - Exactly one result per targeted region, in target order.
    /// - Region failures, timeouts, cancellations and panics are captured in
    ///   the returned results.
    ///
    /// # Errors
    /// Returns `InvalidArg` for an empty target subset and `UnknownRegion`
    /// for an unregistered target.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            target = "regio::router",
            skip(self, req, opts),
            fields(path = %req.path, targets = ?opts.targets),
        )
    )]
    pub async fn fan_out(
        &self,
        req: &RegionRequest,
        opts: &FanOutOptions,
    ) -> Result<Vec<RegionInvocationResult>, RegioError> {
        let targets = self.registry.select(opts.targets.as_deref())?;
        let tasks = targets.into_iter().map(|c| {
            let timeout = self.effective_timeout(c.as_ref(), opts.timeout);
            Self::invoke_region(c, req, timeout, opts.cancel.as_ref())
        });
        let results = futures::future::join_all(tasks).await;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "regio::router",
            total = results.len(),
            failed = results.iter().filter(|r| !r.success()).count(),
            "fan-out settled"
        );

        Ok(results)
    }
}
