use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use regio_core::{
    AggregatorConfig, Region, RegionConnector, RegionId, RegionInvocationResult, RegionRegistry,
    RegionRequest, RegioError,
};
use tokio_util::sync::CancellationToken;

/// Orchestrator that fans a request out across registered regions.
pub struct Regio {
    pub(crate) registry: Arc<RegionRegistry>,
    pub(crate) cfg: AggregatorConfig,
    pub(crate) home: Arc<dyn RegionConnector>,
}

/// Builder for constructing a `Regio` orchestrator with custom configuration.
pub struct RegioBuilder {
    connectors: Vec<Arc<dyn RegionConnector>>,
    cfg: AggregatorConfig,
}

impl Default for RegioBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RegioBuilder {
    /// Create a new builder with default configuration.
    ///
    /// Behavior and trade-offs:
    /// - Starts with no regions; register at least one via [`with_region`](Self::with_region)
    ///   or [`with_registry`](Self::with_registry).
    /// - Defaults: 10s per-region deadline, fallback to the home region enabled,
    ///   home region = first registered region unless set explicitly.
    #[must_use]
    pub fn new() -> Self {
        Self {
            connectors: vec![],
            cfg: AggregatorConfig::default(),
        }
    }

    /// Register a region connector.
    ///
    /// Registration order is the fan-out order, which is also the tie-break
    /// order when merged items share a sort key.
    #[must_use]
    pub fn with_region(mut self, c: Arc<dyn RegionConnector>) -> Self {
        self.connectors.push(c);
        self
    }

    /// Register every connector of an existing registry, in its order.
    #[must_use]
    pub fn with_registry(mut self, registry: &RegionRegistry) -> Self {
        self.connectors.extend(registry.connectors().iter().cloned());
        self
    }

    /// Set the region used for the single direct call after an aggregate failure.
    #[must_use]
    pub fn home_region(mut self, id: impl Into<RegionId>) -> Self {
        self.cfg.home_region = Some(id.into());
        self
    }

    /// Set the default per-region deadline.
    ///
    /// A region's own default deadline and a per-call override both take
    /// precedence over this value.
    #[must_use]
    pub const fn region_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.region_timeout = timeout;
        self
    }

    /// Toggle the home-region fallback after an aggregate failure.
    #[must_use]
    pub const fn fallback_to_home(mut self, yes: bool) -> Self {
        self.cfg.fallback_to_home = yes;
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: AggregatorConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Build the `Regio` orchestrator.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no regions are registered, a region id repeats,
    /// or the region timeout is zero; `UnknownRegion` if the home region is
    /// not registered.
    pub fn build(self) -> Result<Regio, RegioError> {
        if self.connectors.is_empty() {
            return Err(RegioError::InvalidArg(
                "no regions registered; add at least one via with_region(...)".to_string(),
            ));
        }
        if self.cfg.region_timeout.is_zero() {
            return Err(RegioError::InvalidArg(
                "region timeout must be greater than zero".to_string(),
            ));
        }

        let registry = RegionRegistry::new(self.connectors)?;
        let home = match &self.cfg.home_region {
            Some(id) => registry.capability_for(id)?,
            None => registry
                .connectors()
                .first()
                .cloned()
                .ok_or_else(|| RegioError::InvalidArg("empty region registry".to_string()))?,
        };

        Ok(Regio {
            registry: Arc::new(registry),
            cfg: self.cfg,
            home,
        })
    }
}

impl Regio {
    /// Start building a new `Regio` instance.
    ///
    /// ```rust,ignore
    /// use std::time::Duration;
    /// use regio_mock::FixtureRegion;
    ///
    /// let regio = regio::Regio::builder()
    ///     .with_region(std::sync::Arc::new(FixtureRegion::india()))
    ///     .with_region(std::sync::Arc::new(FixtureRegion::australia()))
    ///     .home_region("in")
    ///     .region_timeout(Duration::from_secs(5))
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> RegioBuilder {
        RegioBuilder::new()
    }

    /// Registered regions in fan-out order.
    #[must_use]
    pub fn list_regions(&self) -> Vec<Region> {
        self.registry.list_regions()
    }

    /// Shared handle to the region catalog.
    #[must_use]
    pub fn registry(&self) -> Arc<RegionRegistry> {
        Arc::clone(&self.registry)
    }

    /// Effective configuration.
    #[must_use]
    pub const fn config(&self) -> &AggregatorConfig {
        &self.cfg
    }

    /// The region targeted by the fallback call.
    #[must_use]
    pub fn home(&self) -> &Region {
        self.home.region()
    }

    /// Resolve the deadline for one region: call override, then the region's
    /// own default, then the orchestrator default.
    pub(crate) fn effective_timeout(
        &self,
        c: &dyn RegionConnector,
        call_override: Option<Duration>,
    ) -> Duration {
        call_override
            .or_else(|| c.default_timeout())
            .unwrap_or(self.cfg.region_timeout)
    }

    /// Invoke one region under its deadline, the caller's cancellation token,
    /// and a panic guard. Always settles into a `RegionInvocationResult`.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "regio::core::invoke_region",
            skip(c, req, cancel),
            fields(
                region = %c.id(),
                path = %req.path,
                timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            ),
        )
    )]
    pub(crate) async fn invoke_region(
        c: Arc<dyn RegionConnector>,
        req: &RegionRequest,
        timeout: Duration,
        cancel: Option<&CancellationToken>,
    ) -> RegionInvocationResult {
        let region = c.region().clone();
        let attempted_at = Utc::now();
        let started = tokio::time::Instant::now();
        let outcome =
            crate::router::util::guarded_call(region.id.as_str(), timeout, cancel, c.fetch(req))
                .await;
        let latency = started.elapsed();

        #[cfg(feature = "tracing")]
        if let Err(e) = &outcome {
            tracing::warn!(
                target: "regio::core",
                region = %region.id,
                kind = %e.kind(),
                latency_ms = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                error = %e,
                "region call failed"
            );
        }

        RegionInvocationResult {
            region,
            outcome,
            latency,
            attempted_at,
        }
    }
}
