//! Configuration types shared across the orchestrator and connectors.

use core::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::RegioError;
use crate::region::{Region, RegionId};

/// Default per-region deadline applied when neither the call nor the region overrides it.
pub const DEFAULT_REGION_TIMEOUT: Duration = Duration::from_secs(10);

/// Direction of the merged sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    /// Oldest first.
    Asc,
    /// Newest first.
    #[default]
    Desc,
}

impl SortOrder {
    /// Wire value used in the `sortOrder` query parameter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Global configuration for the `Regio` orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregatorConfig {
    /// Deadline for individual region calls unless the call or region overrides it.
    pub region_timeout: Duration,
    /// Region used for the single direct retry when every region failed.
    pub home_region: Option<RegionId>,
    /// Whether an aggregate failure triggers the home-region retry.
    pub fallback_to_home: bool,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            region_timeout: DEFAULT_REGION_TIMEOUT,
            home_region: None,
            fallback_to_home: true,
        }
    }
}

/// Configuration entry describing one deployed region backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionDescriptor {
    /// Registry key, e.g. "in".
    pub id: RegionId,
    /// Display name, e.g. "India".
    pub display_name: String,
    /// Base endpoint that request paths are appended to.
    pub base_url: String,
    /// Static bearer token attached to every call, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,
    /// Region-specific default deadline in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

impl RegionDescriptor {
    /// Identity part of the descriptor.
    #[must_use]
    pub fn region(&self) -> Region {
        Region::new(self.id.clone(), self.display_name.clone())
    }

    /// Region-specific deadline, if configured.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

/// Full region catalog as loaded at process start.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Regions in registration (fan-out) order.
    pub regions: Vec<RegionDescriptor>,
}

impl RegistryConfig {
    /// Parse a catalog from JSON and validate it.
    ///
    /// # Errors
    /// Returns `InvalidArg` if the JSON is malformed, empty, or has duplicate ids.
    pub fn from_json_str(s: &str) -> Result<Self, RegioError> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| RegioError::InvalidArg(format!("region catalog: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check that the catalog is non-empty and ids are unique.
    ///
    /// # Errors
    /// Returns `InvalidArg` describing the first violation.
    pub fn validate(&self) -> Result<(), RegioError> {
        if self.regions.is_empty() {
            return Err(RegioError::InvalidArg(
                "region catalog must contain at least one region".to_string(),
            ));
        }
        let mut seen = std::collections::HashSet::new();
        for d in &self.regions {
            if d.id.as_str().is_empty() {
                return Err(RegioError::InvalidArg("region id must not be empty".to_string()));
            }
            if !seen.insert(d.id.as_str()) {
                return Err(RegioError::InvalidArg(format!("duplicate region id: {}", d.id)));
            }
        }
        Ok(())
    }
}
