use core::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the regio workspace.
///
/// Per-region failures (transport, status, timeout, cancellation) are carried as
/// data inside invocation results; only configuration and argument errors are
/// returned to callers as `Err`.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RegioError {
    /// The requested region id is not registered.
    #[error("unknown region: {region}")]
    UnknownRegion {
        /// Region id that failed to resolve.
        region: String,
    },

    /// Invalid input argument or configuration value.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// A region's transport failed before a response was received.
    #[error("{region} transport failed: {msg}")]
    Transport {
        /// Region id that failed.
        region: String,
        /// Human-readable error message.
        msg: String,
    },

    /// A region answered with a non-2xx HTTP status.
    #[error("{region} answered with status {status}")]
    HttpStatus {
        /// Region id that answered.
        region: String,
        /// HTTP status code.
        status: u16,
    },

    /// A region rejected the request credentials and no refresh succeeded.
    #[error("{region} rejected credentials: {msg}")]
    Unauthorized {
        /// Region id that rejected the call.
        region: String,
        /// Human-readable error message.
        msg: String,
    },

    /// Issues with the returned body (undecodable JSON, etc.).
    #[error("data issue: {0}")]
    Data(String),

    /// A region's payload did not contain a list under any known envelope.
    #[error("{region} returned an unexpected payload shape")]
    UnexpectedShape {
        /// Region id whose payload was ignored.
        region: String,
    },

    /// An individual region call exceeded its deadline.
    #[error("region timed out: {region} after {timeout_ms}ms")]
    RegionTimeout {
        /// Region id that timed out.
        region: String,
        /// Deadline that was exceeded, in milliseconds.
        timeout_ms: u64,
    },

    /// An in-flight region call was cancelled by the caller.
    #[error("region call cancelled: {region}")]
    Cancelled {
        /// Region id whose call was cancelled.
        region: String,
    },

    /// Every targeted region failed; contains the individual failures.
    #[error("all regions failed: {0:?}")]
    AllRegionsFailed(Vec<RegioError>),

    /// Every targeted region timed out.
    #[error("all regions timed out: {collection}")]
    AllRegionsTimedOut {
        /// Collection label for which every region timed out.
        collection: String,
    },

    /// Unknown/opaque error.
    #[error("unknown error: {0}")]
    Other(String),
}

/// Coarse classification of a [`RegioError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Unknown region or invalid argument; fatal and never retried.
    Configuration,
    /// Network, status or body failure of a single region.
    Transport,
    /// A single region exceeded its deadline.
    Timeout,
    /// A single region call was cancelled.
    Cancelled,
    /// Unexpected payload shape; swallowed.
    Normalization,
    /// Every region failed.
    Aggregate,
    /// Anything else.
    Other,
}

impl ErrorKind {
    /// Stable, kebab-case identifier for logs and metadata.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Configuration => "configuration",
            Self::Transport => "transport",
            Self::Timeout => "timeout",
            Self::Cancelled => "cancelled",
            Self::Normalization => "normalization",
            Self::Aggregate => "aggregate",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl RegioError {
    /// Helper: build an `UnknownRegion` error.
    pub fn unknown_region(region: impl Into<String>) -> Self {
        Self::UnknownRegion {
            region: region.into(),
        }
    }

    /// Helper: build a `Transport` error with the region id and message.
    pub fn transport(region: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Transport {
            region: region.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build an `HttpStatus` error.
    pub fn http_status(region: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            region: region.into(),
            status,
        }
    }

    /// Helper: build a `RegionTimeout` error.
    pub fn region_timeout(region: impl Into<String>, timeout: std::time::Duration) -> Self {
        Self::RegionTimeout {
            region: region.into(),
            timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
        }
    }

    /// Helper: build a `Cancelled` error.
    pub fn cancelled(region: impl Into<String>) -> Self {
        Self::Cancelled {
            region: region.into(),
        }
    }

    /// Classify this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownRegion { .. } | Self::InvalidArg(_) => ErrorKind::Configuration,
            Self::Transport { .. }
            | Self::HttpStatus { .. }
            | Self::Unauthorized { .. }
            | Self::Data(_) => ErrorKind::Transport,
            Self::RegionTimeout { .. } => ErrorKind::Timeout,
            Self::Cancelled { .. } => ErrorKind::Cancelled,
            Self::UnexpectedShape { .. } => ErrorKind::Normalization,
            Self::AllRegionsFailed(_) | Self::AllRegionsTimedOut { .. } => ErrorKind::Aggregate,
            Self::Other(_) => ErrorKind::Other,
        }
    }

    /// Returns true for a single-region deadline failure.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::RegionTimeout { .. })
    }

    /// Returns true for errors that are raised to the caller instead of captured.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self.kind(), ErrorKind::Configuration)
    }

    /// Flatten nested `AllRegionsFailed` structures into a plain vector.
    #[must_use]
    pub fn flatten(self) -> Vec<Self> {
        match self {
            Self::AllRegionsFailed(list) => list.into_iter().flat_map(Self::flatten).collect(),
            other => vec![other],
        }
    }
}

/// Collapse a set of per-region errors into a single aggregate failure.
///
/// Rules:
/// - If every error is a `RegionTimeout` → `AllRegionsTimedOut(collection)`.
/// - Else → `AllRegionsFailed(errors)`.
#[must_use]
pub fn collapse_region_errors(collection: &str, errors: Vec<RegioError>) -> RegioError {
    if !errors.is_empty() && errors.iter().all(RegioError::is_timeout) {
        return RegioError::AllRegionsTimedOut {
            collection: collection.to_string(),
        };
    }
    RegioError::AllRegionsFailed(errors)
}
