//! Regio aggregates per-user collections across independent regional backends.
//!
//! Overview
//! - Fans one request out to every registered region (or an explicit subset)
//!   through connectors that implement the `regio_core::RegionConnector` contract.
//! - Waits for every region to settle: failures, timeouts, cancellations and
//!   panics are captured per region instead of failing the whole call.
//! - Normalizes heterogeneous payload envelopes, tags each item with its
//!   source region, and merges everything into one deterministically ordered list.
//! - Reports `Success`, `PartialSuccess` or `Failure` with per-region metadata,
//!   and falls back to one direct call against the home region when every
//!   region failed.
//!
//! Key behaviors and trade-offs
//! - Deadlines: each region races its own deadline (call override, then the
//!   region's default, then the orchestrator default). Total latency tracks the
//!   slowest region rather than the sum.
//! - Ordering: stable sort on the collection's timestamp fields; ties keep
//!   fan-out order, then each region's own order. Items without a parseable
//!   timestamp go last in both directions.
//! - Fallback: a single home-region call with no multi-region metadata. It is
//!   skipped when the caller cancelled the request.
//!
//! Examples
//! Building an orchestrator over HTTP regions loaded from JSON:
//! ```rust,ignore
//! use regio::{Regio, RegistryConfig};
//!
//! let catalog = RegistryConfig::from_json_str(&std::fs::read_to_string("regions.json")?)?;
//! let registry = regio_http::registry_from_config(&catalog)?;
//! let regio = Regio::builder()
//!     .with_registry(&registry)
//!     .home_region("in")
//!     .build()?;
//! ```
//!
//! Fetching saved vehicles for a user:
//! ```rust,ignore
//! use regio::{CollectionQuery, SortOrder};
//!
//! let envelope = regio
//!     .saved_cars(&CollectionQuery::new("user-42").limit(20).sort_order(SortOrder::Desc))
//!     .await?;
//! for item in envelope.items() {
//!     println!("{} from {}", item.item["carId"], item.provenance.display_name);
//! }
//! ```
//!
//! See `regio/examples/` for runnable end-to-end demonstrations.
#![warn(missing_docs)]

pub(crate) mod core;
mod router;

pub use core::{Regio, RegioBuilder};
pub use router::fanout::FanOutOptions;
pub use tokio_util::sync::CancellationToken;

// Re-export core types for convenience
pub use regio_core::{
    AggregateEnvelope, AggregateOutcome, AggregateStatus, AggregatorConfig, Collection,
    CollectionPage, CollectionQuery, ErrorKind, ExtractStrategy, MultiRegionMetadata, Provenance,
    Region, RegionConnector, RegionDescriptor, RegionId, RegionInvocationResult, RegionRegistry,
    RegionRequest, RegionSummary, RegioError, RegistryConfig, SortKey, SortOrder, TaggedItem,
};
