//! regio-core
//!
//! Core types, traits, and utilities shared across the regio workspace.
//!
//! - `types`: re-exported DTOs (regions, requests, errors, envelopes).
//! - `connector`: the `RegionConnector` trait every region backend implements.
//! - `registry`: the immutable catalog of regions used for fan-out.
//! - `normalize` / `merge`: turning per-region payloads into one ordered list.
//! - `outcome`: status computation and envelope assembly.
//!
//! This crate performs no I/O and spawns nothing; the orchestrator in `regio`
//! drives connectors under Tokio.
#![warn(missing_docs)]

/// The `RegionConnector` invocation capability.
pub mod connector;
/// Settled per-region call results.
pub mod invocation;
/// Deterministic merge of per-region lists.
pub mod merge;
pub mod normalize;
/// Fan-in accounting and envelope assembly.
pub mod outcome;
/// Region catalog.
pub mod registry;
pub mod types;

pub use connector::RegionConnector;
pub use invocation::RegionInvocationResult;
pub use merge::{SortKey, merge_sorted, parse_timestamp_millis};
pub use normalize::{ExtractStrategy, NormalizedRegion, extract_items, normalize_payload};
pub use outcome::AggregateOutcome;
pub use registry::RegionRegistry;
pub use types::*;
