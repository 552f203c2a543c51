//! Regio-specific data transfer objects and configuration primitives.
#![warn(missing_docs)]

mod collection;
mod config;
mod error;
mod provenance;
mod region;
mod reports;
mod request;

pub use collection::Collection;
pub use config::{
    AggregatorConfig, DEFAULT_REGION_TIMEOUT, RegionDescriptor, RegistryConfig, SortOrder,
};
pub use error::{ErrorKind, RegioError, collapse_region_errors};
pub use provenance::{Provenance, TaggedItem, duration_ms};
pub use region::{Region, RegionId};
pub use reports::{
    AggregateEnvelope, AggregateStatus, CollectionPage, MultiRegionMetadata, RegionSummary,
};
pub use request::{CollectionQuery, RegionRequest};
