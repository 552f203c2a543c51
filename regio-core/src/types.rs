//! Re-export of the shared DTOs from `regio-types`.
// Consolidated re-exports so downstream crates can depend on `regio-core` only

pub use regio_types::{Collection, ErrorKind, RegioError, collapse_region_errors};
pub use regio_types::{
    AggregateEnvelope, AggregateStatus, CollectionPage, MultiRegionMetadata, RegionSummary,
};
pub use regio_types::{
    AggregatorConfig, DEFAULT_REGION_TIMEOUT, RegionDescriptor, RegistryConfig, SortOrder,
};
pub use regio_types::{CollectionQuery, RegionRequest};
pub use regio_types::{Provenance, Region, RegionId, TaggedItem};
