use core::fmt;
use serde::{Deserialize, Serialize};

/// Logical per-user vehicle collections that can be aggregated across regions.
///
/// These map one-to-one with collection adapters and give consistent
/// Display formatting for paths, errors, and telemetry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum Collection {
    /// Vehicles the user bookmarked.
    Saved,
    /// Vehicles the user sent an enquiry for.
    Enquired,
    /// Vehicles the user recently viewed.
    Viewed,
}

impl Collection {
    /// All collections, in a stable order.
    pub const ALL: [Self; 3] = [Self::Saved, Self::Enquired, Self::Viewed];

    /// Stable, lowercase identifier used as the path action and in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Saved => "saved",
            Self::Enquired => "enquired",
            Self::Viewed => "viewed",
        }
    }

    /// Collection-specific timestamp field recorded by the backends.
    #[must_use]
    pub const fn timestamp_field(self) -> &'static str {
        match self {
            Self::Saved => "savedAt",
            Self::Enquired => "enquiredAt",
            Self::Viewed => "viewedAt",
        }
    }

    /// Candidate sort fields in priority order: the generic `actionAt` first,
    /// then the collection-specific timestamp.
    #[must_use]
    pub const fn sort_fields(self) -> [&'static str; 2] {
        ["actionAt", self.timestamp_field()]
    }

    /// Path for this collection and user: `/user-cars/{action}/{userId}`.
    #[must_use]
    pub fn path_for(self, user_id: &str) -> String {
        format!("/user-cars/{}/{}", self.as_str(), user_id)
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
