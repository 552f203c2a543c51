//! Request types: the generic per-region request and the collection query.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::collection::Collection;
use crate::config::SortOrder;
use crate::error::RegioError;
use crate::region::RegionId;

/// One parameterized GET issued identically against every targeted region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionRequest {
    /// Path appended to each region's base endpoint; always starts with `/`.
    pub path: String,
    /// Query parameters in insertion order.
    pub query: Vec<(String, String)>,
}

impl RegionRequest {
    /// Create a request for `path` with no query parameters.
    pub fn new(path: impl Into<String>) -> Self {
        let mut path = path.into();
        if !path.starts_with('/') {
            path.insert(0, '/');
        }
        Self {
            path,
            query: Vec::new(),
        }
    }

    /// Append a query parameter.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Look up the first value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Build the per-region request for a collection query.
    ///
    /// Produces `/user-cars/{action}/{userId}` with `page`, `limit`, `sortOrder`
    /// and, when set, `isActive`.
    #[must_use]
    pub fn for_collection(collection: Collection, query: &CollectionQuery) -> Self {
        let mut req = Self::new(collection.path_for(&query.user_id))
            .param("page", query.page)
            .param("limit", query.limit)
            .param("sortOrder", query.sort_order);
        if let Some(active) = query.is_active {
            req = req.param("isActive", active);
        }
        req
    }
}

/// Caller-facing query for one user's collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionQuery {
    /// User whose collection is requested.
    pub user_id: String,
    /// 1-based page forwarded to every region.
    pub page: u32,
    /// Page size forwarded to every region.
    pub limit: u32,
    /// Direction of the merged sort; also forwarded to regions.
    pub sort_order: SortOrder,
    /// Optional active-listing filter.
    pub is_active: Option<bool>,
    /// Explicit region subset; `None` targets every registered region.
    pub regions: Option<Vec<RegionId>>,
    /// Per-region deadline override for this call.
    pub timeout: Option<Duration>,
}

impl CollectionQuery {
    /// Query the first page (10 items, newest first) for `user_id`.
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            page: 1,
            limit: 10,
            sort_order: SortOrder::Desc,
            is_active: None,
            regions: None,
            timeout: None,
        }
    }

    /// Set the page.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Set the page size.
    #[must_use]
    pub const fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Set the sort direction.
    #[must_use]
    pub const fn sort_order(mut self, order: SortOrder) -> Self {
        self.sort_order = order;
        self
    }

    /// Filter by active listings.
    #[must_use]
    pub const fn is_active(mut self, active: bool) -> Self {
        self.is_active = Some(active);
        self
    }

    /// Restrict the fan-out to the given regions.
    #[must_use]
    pub fn regions<I, R>(mut self, regions: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<RegionId>,
    {
        self.regions = Some(regions.into_iter().map(Into::into).collect());
        self
    }

    /// Override the per-region deadline for this call.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Validate caller-supplied arguments.
    ///
    /// # Errors
    /// Returns `InvalidArg` for an empty user id, a zero page or limit, or a
    /// zero timeout.
    pub fn validate(&self) -> Result<(), RegioError> {
        if self.user_id.trim().is_empty() {
            return Err(RegioError::InvalidArg("user id must not be empty".to_string()));
        }
        if self.user_id.contains('/') {
            return Err(RegioError::InvalidArg(format!(
                "user id must not contain '/': {}",
                self.user_id
            )));
        }
        if matches!(self.user_id.as_str(), "." | "..") {
            return Err(RegioError::InvalidArg(format!(
                "user id must not be a dot segment: {}",
                self.user_id
            )));
        }
        if self.page == 0 {
            return Err(RegioError::InvalidArg("page is 1-based".to_string()));
        }
        if self.limit == 0 {
            return Err(RegioError::InvalidArg("limit must be positive".to_string()));
        }
        if self.timeout.is_some_and(|t| t.is_zero()) {
            return Err(RegioError::InvalidArg("timeout must be positive".to_string()));
        }
        Ok(())
    }
}
