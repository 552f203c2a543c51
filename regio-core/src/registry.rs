use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::connector::RegionConnector;
use crate::{Region, RegionId, RegioError};

/// Static, read-only catalog of queryable regions.
///
/// Regions are kept in registration order, which is also the default fan-out
/// order and therefore the tie-break order of merged results.
#[derive(Clone)]
pub struct RegionRegistry {
    connectors: Vec<Arc<dyn RegionConnector>>,
    index: HashMap<RegionId, usize>,
}

impl RegionRegistry {
    /// Build a registry from connectors in fan-out order.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no connectors are given or two share an id.
    pub fn new(connectors: Vec<Arc<dyn RegionConnector>>) -> Result<Self, RegioError> {
        if connectors.is_empty() {
            return Err(RegioError::InvalidArg(
                "no regions registered; add at least one via with_region(...)".to_string(),
            ));
        }
        let mut index = HashMap::with_capacity(connectors.len());
        for (i, c) in connectors.iter().enumerate() {
            if index.insert(c.id().clone(), i).is_some() {
                return Err(RegioError::InvalidArg(format!(
                    "duplicate region id: {}",
                    c.id()
                )));
            }
        }
        Ok(Self { connectors, index })
    }

    /// All configured regions, in registration order.
    #[must_use]
    pub fn list_regions(&self) -> Vec<Region> {
        self.connectors.iter().map(|c| c.region().clone()).collect()
    }

    /// All connectors, in registration order.
    #[must_use]
    pub fn connectors(&self) -> &[Arc<dyn RegionConnector>] {
        &self.connectors
    }

    /// Number of registered regions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.connectors.len()
    }

    /// Always false for a constructed registry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.connectors.is_empty()
    }

    /// Whether `id` is registered.
    #[must_use]
    pub fn contains(&self, id: &RegionId) -> bool {
        self.index.contains_key(id)
    }

    /// Invocation capability for `id`.
    ///
    /// # Errors
    /// Returns `UnknownRegion` if `id` is not registered.
    pub fn capability_for(&self, id: &RegionId) -> Result<Arc<dyn RegionConnector>, RegioError> {
        self.index
            .get(id)
            .map(|&i| Arc::clone(&self.connectors[i]))
            .ok_or_else(|| RegioError::unknown_region(id.as_str()))
    }

    /// Resolve a fan-out target set.
    ///
    /// `None` selects every region in registration order. An explicit subset
    /// keeps the caller's order and collapses repeated ids.
    ///
    /// # Errors
    /// Returns `InvalidArg` for an empty subset and `UnknownRegion` for an
    /// unregistered id.
    pub fn select(
        &self,
        targets: Option<&[RegionId]>,
    ) -> Result<Vec<Arc<dyn RegionConnector>>, RegioError> {
        let Some(ids) = targets else {
            return Ok(self.connectors.clone());
        };
        if ids.is_empty() {
            return Err(RegioError::InvalidArg(
                "target region subset must not be empty".to_string(),
            ));
        }
        let mut seen = std::collections::HashSet::with_capacity(ids.len());
        let mut out = Vec::with_capacity(ids.len());
        for id in ids {
            let c = self.capability_for(id)?;
            if seen.insert(id) {
                out.push(c);
            }
        }
        Ok(out)
    }
}

impl fmt::Debug for RegionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegionRegistry")
            .field("regions", &self.list_regions())
            .finish()
    }
}
