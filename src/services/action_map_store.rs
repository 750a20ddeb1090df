//! Shared, atomically swappable action map.

use arc_swap::ArcSwap;
use std::sync::Arc;
use tracing::info;

use crate::models::{ActionMap, LayoutData, LayoutError};

/// Holder for the current action map.
///
/// Readers take an `Arc` snapshot and keep using it for as long as they
/// like; a reload publishes a complete new map in one atomic store, so no
/// reader ever observes a partially built one. Reads are wait-free.
#[derive(Debug)]
pub struct ActionMapStore {
    inner: ArcSwap<ActionMap>,
}

impl ActionMapStore {
    /// Creates a store holding `map`.
    #[must_use]
    pub fn new(map: ActionMap) -> Self {
        Self {
            inner: ArcSwap::from_pointee(map),
        }
    }

    /// Snapshot of the current map.
    #[must_use]
    pub fn load(&self) -> Arc<ActionMap> {
        self.inner.load_full()
    }

    /// Publishes a new map, returning the one it replaced.
    pub fn replace(&self, map: ActionMap) -> Arc<ActionMap> {
        info!(
            layout = map.name(),
            layers = map.total_layers(),
            entries = map.len(),
            "action map swapped"
        );
        self.inner.swap(Arc::new(map))
    }

    /// Builds a map from layout data and publishes it. On error the current
    /// map stays in place.
    pub fn reload(&self, layout: &LayoutData) -> Result<Arc<ActionMap>, LayoutError> {
        let map = ActionMap::from_layout(layout)?;
        Ok(self.replace(map))
    }
}
