//! In-memory implementation of [`ScrollStore`].
//!
//! Session storage only holds strings, so the whole map can be exported to
//! and restored from a JSON object (`{"/route": offset, ...}`).

use std::collections::{BTreeMap, HashMap};

use crate::error::StorageError;
use crate::traits::ScrollStore;
use crate::types::{RoutePath, ScrollOffset};

#[derive(Debug, Clone, Default)]
pub struct InMemoryScrollStore {
    offsets: HashMap<RoutePath, ScrollOffset>,
}

impl InMemoryScrollStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serializes every entry as a JSON object, routes in sorted order.
    pub fn to_json(&self) -> Result<String, StorageError> {
        let sorted: BTreeMap<&RoutePath, &ScrollOffset> = self.offsets.iter().collect();
        Ok(serde_json::to_string(&sorted)?)
    }

    /// Restores a store from [`to_json`](Self::to_json) output. Every key
    /// and value is validated.
    pub fn from_json(json: &str) -> Result<Self, StorageError> {
        let offsets: HashMap<RoutePath, ScrollOffset> = serde_json::from_str(json)?;
        Ok(InMemoryScrollStore { offsets })
    }
}

impl ScrollStore for InMemoryScrollStore {
    fn save(&mut self, route: RoutePath, offset: ScrollOffset) -> Result<(), StorageError> {
        self.offsets.insert(route, offset);
        Ok(())
    }

    fn load(&self, route: &RoutePath) -> Result<Option<ScrollOffset>, StorageError> {
        Ok(self.offsets.get(route).copied())
    }

    fn remove(&mut self, route: &RoutePath) -> Result<Option<ScrollOffset>, StorageError> {
        Ok(self.offsets.remove(route))
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        self.offsets.clear();
        Ok(())
    }

    fn len(&self) -> Result<usize, StorageError> {
        Ok(self.offsets.len())
    }
}
