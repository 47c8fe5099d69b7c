//! The [`ScrollStore`] trait defining the storage contract for scroll
//! positions.

use crate::error::StorageError;
use crate::types::{RoutePath, ScrollOffset};

/// Route to scroll-offset storage. The last write for a route wins.
///
/// Synchronous: a store lives for one session and is touched only from the
/// thread that renders it.
pub trait ScrollStore {
    /// Stores `offset` for `route`, replacing any earlier value.
    fn save(&mut self, route: RoutePath, offset: ScrollOffset) -> Result<(), StorageError>;

    /// The last offset saved for `route`, if any.
    fn load(&self, route: &RoutePath) -> Result<Option<ScrollOffset>, StorageError>;

    /// Forgets `route`, returning the offset it held.
    fn remove(&mut self, route: &RoutePath) -> Result<Option<ScrollOffset>, StorageError>;

    fn clear(&mut self) -> Result<(), StorageError>;

    fn len(&self) -> Result<usize, StorageError>;

    fn is_empty(&self) -> Result<bool, StorageError> {
        Ok(self.len()? == 0)
    }
}
