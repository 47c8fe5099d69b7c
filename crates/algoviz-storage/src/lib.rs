//! Session-scoped scroll positions, keyed by route path.
//!
//! # Modules
//!
//! - [`error`]: StorageError enum
//! - [`types`]: validated [`RoutePath`] and [`ScrollOffset`]
//! - [`traits`]: the [`ScrollStore`] contract
//! - [`memory`]: [`InMemoryScrollStore`], with JSON export for string-only
//!   session storage

pub mod error;
pub mod memory;
pub mod traits;
pub mod types;

pub use error::StorageError;
pub use memory::InMemoryScrollStore;
pub use traits::ScrollStore;
pub use types::{RoutePath, ScrollOffset};
