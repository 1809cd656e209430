//! Storage layer for the campaign manager
//!
//! This module provides the storage port that record services are written
//! against: a per-identity map from property key to string value. Backends
//! only need single-key atomicity; there are no cross-key transactions.

use crate::types::{StorageError, UserId};

/// Trait for per-identity property stores
pub trait PropertyStore: Send + Sync {
    /// Read one property for an identity; `None` if never written
    fn get_property(&self, user: &UserId, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite one property for an identity
    fn set_property(&self, user: &UserId, key: &str, value: String) -> Result<(), StorageError>;
}

/// In-memory property store
pub mod mem_simple;

/// File-backed property store
pub mod file_store;

/// Per-identity view (load/save of whole collections)
pub mod user_space;

/// Re-export main storage types
pub use mem_simple::MemoryPropertyStore;
pub use file_store::FilePropertyStore;
pub use user_space::UserSpace;

/// Helper trait that combines all requirements for storage implementations
/// This cleans up generic bounds throughout the codebase
pub trait StorageImpl: PropertyStore + Send + Sync + 'static {}

/// Blanket implementation for any type that meets the requirements
impl<T> StorageImpl for T where T: PropertyStore + Send + Sync + 'static {}
