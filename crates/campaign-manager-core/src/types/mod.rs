//! Type definitions shared across the core crate

/// Error types
pub mod error;

/// Caller identity
pub mod user;

/// Records, record kinds and record identifiers
pub mod record;

/// Synthetic ID generation
pub mod ids;

// Re-export commonly used items
pub use error::{Error, GenerationError, Result, StorageError};
pub use user::UserId;
pub use record::{Record, RecordId, RecordKind};
pub use ids::IdGenerator;
