//! # Campaign Manager Core
//!
//! Core types and services for the campaign manager: per-user record storage,
//! CRUD over campaigns, ad sets and ads, CSV bulk import, KPI analysis, the
//! static ad-copy library and the chat-completion script generator.
//! The HTTP surface and the periodic task loop live in the server crate.

#![warn(missing_docs)]

/// Application configuration, logging and shared state
pub mod core;

/// Type definitions for records, identities and errors
pub mod types;

/// System constants
pub mod constants;

/// Storage port, backends and per-user spaces
pub mod storage;

/// Record CRUD service
pub mod records;

/// CSV bulk import
pub mod import;

/// KPI analysis and advisory text
pub mod analysis;

/// Static ad-copy template catalog
pub mod scripts;

/// Chat-completion script generation
pub mod ai;

/// Registry of identities with a periodic analysis trigger
pub mod scheduler;

// Re-export commonly used items
pub use types::{Error, Result, Record, RecordId, RecordKind, UserId};
pub use storage::{PropertyStore, UserSpace};
pub use records::RecordService;

/// Crate version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[doc(hidden)]
pub use tracing as __tracing;
