//! # Campaign Manager Server
//!
//! HTTP API, HTML entry page and the periodic analysis loop for the
//! campaign manager. All domain logic lives in `campaign_manager_core`.

#![warn(missing_docs)]

/// HTTP API handlers and routing
pub mod api;

/// Periodic analysis loop
pub mod scheduler;

// Re-export core functionality
pub use campaign_manager_core::*;
