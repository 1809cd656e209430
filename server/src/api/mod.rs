//! HTTP API module for the campaign manager server

/// HTTP request handlers
pub mod api_handlers;

/// HTTP server implementation
pub mod api_server;

/// Caller identity extraction
pub mod identity;

/// HTML entry page
pub mod page;

// Re-export commonly used items
pub use api_handlers::{ApiResponse, ErrorResponse, JsonRequest};
pub use api_server::{create_router, router_for, start_api_server};
pub use identity::Caller;
