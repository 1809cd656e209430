//! Error types for the campaign manager
//!
//! The `Display` text of the user-facing variants is the exact message shown
//! to callers, so a handler can surface `err.to_string()` unchanged.

use thiserror::Error;

/// Main result type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the campaign manager
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Storage backend errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Update targeted an ID that is not in the collection
    #[error("{id_field} not found.")]
    NotFound {
        /// ID field of the collection that was searched
        id_field: &'static str,
    },

    /// Malformed caller input; the message is shown verbatim
    #[error("{0}")]
    InvalidInput(String),

    /// Chat-completion call failed
    #[error("Error: {0}")]
    Generation(#[from] GenerationError),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Storage-specific errors
#[derive(Error, Debug)]
pub enum StorageError {
    /// Disk I/O operation failed
    #[error("Disk I/O failed: {0}")]
    DiskIo(#[from] std::io::Error),

    /// Backing file exists but is not a property map
    #[error("Data corruption detected: {0}")]
    Corruption(String),
}

/// Chat-completion errors
#[derive(Error, Debug)]
pub enum GenerationError {
    /// No credential configured
    #[error("no API key configured for the chat-completion endpoint")]
    MissingApiKey,

    /// Transport failure (connect, timeout, body read)
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Endpoint answered with a non-success status
    #[error("endpoint returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, truncated
        body: String,
    },

    /// Response body was not the expected JSON shape
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Response carried no choices
    #[error("response contained no choices")]
    EmptyChoices,
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Check if this is a client error (4xx equivalent)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::InvalidInput(_) | Error::NotFound { .. })
    }

    /// Check if this is a server error (5xx equivalent)
    pub fn is_server_error(&self) -> bool {
        matches!(
            self,
            Error::Config(_) | Error::Storage(_) | Error::Serialization(_)
        )
    }
}
