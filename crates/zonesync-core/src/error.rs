//! Error types for the zone synchronization system
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

/// Result type alias for sync operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the zone synchronization system
#[derive(Error, Debug)]
pub enum Error {
    /// Remote zone client errors (the sync was not completed)
    #[error("zone client error: {0}")]
    ZoneClient(String),

    /// Local domain store errors
    #[error("store error: {0}")]
    Store(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Network-related errors
    #[error("network error: {0}")]
    Network(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP errors from the remote zone API
    #[error("HTTP error: {0}")]
    Http(String),

    /// Authentication errors against the remote zone API
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// Zone or record not found
    #[error("not found: {0}")]
    NotFound(String),

    /// Invalid input (e.g., a malformed zone name)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a zone client error
    pub fn zone_client(msg: impl Into<String>) -> Self {
        Self::ZoneClient(msg.into())
    }

    /// Create a store error
    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an HTTP error
    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    /// Create an authentication error
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Authentication(msg.into())
    }

    /// Create a "not found" error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

/// Helper for converting anyhow::Error to our Error type
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}
