//! Error types for the Plex assistant
//!
//! This module provides structured error definitions using thiserror,
//! with anyhow available for error propagation at the binary level.

use thiserror::Error;

/// Main error type for Plex assistant operations
#[derive(Error, Debug)]
pub enum PlexError {
    /// HTTP request to the Plex server failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Plex rejected the auth token
    #[error("Plex server rejected the token (unauthorized)")]
    Unauthorized,

    /// Requested item/section does not exist on the server
    #[error("Not found: {0}")]
    NotFound(String),

    /// Plex returned an unexpected status code
    #[error("Plex API error: {status} on {path}")]
    Api { status: u16, path: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// MCP protocol error
    #[error("MCP protocol error: {0}")]
    McpProtocol(String),

    /// Invalid operation (e.g., creating a playlist with no items)
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

/// Result type alias for Plex assistant operations
pub type Result<T> = std::result::Result<T, PlexError>;

/// Convert anyhow::Error to PlexError
impl From<anyhow::Error> for PlexError {
    fn from(err: anyhow::Error) -> Self {
        PlexError::Other(err.to_string())
    }
}
