//! Connection configuration for the Plex assistant
//!
//! Two environment-sourced values, read once at process start:
//! - `PLEX_URL`: server base URL (default http://localhost:32400)
//! - `PLEX_TOKEN`: auth token, required

use crate::error::{PlexError, Result};
use std::env;
use tracing::debug;

/// Default server address when PLEX_URL is not set
pub const DEFAULT_PLEX_URL: &str = "http://localhost:32400";

/// Immutable connection configuration, constructed once at startup
/// and passed into the adapter.
#[derive(Debug, Clone)]
pub struct PlexConfig {
    /// Plex server base URL
    pub url: String,

    /// Plex auth token (X-Plex-Token)
    pub token: String,
}

impl PlexConfig {
    /// Construct a config from explicit values.
    ///
    /// An empty token is a configuration error; the process should not
    /// start without a credential.
    pub fn new(url: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        let url = url.into();
        let token = token.into();

        if token.is_empty() {
            return Err(PlexError::Config(config::ConfigError::Message(
                "PLEX_TOKEN not set".to_string(),
            )));
        }

        Ok(Self {
            // Trailing slashes would double up when joining request paths
            url: url.trim_end_matches('/').to_string(),
            token,
        })
    }

    /// Read the configuration from the environment.
    pub fn from_env() -> Result<Self> {
        let url = env::var("PLEX_URL").unwrap_or_else(|_| DEFAULT_PLEX_URL.to_string());
        let token = env::var("PLEX_TOKEN").unwrap_or_default();

        debug!("Using Plex server at {}", url);
        Self::new(url, token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_token_is_fatal() {
        let result = PlexConfig::new("http://localhost:32400", "");
        assert!(matches!(result, Err(PlexError::Config(_))));
    }

    #[test]
    fn test_trailing_slash_stripped() {
        let config = PlexConfig::new("http://plex.local:32400/", "tok").unwrap();
        assert_eq!(config.url, "http://plex.local:32400");
    }

    #[test]
    fn test_explicit_values_accepted() {
        let config = PlexConfig::new("http://plex.local:32400", "abc123").unwrap();
        assert_eq!(config.token, "abc123");
    }
}
