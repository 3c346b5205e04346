//! Plex Assistant - MCP server for Plex media servers
//!
//! A thin adapter exposing a Plex server's remote API (search, playlists,
//! watch status, collections, server/library info, live sessions) as
//! callable tools for an AI-assistant protocol host. It authenticates
//! once, forwards each tool call to the server, and reshapes the result
//! into a plain record.
//!
//! # Architecture
//!
//! - **Types**: per-operation result records
//! - **Plex**: wire payloads, the `PlexBackend` remote-call seam, the
//!   reqwest backend, and the `PlexClient` adapter
//! - **MCP**: JSON-RPC 2.0 server over stdio with a static tool registry
//!
//! # Example
//!
//! ```ignore
//! use plex_assistant_core::{HttpBackend, McpServer, PlexClient, PlexConfig, ToolHandler};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> plex_assistant_core::Result<()> {
//!     let config = PlexConfig::from_env()?;
//!     let client = PlexClient::new(Arc::new(HttpBackend::new(&config)));
//!     McpServer::new(ToolHandler::new(client)).run().await
//! }
//! ```

pub mod config;
pub mod error;
pub mod mcp;
pub mod plex;
pub mod types;

// Re-export commonly used types
pub use config::PlexConfig;
pub use error::{PlexError, Result};
pub use mcp::{McpServer, ToolHandler};
pub use plex::{HttpBackend, PlexBackend, PlexClient};
pub use types::{
    LibraryStatistics, LibrarySummary, MediaItem, PlaylistOutcome, PlaylistSummary, ServerInfo,
    SessionSummary,
};
