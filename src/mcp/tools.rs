//! MCP tool implementations
//!
//! Provides the twelve Plex tools: connectivity and server info, library
//! listings and statistics, search, live sessions, playlists, and the
//! watched/collection mutations. Each handler performs one adapter call
//! and wraps the result in the response shape the host expects.

use crate::error::Result;
use crate::plex::PlexClient;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

/// Default result cap for search tools
const DEFAULT_SEARCH_LIMIT: usize = 20;

/// Collection used by the watchlist tool
const WATCHLIST_COLLECTION: &str = "Watchlist";

/// Tool schema definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tool {
    /// Tool name (e.g., "search_content")
    pub name: String,

    /// Human-readable description
    pub description: String,

    /// JSON Schema for input parameters
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// Tool handler that dispatches to the Plex client adapter
pub struct ToolHandler {
    client: PlexClient,
}

fn default_limit() -> usize {
    DEFAULT_SEARCH_LIMIT
}

fn default_watched() -> bool {
    true
}

impl ToolHandler {
    /// Create a new tool handler
    pub fn new(client: PlexClient) -> Self {
        Self { client }
    }

    /// Get list of all available tools
    pub fn list_tools(&self) -> Vec<Tool> {
        vec![
            Tool {
                name: "test_plex_connection".to_string(),
                description: "Test connection to Plex server and display server info".to_string(),
                input_schema: serde_json::json!({
                    "type": "object",
                    "properties": {},
                    "required": []
                }),
            },
            Tool {
                name: "get_server_info".to_string(),
                description: "Get detailed Plex server information (name, version, platform)"
                    .to_string(),
                input_schema: serde_json::json!({
                    "type": "object",
                    "properties": {},
                    "required": []
                }),
            },
            Tool {
                name: "get_libraries".to_string(),
                description: "Get all media libraries in Plex (Movies, TV, Music, Photos, etc.)"
                    .to_string(),
                input_schema: serde_json::json!({
                    "type": "object",
                    "properties": {},
                    "required": []
                }),
            },
            Tool {
                name: "get_library_statistics".to_string(),
                description: "Get statistics about all libraries (total items, breakdown by type)"
                    .to_string(),
                input_schema: serde_json::json!({
                    "type": "object",
                    "properties": {},
                    "required": []
                }),
            },
            Tool {
                name: "search_content".to_string(),
                description: "Search for content across all libraries by title or keywords"
                    .to_string(),
                input_schema: serde_json::json!({
                    "type": "object",
                    "properties": {
                        "query": {
                            "type": "string",
                            "description": "Search query (movie/show/album title or keywords)"
                        },
                        "limit": {
                            "type": "integer",
                            "description": "Maximum number of results (default: 20)",
                            "default": 20
                        }
                    },
                    "required": ["query"]
                }),
            },
            Tool {
                name: "search_in_library".to_string(),
                description: "Search for content in a specific library".to_string(),
                input_schema: serde_json::json!({
                    "type": "object",
                    "properties": {
                        "query": {
                            "type": "string",
                            "description": "Search query"
                        },
                        "library_key": {
                            "type": "string",
                            "description": "Library key (obtained from get_libraries)"
                        },
                        "media_type": {
                            "type": "string",
                            "description": "Filter by type: movie, show, track, artist, album, photo (optional)"
                        },
                        "limit": {
                            "type": "integer",
                            "description": "Maximum number of results (default: 20)",
                            "default": 20
                        }
                    },
                    "required": ["query", "library_key"]
                }),
            },
            Tool {
                name: "get_currently_playing".to_string(),
                description: "Get list of currently playing sessions and who is watching what"
                    .to_string(),
                input_schema: serde_json::json!({
                    "type": "object",
                    "properties": {},
                    "required": []
                }),
            },
            Tool {
                name: "get_playlists".to_string(),
                description: "Get all playlists in the Plex server".to_string(),
                input_schema: serde_json::json!({
                    "type": "object",
                    "properties": {},
                    "required": []
                }),
            },
            Tool {
                name: "create_playlist".to_string(),
                description: "Create a new playlist from item titles or keys".to_string(),
                input_schema: serde_json::json!({
                    "type": "object",
                    "properties": {
                        "title": {
                            "type": "string",
                            "description": "Playlist title"
                        },
                        "items": {
                            "type": "array",
                            "items": {"type": "string"},
                            "description": "Item titles or keys to include"
                        },
                        "description": {
                            "type": "string",
                            "description": "Playlist description (optional)",
                            "default": ""
                        }
                    },
                    "required": ["title"]
                }),
            },
            Tool {
                name: "add_to_watchlist".to_string(),
                description: "Add a movie or show to watchlist (mark as wanted)".to_string(),
                input_schema: serde_json::json!({
                    "type": "object",
                    "properties": {
                        "title": {
                            "type": "string",
                            "description": "Title of the movie or show"
                        }
                    },
                    "required": ["title"]
                }),
            },
            Tool {
                name: "toggle_watched".to_string(),
                description: "Mark content as watched or unwatched".to_string(),
                input_schema: serde_json::json!({
                    "type": "object",
                    "properties": {
                        "title": {
                            "type": "string",
                            "description": "Title of the content"
                        },
                        "watched": {
                            "type": "boolean",
                            "description": "True to mark as watched, False to mark as unwatched (default: True)",
                            "default": true
                        }
                    },
                    "required": ["title"]
                }),
            },
            Tool {
                name: "mark_collection".to_string(),
                description: "Add content to a collection (e.g., 'Favorites', 'Comedy'), or remove it"
                    .to_string(),
                input_schema: serde_json::json!({
                    "type": "object",
                    "properties": {
                        "title": {
                            "type": "string",
                            "description": "Title of the content"
                        },
                        "collection_name": {
                            "type": "string",
                            "description": "Name of the collection"
                        },
                        "remove": {
                            "type": "boolean",
                            "description": "Remove instead of add (default: false)",
                            "default": false
                        }
                    },
                    "required": ["title", "collection_name"]
                }),
            },
        ]
    }

    /// Execute a tool call
    pub async fn execute(&self, tool_name: &str, params: Value) -> Result<Value> {
        debug!("Executing tool: {}", tool_name);

        match tool_name {
            "test_plex_connection" => self.test_plex_connection().await,
            "get_server_info" => self.get_server_info().await,
            "get_libraries" => self.get_libraries().await,
            "get_library_statistics" => self.get_library_statistics().await,
            "search_content" => self.search_content(params).await,
            "search_in_library" => self.search_in_library(params).await,
            "get_currently_playing" => self.get_currently_playing().await,
            "get_playlists" => self.get_playlists().await,
            "create_playlist" => self.create_playlist(params).await,
            "add_to_watchlist" => self.add_to_watchlist(params).await,
            "toggle_watched" => self.toggle_watched(params).await,
            "mark_collection" => self.mark_collection(params).await,
            _ => {
                warn!("Unknown tool: {}", tool_name);
                Ok(serde_json::json!({
                    "error": format!("Unknown tool: {}", tool_name)
                }))
            }
        }
    }

    // === Read-only tools ===

    async fn test_plex_connection(&self) -> Result<Value> {
        match self.client.get_server_info().await {
            Some(info) => Ok(serde_json::json!({
                "status": "connected",
                "message": format!("Connected to {}", info.friendly_name),
                "server_info": info
            })),
            None => Ok(serde_json::json!({
                "status": "error",
                "message": "Connection failed"
            })),
        }
    }

    async fn get_server_info(&self) -> Result<Value> {
        match self.client.get_server_info().await {
            Some(info) => Ok(serde_json::json!({
                "success": true,
                "data": info
            })),
            None => Ok(serde_json::json!({
                "success": false,
                "error": "Unable to retrieve server info"
            })),
        }
    }

    async fn get_libraries(&self) -> Result<Value> {
        let libraries = self.client.get_libraries().await;

        Ok(serde_json::json!({
            "success": true,
            "count": libraries.len(),
            "data": libraries
        }))
    }

    async fn get_library_statistics(&self) -> Result<Value> {
        match self.client.get_library_statistics().await {
            Some(stats) => Ok(serde_json::json!({
                "success": true,
                "data": stats
            })),
            None => Ok(serde_json::json!({
                "success": false,
                "error": "Unable to retrieve statistics"
            })),
        }
    }

    async fn search_content(&self, params: Value) -> Result<Value> {
        #[derive(Deserialize)]
        struct SearchParams {
            query: String,
            #[serde(default = "default_limit")]
            limit: usize,
        }

        let params: SearchParams = serde_json::from_value(params)?;
        let results = self.client.search(&params.query, params.limit).await;

        Ok(serde_json::json!({
            "success": true,
            "query": params.query,
            "count": results.len(),
            "results": results
        }))
    }

    async fn search_in_library(&self, params: Value) -> Result<Value> {
        #[derive(Deserialize)]
        struct LibrarySearchParams {
            query: String,
            library_key: String,
            #[serde(default)]
            media_type: String,
            #[serde(default = "default_limit")]
            limit: usize,
        }

        let params: LibrarySearchParams = serde_json::from_value(params)?;
        let results = self
            .client
            .search_in_library(
                &params.query,
                &params.library_key,
                &params.media_type,
                params.limit,
            )
            .await;

        Ok(serde_json::json!({
            "success": true,
            "query": params.query,
            "library_key": params.library_key,
            "count": results.len(),
            "results": results
        }))
    }

    async fn get_currently_playing(&self) -> Result<Value> {
        let sessions = self.client.get_currently_playing().await;

        Ok(serde_json::json!({
            "success": true,
            "active_sessions": sessions.len(),
            "sessions": sessions
        }))
    }

    async fn get_playlists(&self) -> Result<Value> {
        let playlists = self.client.get_playlists().await;

        Ok(serde_json::json!({
            "success": true,
            "count": playlists.len(),
            "playlists": playlists
        }))
    }

    // === Mutating tools ===

    async fn create_playlist(&self, params: Value) -> Result<Value> {
        #[derive(Deserialize)]
        struct CreatePlaylistParams {
            title: String,
            #[serde(default)]
            items: Vec<String>,
            #[serde(default)]
            description: String,
        }

        let params: CreatePlaylistParams = serde_json::from_value(params)?;
        let outcome = self
            .client
            .create_playlist(&params.title, &params.items, &params.description)
            .await;

        Ok(serde_json::json!({
            "success": outcome.success,
            "data": outcome
        }))
    }

    async fn add_to_watchlist(&self, params: Value) -> Result<Value> {
        #[derive(Deserialize)]
        struct WatchlistParams {
            title: String,
        }

        let params: WatchlistParams = serde_json::from_value(params)?;

        let Some(item) = self.client.find_item(&params.title).await else {
            return Ok(not_found(&params.title));
        };

        let added = self
            .client
            .add_to_collection(&item.key, WATCHLIST_COLLECTION)
            .await;

        Ok(serde_json::json!({
            "success": added,
            "title": params.title,
            "message": if added {
                format!("Added '{}' to Watchlist", params.title)
            } else {
                format!("Failed to add '{}' to Watchlist", params.title)
            }
        }))
    }

    async fn toggle_watched(&self, params: Value) -> Result<Value> {
        #[derive(Deserialize)]
        struct ToggleWatchedParams {
            title: String,
            #[serde(default = "default_watched")]
            watched: bool,
        }

        let params: ToggleWatchedParams = serde_json::from_value(params)?;

        let Some(item) = self.client.find_item(&params.title).await else {
            return Ok(not_found(&params.title));
        };

        let (updated, message) = if params.watched {
            (
                self.client.set_watched(&item.key).await,
                format!("Marked '{}' as watched", params.title),
            )
        } else {
            (
                self.client.set_unwatched(&item.key).await,
                format!("Marked '{}' as unwatched", params.title),
            )
        };

        Ok(serde_json::json!({
            "success": updated,
            "title": params.title,
            "watched": params.watched,
            "message": if updated {
                message
            } else {
                format!("Failed to update '{}'", params.title)
            }
        }))
    }

    async fn mark_collection(&self, params: Value) -> Result<Value> {
        #[derive(Deserialize)]
        struct MarkCollectionParams {
            title: String,
            collection_name: String,
            #[serde(default)]
            remove: bool,
        }

        let params: MarkCollectionParams = serde_json::from_value(params)?;

        let Some(item) = self.client.find_item(&params.title).await else {
            return Ok(not_found(&params.title));
        };

        let (changed, message) = if params.remove {
            (
                self.client
                    .remove_from_collection(&item.key, &params.collection_name)
                    .await,
                format!(
                    "Removed '{}' from '{}'",
                    params.title, params.collection_name
                ),
            )
        } else {
            (
                self.client
                    .add_to_collection(&item.key, &params.collection_name)
                    .await,
                format!("Added '{}' to '{}'", params.title, params.collection_name),
            )
        };

        Ok(serde_json::json!({
            "success": changed,
            "title": params.title,
            "collection": params.collection_name,
            "message": if changed {
                message
            } else {
                format!(
                    "Failed to update '{}' in '{}'",
                    params.title, params.collection_name
                )
            }
        }))
    }
}

fn not_found(title: &str) -> Value {
    serde_json::json!({
        "success": false,
        "error": format!("Could not find '{}'", title)
    })
}
