//! Plex client adapter
//!
//! Wraps a `PlexBackend` and exposes one method per tool operation, each
//! reshaping the wire payload into the plain records in `types`. Every
//! method has a typed `try_*` form returning `Result`; the public
//! counterparts preserve the boolean/empty-result contract by catching at
//! the method boundary and logging the swallowed failure.

use crate::error::Result;
use crate::plex::backend::{media_type_code, PlexBackend};
use crate::types::{
    LibraryStatistics, LibrarySummary, MediaItem, PlaylistOutcome, PlaylistSummary, ServerInfo,
    SessionSummary,
};
use std::sync::Arc;
use tracing::warn;

/// How many candidates a title lookup considers
const FIND_LIMIT: usize = 5;

/// Adapter between tool handlers and the Plex server
#[derive(Clone)]
pub struct PlexClient {
    backend: Arc<dyn PlexBackend>,
}

impl PlexClient {
    /// Create a client over the given backend.
    pub fn new(backend: Arc<dyn PlexBackend>) -> Self {
        Self { backend }
    }

    /// Probe the server by listing library sections.
    ///
    /// Fails closed: transport and auth errors come back as `false`.
    pub async fn test_connection(&self) -> bool {
        match self.backend.sections().await {
            Ok(_) => true,
            Err(err) => {
                warn!("Connection test failed: {}", err);
                false
            }
        }
    }

    pub async fn try_server_info(&self) -> Result<ServerInfo> {
        let identity = self.backend.server_identity().await?;
        Ok(ServerInfo::from(&identity))
    }

    /// Server identity record, or `None` on any failure.
    pub async fn get_server_info(&self) -> Option<ServerInfo> {
        match self.try_server_info().await {
            Ok(info) => Some(info),
            Err(err) => {
                warn!("Failed to get server info: {}", err);
                None
            }
        }
    }

    pub async fn try_libraries(&self) -> Result<Vec<LibrarySummary>> {
        let sections = self.backend.sections().await?;

        let mut libraries = Vec::with_capacity(sections.len());
        for section in &sections {
            // A section whose count cannot be read still gets listed
            let count = match self.backend.section_size(&section.key).await {
                Ok(count) => count,
                Err(err) => {
                    warn!("Failed to count section {}: {}", section.key, err);
                    0
                }
            };
            libraries.push(LibrarySummary::new(section, count));
        }

        Ok(libraries)
    }

    /// All libraries with item counts; empty on failure.
    pub async fn get_libraries(&self) -> Vec<LibrarySummary> {
        match self.try_libraries().await {
            Ok(libraries) => libraries,
            Err(err) => {
                warn!("Failed to get libraries: {}", err);
                Vec::new()
            }
        }
    }

    pub async fn try_library_statistics(&self) -> Result<LibraryStatistics> {
        let sections = self.backend.sections().await?;

        let mut stats = LibraryStatistics::default();
        for section in &sections {
            let count = match self.backend.section_size(&section.key).await {
                Ok(count) => count,
                Err(err) => {
                    warn!("Failed to count section {}: {}", section.key, err);
                    0
                }
            };
            stats.add_section(section, count);
        }

        Ok(stats)
    }

    /// Item totals across libraries, broken down by type; `None` on failure.
    pub async fn get_library_statistics(&self) -> Option<LibraryStatistics> {
        match self.try_library_statistics().await {
            Ok(stats) => Some(stats),
            Err(err) => {
                warn!("Failed to get statistics: {}", err);
                None
            }
        }
    }

    pub async fn try_search(&self, query: &str, limit: usize) -> Result<Vec<MediaItem>> {
        let results = self.backend.search(query).await?;

        // Server ordering is kept as-is; we only cut the tail
        Ok(results.iter().take(limit).map(MediaItem::from).collect())
    }

    /// Search across all libraries; empty on failure.
    pub async fn search(&self, query: &str, limit: usize) -> Vec<MediaItem> {
        match self.try_search(query, limit).await {
            Ok(results) => results,
            Err(err) => {
                warn!("Search failed: {}", err);
                Vec::new()
            }
        }
    }

    pub async fn try_search_in_library(
        &self,
        query: &str,
        library_key: &str,
        media_type: &str,
        limit: usize,
    ) -> Result<Vec<MediaItem>> {
        let type_code = media_type_code(media_type);
        let results = self
            .backend
            .section_search(library_key, query, type_code)
            .await?;

        Ok(results.iter().take(limit).map(MediaItem::from).collect())
    }

    /// Search one library by title; empty on failure.
    pub async fn search_in_library(
        &self,
        query: &str,
        library_key: &str,
        media_type: &str,
        limit: usize,
    ) -> Vec<MediaItem> {
        match self
            .try_search_in_library(query, library_key, media_type, limit)
            .await
        {
            Ok(results) => results,
            Err(err) => {
                warn!("Library search failed: {}", err);
                Vec::new()
            }
        }
    }

    /// Look an item up by title: first hit of a small search.
    pub async fn find_item(&self, title: &str) -> Option<MediaItem> {
        self.search(title, FIND_LIMIT).await.into_iter().next()
    }

    /// Active playback sessions; empty on failure.
    pub async fn get_currently_playing(&self) -> Vec<SessionSummary> {
        match self.backend.sessions().await {
            Ok(sessions) => sessions.iter().map(SessionSummary::from).collect(),
            Err(err) => {
                warn!("Failed to get sessions: {}", err);
                Vec::new()
            }
        }
    }

    /// All playlists; empty on failure.
    pub async fn get_playlists(&self) -> Vec<PlaylistSummary> {
        match self.backend.playlists().await {
            Ok(playlists) => playlists.iter().map(PlaylistSummary::from).collect(),
            Err(err) => {
                warn!("Failed to get playlists: {}", err);
                Vec::new()
            }
        }
    }

    /// Create a playlist from item identifiers (titles or keys).
    ///
    /// Identifiers that resolve to nothing are dropped; zero resolved
    /// items means nothing is created.
    pub async fn create_playlist(
        &self,
        title: &str,
        items: &[String],
        _description: &str,
    ) -> PlaylistOutcome {
        let mut rating_keys = Vec::with_capacity(items.len());
        for identifier in items {
            match self.resolve_rating_key(identifier).await {
                Some(key) => rating_keys.push(key),
                None => warn!("Playlist item did not resolve: {}", identifier),
            }
        }

        if rating_keys.is_empty() {
            return PlaylistOutcome::failed("no items resolved from the provided identifiers");
        }

        match self.backend.create_playlist(title, &rating_keys).await {
            Ok(playlist) => PlaylistOutcome::created(&playlist),
            Err(err) => {
                warn!("Failed to create playlist: {}", err);
                PlaylistOutcome::failed(err.to_string())
            }
        }
    }

    pub async fn try_set_watched(&self, item_key: &str, watched: bool) -> Result<()> {
        let rating_key = rating_key_of(item_key);

        // Resolve first so a bad key fails here, not inside the scrobble
        self.backend.fetch_item(rating_key).await?;

        if watched {
            self.backend.scrobble(rating_key).await
        } else {
            self.backend.unscrobble(rating_key).await
        }
    }

    /// Mark an item watched; `false` when the key does not resolve or the
    /// call fails.
    pub async fn set_watched(&self, item_key: &str) -> bool {
        match self.try_set_watched(item_key, true).await {
            Ok(()) => true,
            Err(err) => {
                warn!("Failed to mark as watched: {}", err);
                false
            }
        }
    }

    /// Mark an item unwatched; `false` on failure.
    pub async fn set_unwatched(&self, item_key: &str) -> bool {
        match self.try_set_watched(item_key, false).await {
            Ok(()) => true,
            Err(err) => {
                warn!("Failed to mark as unwatched: {}", err);
                false
            }
        }
    }

    pub async fn try_edit_collection(
        &self,
        item_key: &str,
        collection_name: &str,
        remove: bool,
    ) -> Result<()> {
        let item = self.backend.fetch_item(rating_key_of(item_key)).await?;
        self.backend
            .edit_collection(&item, collection_name, remove)
            .await
    }

    /// Tag an item with a collection name; `false` on failure.
    pub async fn add_to_collection(&self, item_key: &str, collection_name: &str) -> bool {
        match self.try_edit_collection(item_key, collection_name, false).await {
            Ok(()) => true,
            Err(err) => {
                warn!("Failed to add to collection: {}", err);
                false
            }
        }
    }

    /// Remove an item's collection tag; `false` on failure.
    pub async fn remove_from_collection(&self, item_key: &str, collection_name: &str) -> bool {
        match self.try_edit_collection(item_key, collection_name, true).await {
            Ok(()) => true,
            Err(err) => {
                warn!("Failed to remove from collection: {}", err);
                false
            }
        }
    }

    async fn resolve_rating_key(&self, identifier: &str) -> Option<String> {
        // A bare or path-shaped rating key is used directly
        let tail = rating_key_of(identifier);
        if tail.chars().all(|c| c.is_ascii_digit()) && !tail.is_empty() {
            if let Ok(item) = self.backend.fetch_item(tail).await {
                return item.rating_key;
            }
        }

        // Otherwise treat the identifier as a title
        self.find_item(identifier)
            .await
            .map(|item| item.rating_key)
            .filter(|key| !key.is_empty())
    }
}

/// Reduce an item key ("/library/metadata/42" or "42") to its rating key.
fn rating_key_of(item_key: &str) -> &str {
    item_key
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(item_key)
}
