//! Remote-call seam to the Plex server
//!
//! `PlexBackend` enumerates the handful of remote operations the adapter
//! performs. The production implementation is `HttpBackend`; contract
//! tests substitute a stateful fake.

use crate::error::Result;
use crate::plex::wire::{Directory, MediaContainer, Metadata};
use async_trait::async_trait;

/// The remote operations performed against a Plex server, one call each.
#[async_trait]
pub trait PlexBackend: Send + Sync {
    /// Server identity attributes (name, version, platform).
    async fn server_identity(&self) -> Result<MediaContainer>;

    /// All library sections.
    async fn sections(&self) -> Result<Vec<Directory>>;

    /// Number of items in one section.
    async fn section_size(&self, section_key: &str) -> Result<u64>;

    /// Global search across all libraries, server-ordered.
    async fn search(&self, query: &str) -> Result<Vec<Metadata>>;

    /// Title search within one section, optionally filtered by type code.
    async fn section_search(
        &self,
        section_key: &str,
        title: &str,
        type_code: Option<u32>,
    ) -> Result<Vec<Metadata>>;

    /// Fetch a single item by rating key.
    async fn fetch_item(&self, rating_key: &str) -> Result<Metadata>;

    /// Active playback sessions.
    async fn sessions(&self) -> Result<Vec<Metadata>>;

    /// All playlists.
    async fn playlists(&self) -> Result<Vec<Metadata>>;

    /// Create a playlist from the given rating keys.
    async fn create_playlist(&self, title: &str, rating_keys: &[String]) -> Result<Metadata>;

    /// Mark an item watched.
    async fn scrobble(&self, rating_key: &str) -> Result<()>;

    /// Mark an item unwatched.
    async fn unscrobble(&self, rating_key: &str) -> Result<()>;

    /// Add or remove an item's collection tag. The item's own metadata
    /// supplies the section and type the tag edit is issued against.
    async fn edit_collection(&self, item: &Metadata, collection: &str, remove: bool)
        -> Result<()>;
}

/// Map a media type name to Plex's numeric search type code.
///
/// Unknown names yield `None`, which callers treat as "no type filter".
pub fn media_type_code(media_type: &str) -> Option<u32> {
    match media_type {
        "movie" => Some(1),
        "show" => Some(2),
        "season" => Some(3),
        "episode" => Some(4),
        "artist" => Some(8),
        "album" => Some(9),
        "track" => Some(10),
        "photo" => Some(13),
        _ => None,
    }
}
