//! serde projections of the Plex HTTP API payloads
//!
//! Every Plex response wraps its content in a `MediaContainer` envelope;
//! directories describe library sections, metadata entries describe items,
//! sessions, and playlists. Only the fields this crate reads are modeled.

use serde::Deserialize;

/// Top-level response envelope
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Envelope {
    #[serde(rename = "MediaContainer", default)]
    pub media_container: MediaContainer,
}

/// Plex response container. Identity fields are only present on the
/// server root endpoint; counts only on paged section listings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MediaContainer {
    pub size: Option<u64>,
    pub total_size: Option<u64>,
    pub friendly_name: Option<String>,
    pub machine_identifier: Option<String>,
    pub version: Option<String>,
    pub platform: Option<String>,
    pub platform_version: Option<String>,
    #[serde(rename = "Directory")]
    pub directories: Vec<Directory>,
    #[serde(rename = "Metadata")]
    pub metadata: Vec<Metadata>,
}

/// A library section entry
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Directory {
    pub key: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// A metadata entry: media item, playback session, or playlist
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Metadata {
    pub rating_key: Option<String>,
    pub key: Option<String>,
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub year: Option<i32>,
    pub rating: Option<f64>,
    pub tagline: Option<String>,
    pub summary: Option<String>,
    pub duration: Option<i64>,
    pub view_offset: Option<i64>,
    pub view_count: Option<u64>,
    pub leaf_count: Option<u64>,
    pub playlist_type: Option<String>,
    #[serde(rename = "librarySectionID")]
    pub library_section_id: Option<u64>,
    #[serde(rename = "User")]
    pub user: Option<User>,
}

/// The account attached to a playback session
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct User {
    pub title: String,
}
