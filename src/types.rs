//! Core data types for the Plex assistant
//!
//! Request-scoped result records, one shape per tool operation. Each record
//! is produced from the Plex wire payload by an explicit field-mapping step
//! and serialized back to the protocol host with the server's JSON key
//! spelling. Nothing here is cached or persisted.

use crate::plex::wire::{Directory, MediaContainer, Metadata};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Summaries longer than this are cut before they reach the host
const SUMMARY_MAX_CHARS: usize = 200;

/// Server identity record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerInfo {
    pub friendly_name: String,
    pub machine_identifier: String,
    pub version: String,
    pub platform: String,
    pub platform_version: String,
}

impl From<&MediaContainer> for ServerInfo {
    fn from(container: &MediaContainer) -> Self {
        Self {
            friendly_name: container.friendly_name.clone().unwrap_or_default(),
            machine_identifier: container.machine_identifier.clone().unwrap_or_default(),
            version: container.version.clone().unwrap_or_default(),
            platform: container.platform.clone().unwrap_or_default(),
            platform_version: container.platform_version.clone().unwrap_or_default(),
        }
    }
}

/// One library section with its item count
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibrarySummary {
    pub key: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub count: u64,
}

impl LibrarySummary {
    pub fn new(section: &Directory, count: u64) -> Self {
        Self {
            key: section.key.clone(),
            title: section.title.clone(),
            kind: section.kind.clone(),
            count,
        }
    }
}

/// Per-library entry inside the statistics breakdown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryCount {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub count: u64,
}

/// Aggregate item counts across all libraries
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LibraryStatistics {
    pub total_items: u64,
    pub by_type: BTreeMap<String, u64>,
    pub libraries: Vec<LibraryCount>,
}

impl LibraryStatistics {
    /// Fold one section into the running totals.
    pub fn add_section(&mut self, section: &Directory, count: u64) {
        self.total_items += count;
        *self.by_type.entry(section.kind.clone()).or_insert(0) += count;
        self.libraries.push(LibraryCount {
            title: section.title.clone(),
            kind: section.kind.clone(),
            count,
        });
    }
}

/// A single media item as returned by search and lookup operations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    pub key: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub rating_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub watched: bool,
}

impl From<&Metadata> for MediaItem {
    fn from(item: &Metadata) -> Self {
        Self {
            key: item.key.clone().unwrap_or_default(),
            title: item.title.clone().unwrap_or_else(|| "Unknown".to_string()),
            kind: item.kind.clone().unwrap_or_else(|| "unknown".to_string()),
            rating_key: item.rating_key.clone().unwrap_or_default(),
            year: item.year,
            rating: item.rating,
            tagline: item.tagline.clone(),
            duration: item.duration,
            view_count: item.view_count,
            summary: item.summary.as_deref().map(truncate_chars),
            watched: item.view_count.map(|count| count > 0).unwrap_or(false),
        }
    }
}

/// An active playback session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub title: String,
    pub user: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub duration: i64,
    pub view_offset: i64,
}

impl From<&Metadata> for SessionSummary {
    fn from(session: &Metadata) -> Self {
        Self {
            title: session.title.clone().unwrap_or_else(|| "Unknown".to_string()),
            user: session
                .user
                .as_ref()
                .map(|user| user.title.clone())
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| "Unknown".to_string()),
            kind: session.kind.clone().unwrap_or_else(|| "unknown".to_string()),
            duration: session.duration.unwrap_or(0),
            view_offset: session.view_offset.unwrap_or(0),
        }
    }
}

/// One playlist with its item count
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistSummary {
    pub key: String,
    pub title: String,
    pub playlist_type: String,
    pub item_count: u64,
}

impl From<&Metadata> for PlaylistSummary {
    fn from(playlist: &Metadata) -> Self {
        Self {
            key: playlist.key.clone().unwrap_or_default(),
            title: playlist.title.clone().unwrap_or_default(),
            playlist_type: playlist.playlist_type.clone().unwrap_or_default(),
            item_count: playlist.leaf_count.unwrap_or(0),
        }
    }
}

/// Result of a playlist creation attempt.
///
/// Success carries the created playlist's identity; failure carries a
/// reason so callers are not limited to a bare boolean.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PlaylistOutcome {
    pub fn created(playlist: &Metadata) -> Self {
        Self {
            success: true,
            key: playlist.key.clone(),
            title: playlist.title.clone(),
            item_count: Some(playlist.leaf_count.unwrap_or(0)),
            error: None,
        }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            success: false,
            key: None,
            title: None,
            item_count: None,
            error: Some(reason.into()),
        }
    }
}

fn truncate_chars(text: &str) -> String {
    text.chars().take(SUMMARY_MAX_CHARS).collect()
}
