//! Common test utilities and helpers
//!
//! A stateful in-memory `FakeBackend` standing in for the Plex server,
//! plus constructors for the client adapter and tool handler under test.

use async_trait::async_trait;
use plex_assistant_core::error::{PlexError, Result};
use plex_assistant_core::plex::backend::media_type_code;
use plex_assistant_core::plex::wire::{Directory, MediaContainer, Metadata};
use plex_assistant_core::{PlexBackend, PlexClient, ToolHandler};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

/// Mutable server-side state observed and mutated by the fake
#[derive(Default)]
pub struct FakeState {
    pub sections: Vec<Directory>,
    pub section_counts: HashMap<String, u64>,
    pub items: Vec<Metadata>,
    pub sessions: Vec<Metadata>,
    pub playlists: Vec<Metadata>,
    /// rating key -> collection names
    pub collections: HashMap<String, HashSet<String>>,
    /// When set, every call fails as if the network were down
    pub fail_all: bool,
}

/// In-memory Plex server double
pub struct FakeBackend {
    pub state: Mutex<FakeState>,
}

impl FakeBackend {
    pub fn new(state: FakeState) -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(state),
        })
    }

    /// A backend where every remote call fails.
    pub fn unreachable() -> Arc<Self> {
        Self::new(FakeState {
            fail_all: true,
            ..Default::default()
        })
    }

    pub fn collections_of(&self, rating_key: &str) -> HashSet<String> {
        self.state
            .lock()
            .unwrap()
            .collections
            .get(rating_key)
            .cloned()
            .unwrap_or_default()
    }

    fn check_up(&self) -> Result<()> {
        if self.state.lock().unwrap().fail_all {
            return Err(PlexError::Other("network down".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl PlexBackend for FakeBackend {
    async fn server_identity(&self) -> Result<MediaContainer> {
        self.check_up()?;
        Ok(MediaContainer {
            friendly_name: Some("Test Server".to_string()),
            machine_identifier: Some("fake-machine".to_string()),
            version: Some("1.40.0".to_string()),
            platform: Some("Linux".to_string()),
            platform_version: Some("6.1".to_string()),
            ..Default::default()
        })
    }

    async fn sections(&self) -> Result<Vec<Directory>> {
        self.check_up()?;
        Ok(self.state.lock().unwrap().sections.clone())
    }

    async fn section_size(&self, section_key: &str) -> Result<u64> {
        self.check_up()?;
        self.state
            .lock()
            .unwrap()
            .section_counts
            .get(section_key)
            .copied()
            .ok_or_else(|| PlexError::NotFound(section_key.to_string()))
    }

    async fn search(&self, query: &str) -> Result<Vec<Metadata>> {
        self.check_up()?;
        let needle = query.to_lowercase();
        Ok(self
            .state
            .lock()
            .unwrap()
            .items
            .iter()
            .filter(|item| {
                item.title
                    .as_deref()
                    .map(|title| title.to_lowercase().contains(&needle))
                    .unwrap_or(false)
            })
            .cloned()
            .collect())
    }

    async fn section_search(
        &self,
        section_key: &str,
        title: &str,
        type_code: Option<u32>,
    ) -> Result<Vec<Metadata>> {
        self.check_up()?;
        let needle = title.to_lowercase();
        Ok(self
            .state
            .lock()
            .unwrap()
            .items
            .iter()
            .filter(|item| {
                item.library_section_id
                    .map(|id| id.to_string() == section_key)
                    .unwrap_or(false)
            })
            .filter(|item| {
                item.title
                    .as_deref()
                    .map(|t| t.to_lowercase().contains(&needle))
                    .unwrap_or(false)
            })
            .filter(|item| match type_code {
                Some(code) => {
                    item.kind.as_deref().and_then(media_type_code) == Some(code)
                }
                None => true,
            })
            .cloned()
            .collect())
    }

    async fn fetch_item(&self, rating_key: &str) -> Result<Metadata> {
        self.check_up()?;
        self.state
            .lock()
            .unwrap()
            .items
            .iter()
            .find(|item| item.rating_key.as_deref() == Some(rating_key))
            .cloned()
            .ok_or_else(|| PlexError::NotFound(rating_key.to_string()))
    }

    async fn sessions(&self) -> Result<Vec<Metadata>> {
        self.check_up()?;
        Ok(self.state.lock().unwrap().sessions.clone())
    }

    async fn playlists(&self) -> Result<Vec<Metadata>> {
        self.check_up()?;
        Ok(self.state.lock().unwrap().playlists.clone())
    }

    async fn create_playlist(&self, title: &str, rating_keys: &[String]) -> Result<Metadata> {
        self.check_up()?;
        if rating_keys.is_empty() {
            return Err(PlexError::InvalidOperation(
                "playlist needs at least one item".to_string(),
            ));
        }

        let mut state = self.state.lock().unwrap();
        let playlist = Metadata {
            rating_key: Some(format!("900{}", state.playlists.len())),
            key: Some(format!("/playlists/900{}", state.playlists.len())),
            title: Some(title.to_string()),
            playlist_type: Some("video".to_string()),
            leaf_count: Some(rating_keys.len() as u64),
            ..Default::default()
        };
        state.playlists.push(playlist.clone());
        Ok(playlist)
    }

    async fn scrobble(&self, rating_key: &str) -> Result<()> {
        self.check_up()?;
        let mut state = self.state.lock().unwrap();
        let item = state
            .items
            .iter_mut()
            .find(|item| item.rating_key.as_deref() == Some(rating_key))
            .ok_or_else(|| PlexError::NotFound(rating_key.to_string()))?;
        item.view_count = Some(item.view_count.unwrap_or(0) + 1);
        Ok(())
    }

    async fn unscrobble(&self, rating_key: &str) -> Result<()> {
        self.check_up()?;
        let mut state = self.state.lock().unwrap();
        let item = state
            .items
            .iter_mut()
            .find(|item| item.rating_key.as_deref() == Some(rating_key))
            .ok_or_else(|| PlexError::NotFound(rating_key.to_string()))?;
        item.view_count = Some(0);
        Ok(())
    }

    async fn edit_collection(
        &self,
        item: &Metadata,
        collection: &str,
        remove: bool,
    ) -> Result<()> {
        self.check_up()?;
        let rating_key = item
            .rating_key
            .clone()
            .ok_or_else(|| PlexError::InvalidOperation("item has no rating key".to_string()))?;

        let mut state = self.state.lock().unwrap();
        let tags = state.collections.entry(rating_key).or_default();
        if remove {
            tags.remove(collection);
        } else {
            tags.insert(collection.to_string());
        }
        Ok(())
    }
}

/// A movie metadata entry in section 1
pub fn movie(rating_key: &str, title: &str) -> Metadata {
    Metadata {
        rating_key: Some(rating_key.to_string()),
        key: Some(format!("/library/metadata/{}", rating_key)),
        title: Some(title.to_string()),
        kind: Some("movie".to_string()),
        library_section_id: Some(1),
        ..Default::default()
    }
}

/// A small catalog: two sections, three movies, one show, one playlist
pub fn catalog() -> FakeState {
    let mut state = FakeState::default();

    state.sections = vec![
        Directory {
            key: "1".to_string(),
            title: "Movies".to_string(),
            kind: "movie".to_string(),
        },
        Directory {
            key: "2".to_string(),
            title: "TV Shows".to_string(),
            kind: "show".to_string(),
        },
    ];
    state.section_counts.insert("1".to_string(), 3);
    state.section_counts.insert("2".to_string(), 1);

    state.items = vec![
        movie("101", "The Matrix"),
        movie("102", "The Matrix Reloaded"),
        movie("103", "Inception"),
        Metadata {
            rating_key: Some("201".to_string()),
            key: Some("/library/metadata/201".to_string()),
            title: Some("The Matrix Defenders".to_string()),
            kind: Some("show".to_string()),
            library_section_id: Some(2),
            ..Default::default()
        },
    ];

    state.playlists = vec![Metadata {
        rating_key: Some("901".to_string()),
        key: Some("/playlists/901".to_string()),
        title: Some("Friday Night".to_string()),
        playlist_type: Some("video".to_string()),
        leaf_count: Some(2),
        ..Default::default()
    }];

    state
}

pub fn client_over(backend: Arc<FakeBackend>) -> PlexClient {
    PlexClient::new(backend)
}

pub fn handler_over(backend: Arc<FakeBackend>) -> ToolHandler {
    ToolHandler::new(PlexClient::new(backend))
}
