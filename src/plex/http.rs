//! reqwest implementation of the Plex backend
//!
//! One HTTP call per trait method. Authentication is the X-Plex-Token
//! header; responses are requested as JSON and decoded through the
//! `MediaContainer` envelope. No retries, no timeout tuning beyond the
//! client defaults.

use crate::config::PlexConfig;
use crate::error::{PlexError, Result};
use crate::plex::backend::{media_type_code, PlexBackend};
use crate::plex::wire::{Directory, Envelope, MediaContainer, Metadata};
use async_trait::async_trait;
use reqwest::{Method, Response, StatusCode};
use tracing::debug;

/// Plex's client identifier for playback-state endpoints
const LIBRARY_IDENTIFIER: &str = "com.plexapp.plugins.library";

/// HTTP backend talking to a live Plex server
pub struct HttpBackend {
    base_url: String,
    token: String,
    client: reqwest::Client,
}

impl HttpBackend {
    /// Create a backend from the connection config.
    pub fn new(config: &PlexConfig) -> Self {
        Self {
            base_url: config.url.clone(),
            token: config.token.clone(),
            client: reqwest::Client::new(),
        }
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Response> {
        debug!("{} {}", method, path);

        let response = self
            .client
            .request(method, format!("{}{}", self.base_url, path))
            .header("X-Plex-Token", &self.token)
            .header("Accept", "application/json")
            .query(query)
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => Ok(response),
            StatusCode::UNAUTHORIZED => Err(PlexError::Unauthorized),
            StatusCode::NOT_FOUND => Err(PlexError::NotFound(path.to_string())),
            status => Err(PlexError::Api {
                status: status.as_u16(),
                path: path.to_string(),
            }),
        }
    }

    async fn get_container(&self, path: &str, query: &[(&str, String)]) -> Result<MediaContainer> {
        let response = self.request(Method::GET, path, query).await?;
        let envelope: Envelope = response.json().await?;
        Ok(envelope.media_container)
    }

    /// Fire a state-changing request and discard the body.
    async fn command(&self, method: Method, path: &str, query: &[(&str, String)]) -> Result<()> {
        self.request(method, path, query).await?;
        Ok(())
    }
}

#[async_trait]
impl PlexBackend for HttpBackend {
    async fn server_identity(&self) -> Result<MediaContainer> {
        self.get_container("/", &[]).await
    }

    async fn sections(&self) -> Result<Vec<Directory>> {
        let container = self.get_container("/library/sections", &[]).await?;
        Ok(container.directories)
    }

    async fn section_size(&self, section_key: &str) -> Result<u64> {
        // A zero-sized page still reports the total item count
        let path = format!("/library/sections/{}/all", section_key);
        let container = self
            .get_container(
                &path,
                &[
                    ("X-Plex-Container-Start", "0".to_string()),
                    ("X-Plex-Container-Size", "0".to_string()),
                ],
            )
            .await?;
        Ok(container.total_size.or(container.size).unwrap_or(0))
    }

    async fn search(&self, query: &str) -> Result<Vec<Metadata>> {
        let container = self
            .get_container("/search", &[("query", query.to_string())])
            .await?;
        Ok(container.metadata)
    }

    async fn section_search(
        &self,
        section_key: &str,
        title: &str,
        type_code: Option<u32>,
    ) -> Result<Vec<Metadata>> {
        let path = format!("/library/sections/{}/all", section_key);
        let mut query = vec![("title", title.to_string())];
        if let Some(code) = type_code {
            query.push(("type", code.to_string()));
        }

        let container = self.get_container(&path, &query).await?;
        Ok(container.metadata)
    }

    async fn fetch_item(&self, rating_key: &str) -> Result<Metadata> {
        let path = format!("/library/metadata/{}", rating_key);
        let container = self.get_container(&path, &[]).await?;
        container
            .metadata
            .into_iter()
            .next()
            .ok_or_else(|| PlexError::NotFound(path))
    }

    async fn sessions(&self) -> Result<Vec<Metadata>> {
        let container = self.get_container("/status/sessions", &[]).await?;
        Ok(container.metadata)
    }

    async fn playlists(&self) -> Result<Vec<Metadata>> {
        let container = self.get_container("/playlists", &[]).await?;
        Ok(container.metadata)
    }

    async fn create_playlist(&self, title: &str, rating_keys: &[String]) -> Result<Metadata> {
        if rating_keys.is_empty() {
            return Err(PlexError::InvalidOperation(
                "playlist needs at least one item".to_string(),
            ));
        }

        // Playlist items are addressed through the server's own identifier
        let identity = self.server_identity().await?;
        let machine = identity.machine_identifier.unwrap_or_default();
        let uri = format!(
            "server://{}/{}/library/metadata/{}",
            machine,
            LIBRARY_IDENTIFIER,
            rating_keys.join(",")
        );

        let response = self
            .request(
                Method::POST,
                "/playlists",
                &[
                    ("type", "video".to_string()),
                    ("title", title.to_string()),
                    ("smart", "0".to_string()),
                    ("uri", uri),
                ],
            )
            .await?;

        let envelope: Envelope = response.json().await?;
        envelope
            .media_container
            .metadata
            .into_iter()
            .next()
            .ok_or_else(|| PlexError::Other("playlist creation returned no metadata".to_string()))
    }

    async fn scrobble(&self, rating_key: &str) -> Result<()> {
        self.command(
            Method::GET,
            "/:/scrobble",
            &[
                ("key", rating_key.to_string()),
                ("identifier", LIBRARY_IDENTIFIER.to_string()),
            ],
        )
        .await
    }

    async fn unscrobble(&self, rating_key: &str) -> Result<()> {
        self.command(
            Method::GET,
            "/:/unscrobble",
            &[
                ("key", rating_key.to_string()),
                ("identifier", LIBRARY_IDENTIFIER.to_string()),
            ],
        )
        .await
    }

    async fn edit_collection(
        &self,
        item: &Metadata,
        collection: &str,
        remove: bool,
    ) -> Result<()> {
        let section_id = item.library_section_id.ok_or_else(|| {
            PlexError::InvalidOperation("item has no library section".to_string())
        })?;
        let rating_key = item
            .rating_key
            .clone()
            .ok_or_else(|| PlexError::InvalidOperation("item has no rating key".to_string()))?;
        let type_code = item
            .kind
            .as_deref()
            .and_then(media_type_code)
            .ok_or_else(|| {
                PlexError::InvalidOperation("item type does not support collections".to_string())
            })?;

        let path = format!("/library/sections/{}/all", section_id);
        let tag_field = if remove {
            "collection[].tag.tag-"
        } else {
            "collection[0].tag.tag"
        };

        self.command(
            Method::PUT,
            &path,
            &[
                ("type", type_code.to_string()),
                ("id", rating_key),
                ("collection.locked", "1".to_string()),
                (tag_field, collection.to_string()),
            ],
        )
        .await
    }
}
