//! Imgur album client
//!
//! # API Reference
//! - Album images: `GET https://api.imgur.com/3/album/{hash}/images`
//! - Gallery album: `GET https://api.imgur.com/3/gallery/album/{id}`
//! - Auth: `Authorization: Client-ID <client id>` (anonymous, read-only)
//!
//! Every response is wrapped as `{ "data": ..., "success": bool, "status": u16 }`.

use super::{request_error, AlbumSource, SourceError};
use crate::types::TaggedImage;
use async_trait::async_trait;
use reqwest::{header, Client};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Imgur API base URL
const IMGUR_API_URL: &str = "https://api.imgur.com/3";

/// Default timeout for Imgur API requests
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

const USER_AGENT: &str = "biketag/0.1.0";

/// Response envelope
#[derive(Debug, Deserialize)]
struct ImgurEnvelope {
    #[serde(default)]
    data: serde_json::Value,
    #[serde(default)]
    success: bool,
    #[serde(default)]
    status: u16,
}

/// Gallery album payload
#[derive(Debug, Deserialize)]
struct ImgurGalleryAlbum {
    #[serde(default)]
    images: Vec<TaggedImage>,
}

/// Imgur client
pub struct ImgurClient {
    http_client: Client,
    client_id: String,
    base_url: String,
}

impl ImgurClient {
    /// Create a client authenticating with `client_id`
    pub fn new(client_id: impl Into<String>) -> Result<Self, SourceError> {
        let http_client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| SourceError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            client_id: client_id.into(),
            base_url: IMGUR_API_URL.to_string(),
        })
    }

    /// Point the client at another API root
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, SourceError> {
        let url = format!("{}/{}", self.base_url, path);
        debug!(url = %url, "Querying Imgur");

        let response = self
            .http_client
            .get(&url)
            .header(header::AUTHORIZATION, format!("Client-ID {}", self.client_id))
            .send()
            .await
            .map_err(|e| request_error("Imgur", e))?;

        let status = response.status();
        if status.as_u16() == 404 {
            return Err(SourceError::NotAvailable(format!("Imgur resource not found: {}", path)));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Api(status.as_u16(), body));
        }

        let body = response.text().await.map_err(|e| request_error("Imgur", e))?;
        decode_envelope(&body)
    }
}

/// Unwrap `data` from an Imgur response body
fn decode_envelope<T: DeserializeOwned>(body: &str) -> Result<T, SourceError> {
    let envelope: ImgurEnvelope = serde_json::from_str(body)
        .map_err(|e| SourceError::Parse(format!("Failed to parse Imgur response: {}", e)))?;

    if !envelope.success {
        let message = envelope
            .data
            .get("error")
            .map(|error| error.to_string())
            .unwrap_or_else(|| "request unsuccessful".to_string());
        return Err(SourceError::Api(envelope.status, message));
    }

    serde_json::from_value(envelope.data)
        .map_err(|e| SourceError::Parse(format!("Unexpected Imgur payload: {}", e)))
}

#[async_trait]
impl AlbumSource for ImgurClient {
    fn source_key(&self) -> &str {
        &self.client_id
    }

    async fn album_images(&self, album_hash: &str) -> Result<Vec<TaggedImage>, SourceError> {
        let images: Vec<TaggedImage> = self.get(&format!("album/{}/images", album_hash)).await?;
        debug!(album_hash = %album_hash, count = images.len(), "Imgur album loaded");
        Ok(images)
    }

    async fn gallery_images(&self, gallery_id: &str) -> Result<Vec<TaggedImage>, SourceError> {
        let gallery: ImgurGalleryAlbum =
            self.get(&format!("gallery/album/{}", gallery_id)).await?;
        debug!(gallery_id = %gallery_id, count = gallery.images.len(), "Imgur gallery loaded");
        Ok(gallery.images)
    }
}
