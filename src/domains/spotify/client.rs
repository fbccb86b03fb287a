//! reqwest-backed Spotify Web API client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use super::api::SpotifyApi;
use super::error::{ApiErrorBody, SpotifyError, SpotifyResult};
use super::model::{
    Page, Playlist, PlaylistDetailsUpdate, PlaylistTrackItem, SnapshotResponse, TrackAddition,
    TrackRemoval, TrackReorder,
};
use crate::core::config::SpotifyConfig;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Client for the playlist endpoints, authenticated with a bearer token.
#[derive(Clone)]
pub struct SpotifyClient {
    http: reqwest::Client,
    base_url: String,
    access_token: Option<String>,
}

impl SpotifyClient {
    /// Create a client from configuration.
    pub fn new(config: &SpotifyConfig) -> SpotifyResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            access_token: config.access_token.clone(),
        })
    }

    fn request(&self, method: Method, path: &str) -> SpotifyResult<RequestBuilder> {
        let token = self
            .access_token
            .as_deref()
            .ok_or(SpotifyError::MissingToken)?;
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);
        Ok(self.http.request(method, url).bearer_auth(token))
    }

    /// Send a request and turn non-success statuses into typed errors.
    async fn send(&self, request: RequestBuilder) -> SpotifyResult<Response> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        Err(Self::error_from_response(status, response).await)
    }

    async fn error_from_response(status: StatusCode, response: Response) -> SpotifyError {
        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse().ok());

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&body)
            .map(|b| b.error.message)
            .ok()
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unexpected status")
                    .to_string()
            });

        warn!("Spotify API returned {}: {}", status, message);
        SpotifyError::from_status(status.as_u16(), message, retry_after)
    }

    async fn json<T: DeserializeOwned>(response: Response) -> SpotifyResult<T> {
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| SpotifyError::Decode(e.to_string()))
    }
}

#[async_trait]
impl SpotifyApi for SpotifyClient {
    #[instrument(skip(self))]
    async fn get_playlist(&self, playlist_id: &str) -> SpotifyResult<Playlist> {
        let request = self.request(Method::GET, &format!("/playlists/{playlist_id}"))?;
        let response = self.send(request).await?;
        Self::json(response).await
    }

    #[instrument(skip(self, update))]
    async fn update_playlist_details(
        &self,
        playlist_id: &str,
        update: &PlaylistDetailsUpdate,
    ) -> SpotifyResult<()> {
        let request = self
            .request(Method::PUT, &format!("/playlists/{playlist_id}"))?
            .json(update);
        self.send(request).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_playlist_tracks(
        &self,
        playlist_id: &str,
        limit: u32,
        offset: u32,
    ) -> SpotifyResult<Page<PlaylistTrackItem>> {
        let request = self
            .request(Method::GET, &format!("/playlists/{playlist_id}/tracks"))?
            .query(&[("limit", limit), ("offset", offset)]);
        let response = self.send(request).await?;
        Self::json(response).await
    }

    #[instrument(skip(self, addition), fields(count = addition.uris.len()))]
    async fn add_tracks(
        &self,
        playlist_id: &str,
        addition: &TrackAddition,
    ) -> SpotifyResult<SnapshotResponse> {
        let request = self
            .request(Method::POST, &format!("/playlists/{playlist_id}/tracks"))?
            .json(addition);
        let response = self.send(request).await?;
        Self::json(response).await
    }

    #[instrument(skip(self, removal), fields(count = removal.tracks.len()))]
    async fn remove_tracks(
        &self,
        playlist_id: &str,
        removal: &TrackRemoval,
    ) -> SpotifyResult<SnapshotResponse> {
        let request = self
            .request(Method::DELETE, &format!("/playlists/{playlist_id}/tracks"))?
            .json(removal);
        let response = self.send(request).await?;
        Self::json(response).await
    }

    #[instrument(skip(self, reorder))]
    async fn reorder_tracks(
        &self,
        playlist_id: &str,
        reorder: &TrackReorder,
    ) -> SpotifyResult<SnapshotResponse> {
        let request = self
            .request(Method::PUT, &format!("/playlists/{playlist_id}/tracks"))?
            .json(reorder);
        let response = self.send(request).await?;
        Self::json(response).await
    }
}
