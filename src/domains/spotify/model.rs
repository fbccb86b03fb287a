//! Request and response shapes for the playlist endpoints of the Spotify Web API.
//!
//! Only the fields the tools render or send are modelled; everything else in
//! the service's JSON is ignored on deserialization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Responses
// ============================================================================

/// A full playlist object (`GET /playlists/{id}`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// `None` when the service does not report the visibility.
    #[serde(default)]
    pub public: Option<bool>,
    #[serde(default)]
    pub collaborative: bool,
    pub owner: PlaylistOwner,
    #[serde(default)]
    pub followers: Option<Followers>,
    pub tracks: PlaylistTracks,
    #[serde(default)]
    pub external_urls: ExternalUrls,
    #[serde(default)]
    pub snapshot_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistOwner {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl PlaylistOwner {
    /// Display name when set, otherwise the user ID.
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Followers {
    pub total: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExternalUrls {
    #[serde(default)]
    pub spotify: Option<String>,
}

/// The embedded first page of a playlist's items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTracks {
    pub total: u32,
    #[serde(default)]
    pub items: Vec<PlaylistTrackItem>,
}

/// One entry of a playlist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTrackItem {
    #[serde(default)]
    pub added_at: Option<DateTime<Utc>>,
    /// Null when the track has been removed from the catalogue.
    #[serde(default)]
    pub track: Option<Track>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    /// Null for local files.
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub uri: String,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
    #[serde(default)]
    pub album: Option<AlbumRef>,
    #[serde(default)]
    pub duration_ms: u64,
    #[serde(default)]
    pub is_local: bool,
}

impl Track {
    /// Comma-separated artist names.
    pub fn artist_names(&self) -> String {
        if self.artists.is_empty() {
            return "Unknown Artist".to_string();
        }
        self.artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistRef {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumRef {
    pub name: String,
}

/// A paging object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u32,
    pub limit: u32,
    pub offset: u32,
    #[serde(default)]
    pub next: Option<String>,
}

/// Returned by every endpoint that mutates a playlist's items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotResponse {
    pub snapshot_id: String,
}

// ============================================================================
// Requests
// ============================================================================

/// Body of `PUT /playlists/{id}`. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlaylistDetailsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collaborative: Option<bool>,
}

impl PlaylistDetailsUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.public.is_none()
            && self.collaborative.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackUri {
    pub uri: String,
}

/// Body of `DELETE /playlists/{id}/tracks`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackRemoval {
    pub tracks: Vec<TrackUri>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot_id: Option<String>,
}

/// Body of `PUT /playlists/{id}/tracks` when reordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackReorder {
    pub range_start: u32,
    pub insert_before: u32,
    pub range_length: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot_id: Option<String>,
}

/// Body of `POST /playlists/{id}/tracks`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackAddition {
    pub uris: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
}
