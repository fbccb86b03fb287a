//! The playlist API seam.
//!
//! Tools only ever talk to `dyn SpotifyApi`. The production implementation is
//! [`SpotifyClient`](super::SpotifyClient); tests substitute a recording mock.

use async_trait::async_trait;

use super::error::SpotifyResult;
use super::model::{
    Page, Playlist, PlaylistDetailsUpdate, PlaylistTrackItem, SnapshotResponse, TrackAddition,
    TrackRemoval, TrackReorder,
};

/// Playlist operations offered by the Spotify Web API.
///
/// Every `playlist_id` passed in is a bare, already validated ID.
#[async_trait]
pub trait SpotifyApi: Send + Sync {
    /// Fetch a playlist with its first page of items.
    async fn get_playlist(&self, playlist_id: &str) -> SpotifyResult<Playlist>;

    /// Change name, description, visibility or collaborative flag.
    async fn update_playlist_details(
        &self,
        playlist_id: &str,
        update: &PlaylistDetailsUpdate,
    ) -> SpotifyResult<()>;

    /// Fetch one page of a playlist's items.
    async fn get_playlist_tracks(
        &self,
        playlist_id: &str,
        limit: u32,
        offset: u32,
    ) -> SpotifyResult<Page<PlaylistTrackItem>>;

    /// Insert tracks at a position (or append).
    async fn add_tracks(
        &self,
        playlist_id: &str,
        addition: &TrackAddition,
    ) -> SpotifyResult<SnapshotResponse>;

    /// Remove every occurrence of the given track URIs.
    async fn remove_tracks(
        &self,
        playlist_id: &str,
        removal: &TrackRemoval,
    ) -> SpotifyResult<SnapshotResponse>;

    /// Move a contiguous range of items.
    async fn reorder_tracks(
        &self,
        playlist_id: &str,
        reorder: &TrackReorder,
    ) -> SpotifyResult<SnapshotResponse>;
}
