//! Recording in-memory `SpotifyApi` used by tool tests.

use std::sync::Mutex;

use async_trait::async_trait;

use super::api::SpotifyApi;
use super::error::{SpotifyError, SpotifyResult};
use super::model::{
    AlbumRef, ArtistRef, ExternalUrls, Followers, Page, Playlist, PlaylistDetailsUpdate,
    PlaylistOwner, PlaylistTrackItem, PlaylistTracks, SnapshotResponse, Track, TrackAddition,
    TrackRemoval, TrackReorder,
};

/// A call received by the mock, with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    GetPlaylist(String),
    UpdateDetails(String, PlaylistDetailsUpdate),
    GetTracks { playlist_id: String, limit: u32, offset: u32 },
    Add(String, TrackAddition),
    Remove(String, TrackRemoval),
    Reorder(String, TrackReorder),
}

pub struct MockSpotify {
    playlist: Playlist,
    failure: Option<(u16, String)>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockSpotify {
    /// A mock serving [`sample_playlist`].
    pub fn new() -> Self {
        Self::with_playlist(sample_playlist())
    }

    pub fn with_playlist(playlist: Playlist) -> Self {
        Self {
            playlist,
            failure: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// A mock whose every call fails with the given HTTP status.
    pub fn failing(status: u16, message: &str) -> Self {
        Self {
            failure: Some((status, message.to_string())),
            ..Self::new()
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: RecordedCall) -> SpotifyResult<()> {
        self.calls.lock().unwrap().push(call);
        match &self.failure {
            Some((status, message)) => Err(SpotifyError::from_status(*status, message, None)),
            None => Ok(()),
        }
    }

    fn snapshot() -> SnapshotResponse {
        SnapshotResponse {
            snapshot_id: "snapshot-new".to_string(),
        }
    }
}

#[async_trait]
impl SpotifyApi for MockSpotify {
    async fn get_playlist(&self, playlist_id: &str) -> SpotifyResult<Playlist> {
        self.record(RecordedCall::GetPlaylist(playlist_id.to_string()))?;
        Ok(self.playlist.clone())
    }

    async fn update_playlist_details(
        &self,
        playlist_id: &str,
        update: &PlaylistDetailsUpdate,
    ) -> SpotifyResult<()> {
        self.record(RecordedCall::UpdateDetails(
            playlist_id.to_string(),
            update.clone(),
        ))
    }

    async fn get_playlist_tracks(
        &self,
        playlist_id: &str,
        limit: u32,
        offset: u32,
    ) -> SpotifyResult<Page<PlaylistTrackItem>> {
        self.record(RecordedCall::GetTracks {
            playlist_id: playlist_id.to_string(),
            limit,
            offset,
        })?;
        let items: Vec<_> = self
            .playlist
            .tracks
            .items
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect();
        Ok(Page {
            items,
            total: self.playlist.tracks.total,
            limit,
            offset,
            next: None,
        })
    }

    async fn add_tracks(
        &self,
        playlist_id: &str,
        addition: &TrackAddition,
    ) -> SpotifyResult<SnapshotResponse> {
        self.record(RecordedCall::Add(playlist_id.to_string(), addition.clone()))?;
        Ok(Self::snapshot())
    }

    async fn remove_tracks(
        &self,
        playlist_id: &str,
        removal: &TrackRemoval,
    ) -> SpotifyResult<SnapshotResponse> {
        self.record(RecordedCall::Remove(playlist_id.to_string(), removal.clone()))?;
        Ok(Self::snapshot())
    }

    async fn reorder_tracks(
        &self,
        playlist_id: &str,
        reorder: &TrackReorder,
    ) -> SpotifyResult<SnapshotResponse> {
        self.record(RecordedCall::Reorder(playlist_id.to_string(), reorder.clone()))?;
        Ok(Self::snapshot())
    }
}

pub fn sample_track(id: &str, name: &str, artist: &str, duration_ms: u64) -> Track {
    Track {
        id: Some(id.to_string()),
        name: name.to_string(),
        uri: format!("spotify:track:{id}"),
        artists: vec![ArtistRef {
            name: artist.to_string(),
        }],
        album: Some(AlbumRef {
            name: "Sample Album".to_string(),
        }),
        duration_ms,
        is_local: false,
    }
}

/// Three tracks, the last one unavailable.
pub fn sample_playlist() -> Playlist {
    let items = vec![
        PlaylistTrackItem {
            added_at: None,
            track: Some(sample_track("t1", "Intro", "The Openers", 185_000)),
        },
        PlaylistTrackItem {
            added_at: None,
            track: Some(sample_track("t2", "Middle Eight", "Bridge &amp; Co", 61_000)),
        },
        PlaylistTrackItem {
            added_at: None,
            track: None,
        },
    ];

    Playlist {
        id: "pl1".to_string(),
        name: "Morning Mix".to_string(),
        description: Some("Songs for early &amp; bright starts".to_string()),
        public: Some(true),
        collaborative: false,
        owner: PlaylistOwner {
            id: "user1".to_string(),
            display_name: Some("Ada".to_string()),
        },
        followers: Some(Followers { total: 42 }),
        tracks: PlaylistTracks { total: 3, items },
        external_urls: ExternalUrls {
            spotify: Some("https://open.spotify.com/playlist/pl1".to_string()),
        },
        snapshot_id: "snapshot-1".to_string(),
    }
}
