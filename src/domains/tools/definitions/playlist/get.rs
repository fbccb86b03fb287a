//! Get playlist tool.
//!
//! Fetches a playlist's metadata and, optionally, a listing of its first tracks.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};

use super::common::{
    MAX_PAGE_SIZE, TrackSummary, clamp_limit, decode_html_entities, failure_result,
    format_track_line, parse_playlist_id, structured_result, yes_no,
};
use crate::domains::spotify::SpotifyApi;
use crate::domains::spotify::model::Playlist;
use crate::domains::tools::ToolError;

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the get playlist tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetPlaylistParams {
    /// Playlist ID, `spotify:playlist:` URI or open.spotify.com link.
    #[schemars(description = "Playlist ID, Spotify URI or open.spotify.com URL")]
    pub playlist_id: String,

    /// Append a listing of the first tracks.
    #[serde(default)]
    #[schemars(description = "Include a listing of the playlist's first tracks (default: false)")]
    pub include_tracks: bool,

    /// How many tracks to list when `include_tracks` is set.
    #[serde(default = "default_track_limit")]
    #[schemars(description = "Number of tracks to list (default: 10, max: 50)")]
    pub track_limit: u32,
}

fn default_track_limit() -> u32 {
    10
}

// ============================================================================
// Structured Output
// ============================================================================

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct PlaylistSummary {
    pub id: String,
    pub name: String,
    pub owner: String,
    pub description: Option<String>,
    pub public: Option<bool>,
    pub collaborative: bool,
    pub followers: Option<u64>,
    pub total_tracks: u32,
    pub snapshot_id: String,
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracks: Option<Vec<TrackSummary>>,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Get playlist tool - renders playlist metadata.
pub struct GetPlaylistTool;

impl GetPlaylistTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_playlist";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get details of a Spotify playlist: name, owner, description, visibility, \
         collaborative flag, follower count, track count and snapshot ID. \
         Optionally lists the first tracks.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(playlist_id = %params.playlist_id))]
    pub async fn execute(params: &GetPlaylistParams, api: &dyn SpotifyApi) -> CallToolResult {
        info!("Get playlist tool called for: {}", params.playlist_id);

        match Self::run(params, api).await {
            Ok(result) => result,
            Err(e) => failure_result("get playlist", &e),
        }
    }

    async fn run(
        params: &GetPlaylistParams,
        api: &dyn SpotifyApi,
    ) -> Result<CallToolResult, ToolError> {
        let playlist_id = parse_playlist_id(&params.playlist_id)?;
        let playlist = api.get_playlist(&playlist_id).await?;

        let track_limit = params
            .include_tracks
            .then(|| clamp_limit(params.track_limit, MAX_PAGE_SIZE));

        let summary = Self::format_playlist(&playlist, track_limit);
        let tracks = track_limit.map(|limit| {
            playlist
                .tracks
                .items
                .iter()
                .take(limit as usize)
                .zip(0u32..)
                .map(|(item, position)| TrackSummary::from_item(position, item))
                .collect()
        });

        info!(
            "Fetched playlist '{}' ({} tracks)",
            playlist.name, playlist.tracks.total
        );

        let data = PlaylistSummary {
            id: playlist.id.clone(),
            name: playlist.name.clone(),
            owner: playlist.owner.label().to_string(),
            description: Self::description(&playlist),
            public: playlist.public,
            collaborative: playlist.collaborative,
            followers: playlist.followers.as_ref().map(|f| f.total),
            total_tracks: playlist.tracks.total,
            snapshot_id: playlist.snapshot_id.clone(),
            url: playlist.external_urls.spotify.clone(),
            tracks,
        };

        Ok(structured_result(summary, data))
    }

    fn description(playlist: &Playlist) -> Option<String> {
        playlist
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(decode_html_entities)
    }

    /// Render the playlist as text. `track_limit` enables the track listing.
    pub fn format_playlist(playlist: &Playlist, track_limit: Option<u32>) -> String {
        let visibility = match playlist.public {
            Some(true) => "Public",
            Some(false) => "Private",
            None => "Unknown",
        };

        let mut lines = vec![
            format!("Playlist: {}", playlist.name),
            format!("ID: {}", playlist.id),
            format!("Owner: {}", playlist.owner.label()),
            format!(
                "Description: {}",
                Self::description(playlist).unwrap_or_else(|| "(none)".to_string())
            ),
            format!("Visibility: {}", visibility),
            format!("Collaborative: {}", yes_no(playlist.collaborative)),
        ];
        if let Some(followers) = &playlist.followers {
            lines.push(format!("Followers: {}", followers.total));
        }
        lines.push(format!("Total tracks: {}", playlist.tracks.total));
        lines.push(format!("Snapshot ID: {}", playlist.snapshot_id));
        if let Some(url) = &playlist.external_urls.spotify {
            lines.push(format!("URL: {}", url));
        }

        if let Some(limit) = track_limit {
            let items = &playlist.tracks.items;
            lines.push(String::new());
            if items.is_empty() {
                if playlist.tracks.total == 0 {
                    lines.push("This playlist has no tracks.".to_string());
                } else {
                    lines.push("Track details were not included in the response.".to_string());
                }
            } else {
                let shown = items.len().min(limit as usize);
                lines.push(format!(
                    "Tracks (showing {} of {}):",
                    shown, playlist.tracks.total
                ));
                lines.extend(
                    items
                        .iter()
                        .take(shown)
                        .zip(1u32..)
                        .map(|(item, position)| format_track_line(position, item)),
                );
            }
        }

        lines.join("\n")
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        api: Arc<dyn SpotifyApi>,
    ) -> Result<serde_json::Value, ToolError> {
        let params: GetPlaylistParams = super::common::parse_http_params(arguments)?;
        let result = Self::execute(&params, api.as_ref()).await;
        Ok(super::common::to_http_response(result))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<GetPlaylistParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: Some("Get Playlist".into()),
        }
    }

    /// Create a ToolRoute for STDIO transport.
    pub fn create_route<S>(api: Arc<dyn SpotifyApi>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let api = api.clone();
            async move {
                let params: GetPlaylistParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, api.as_ref()).await)
            }
            .boxed()
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
