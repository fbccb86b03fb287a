//! Remove tracks tool.

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

use super::common::{failure_result, parse_playlist_id, parse_track_uris, structured_result};
use crate::domains::spotify::SpotifyApi;
use crate::domains::spotify::model::{TrackRemoval, TrackUri};
use crate::domains::tools::ToolError;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct RemoveTracksParams {
    #[schemars(description = "Playlist ID, Spotify URI or open.spotify.com URL")]
    pub playlist_id: String,

    #[schemars(description = "Tracks to remove (IDs, spotify:track: URIs or URLs), 1 to 100")]
    pub track_ids: Vec<String>,

    #[serde(default)]
    #[schemars(description = "Snapshot ID the removal applies to (optional)")]
    pub snapshot_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct RemoveTracksResult {
    pub playlist_id: String,
    pub removed_uris: Vec<String>,
    pub snapshot_id: String,
}

/// Remove tracks tool - removes every occurrence of the given tracks.
pub struct RemoveTracksTool;

impl RemoveTracksTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "remove_tracks_from_playlist";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Remove tracks from a Spotify playlist. Every occurrence of each track is removed. \
         Accepts up to 100 track IDs, URIs or URLs per call and returns the new snapshot ID.";

    #[instrument(skip_all, fields(playlist_id = %params.playlist_id, count = params.track_ids.len()))]
    pub async fn execute(params: &RemoveTracksParams, api: &dyn SpotifyApi) -> CallToolResult {
        info!(
            "Remove tracks tool called for: {} ({} tracks)",
            params.playlist_id,
            params.track_ids.len()
        );

        match Self::run(params, api).await {
            Ok(result) => result,
            Err(e) => failure_result("remove tracks", &e),
        }
    }

    async fn run(
        params: &RemoveTracksParams,
        api: &dyn SpotifyApi,
    ) -> Result<CallToolResult, ToolError> {
        let playlist_id = parse_playlist_id(&params.playlist_id)?;
        // The service removes all occurrences of a URI, so duplicates add nothing.
        let uris = parse_track_uris(&params.track_ids, true)?;

        let removal = TrackRemoval {
            tracks: uris.iter().map(|uri| TrackUri { uri: uri.clone() }).collect(),
            snapshot_id: params.snapshot_id.clone().filter(|s| !s.trim().is_empty()),
        };
        let snapshot = api.remove_tracks(&playlist_id, &removal).await?;

        let summary = format!(
            "Removed {} track(s) from playlist {}. New snapshot ID: {}",
            uris.len(),
            playlist_id,
            snapshot.snapshot_id
        );
        info!("{}", summary);

        let data = RemoveTracksResult {
            playlist_id,
            removed_uris: uris,
            snapshot_id: snapshot.snapshot_id,
        };
        Ok(structured_result(summary, data))
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        api: Arc<dyn SpotifyApi>,
    ) -> Result<serde_json::Value, ToolError> {
        let params: RemoveTracksParams = super::common::parse_http_params(arguments)?;
        let result = Self::execute(&params, api.as_ref()).await;
        Ok(super::common::to_http_response(result))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<RemoveTracksParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: Some("Remove Tracks from Playlist".into()),
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
                let params: RemoveTracksParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, api.as_ref()).await)
            }
            .boxed()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::spotify::mock::{MockSpotify, RecordedCall};
    use crate::domains::tools::definitions::playlist::common::result_text;

    fn params(track_ids: &[&str]) -> RemoveTracksParams {
        RemoveTracksParams {
            playlist_id: "spotify:playlist:pl1".to_string(),
            track_ids: track_ids.iter().map(|s| s.to_string()).collect(),
            snapshot_id: None,
        }
    }

    #[tokio::test]
    async fn test_remove_tracks() {
        let api = MockSpotify::new();
        let mut p = params(&["t1", "https://open.spotify.com/track/t2", "spotify:track:t1"]);
        p.snapshot_id = Some("snapshot-1".to_string());

        let result = RemoveTracksTool::execute(&p, &api).await;

        assert_eq!(result.is_error, Some(false));
        assert_eq!(
            result_text(&result),
            "Removed 2 track(s) from playlist pl1. New snapshot ID: snapshot-new"
        );
        assert_eq!(
            api.calls(),
            vec![RecordedCall::Remove(
                "pl1".to_string(),
                TrackRemoval {
                    tracks: vec![
                        TrackUri {
                            uri: "spotify:track:t1".to_string()
                        },
                        TrackUri {
                            uri: "spotify:track:t2".to_string()
                        },
                    ],
                    snapshot_id: Some("snapshot-1".to_string()),
                }
            )]
        );
    }

    #[tokio::test]
    async fn test_empty_track_list_rejected() {
        let api = MockSpotify::new();
        let result = RemoveTracksTool::execute(&params(&[]), &api).await;

        assert_eq!(result.is_error, Some(true));
        assert!(result_text(&result).contains("at least one track"));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_track_reference_rejected() {
        let api = MockSpotify::new();
        let result = RemoveTracksTool::execute(&params(&["t1", "not a track!"]), &api).await;

        assert_eq!(result.is_error, Some(true));
        assert!(result_text(&result).contains("not a valid Spotify track reference"));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_expired_token() {
        let api = MockSpotify::failing(401, "The access token expired");
        let result = RemoveTracksTool::execute(&params(&["t1"]), &api).await;

        assert_eq!(
            result_text(&result),
            "Failed to remove tracks: Spotify rejected the access token: The access token expired"
        );
    }

    #[test]
    fn test_params_require_track_ids() {
        let parsed: Result<RemoveTracksParams, _> =
            serde_json::from_value(serde_json::json!({ "playlist_id": "pl1" }));
        assert!(parsed.is_err());
    }
}
