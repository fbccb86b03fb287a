//! Add tracks tool.

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
use crate::domains::spotify::model::TrackAddition;
use crate::domains::tools::ToolError;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AddTracksParams {
    #[schemars(description = "Playlist ID, Spotify URI or open.spotify.com URL")]
    pub playlist_id: String,

    #[schemars(description = "Tracks to add (IDs, spotify:track: URIs or URLs), 1 to 100")]
    pub track_ids: Vec<String>,

    #[serde(default)]
    #[schemars(description = "0-based position to insert at (default: append to the end)")]
    pub position: Option<u32>,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct AddTracksResult {
    pub playlist_id: String,
    pub added_uris: Vec<String>,
    pub position: Option<u32>,
    pub snapshot_id: String,
}

/// Add tracks tool.
pub struct AddTracksTool;

impl AddTracksTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "add_tracks_to_playlist";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Add up to 100 tracks to a Spotify playlist, appended or inserted at a \
         0-based position. Returns the new snapshot ID.";

    #[instrument(skip_all, fields(playlist_id = %params.playlist_id, count = params.track_ids.len()))]
    pub async fn execute(params: &AddTracksParams, api: &dyn SpotifyApi) -> CallToolResult {
        info!(
            "Add tracks tool called for: {} ({} tracks)",
            params.playlist_id,
            params.track_ids.len()
        );

        match Self::run(params, api).await {
            Ok(result) => result,
            Err(e) => failure_result("add tracks", &e),
        }
    }

    async fn run(
        params: &AddTracksParams,
        api: &dyn SpotifyApi,
    ) -> Result<CallToolResult, ToolError> {
        let playlist_id = parse_playlist_id(&params.playlist_id)?;
        // Duplicates are kept: adding a track twice is a legitimate request.
        let uris = parse_track_uris(&params.track_ids, false)?;

        let addition = TrackAddition {
            uris,
            position: params.position,
        };
        let snapshot = api.add_tracks(&playlist_id, &addition).await?;

        let placement = match addition.position {
            Some(position) => format!("at position {}", position),
            None => "at the end".to_string(),
        };
        let summary = format!(
            "Added {} track(s) to playlist {} {}. New snapshot ID: {}",
            addition.uris.len(),
            playlist_id,
            placement,
            snapshot.snapshot_id
        );
        info!("{}", summary);

        let data = AddTracksResult {
            playlist_id,
            added_uris: addition.uris,
            position: addition.position,
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
        let params: AddTracksParams = super::common::parse_http_params(arguments)?;
        let result = Self::execute(&params, api.as_ref()).await;
        Ok(super::common::to_http_response(result))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<AddTracksParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: Some("Add Tracks to Playlist".into()),
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
                let params: AddTracksParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, api.as_ref()).await)
            }
            .boxed()
        })
    }
}
