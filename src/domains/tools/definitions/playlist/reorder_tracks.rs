//! Reorder tracks tool.
//!
//! Moves a contiguous block of playlist items to a new position. Positions are
//! 0-based, as the Web API expects them.

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

use super::common::{failure_result, parse_playlist_id, structured_result};
use crate::domains::spotify::SpotifyApi;
use crate::domains::spotify::model::TrackReorder;
use crate::domains::tools::ToolError;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ReorderTracksParams {
    #[schemars(description = "Playlist ID, Spotify URI or open.spotify.com URL")]
    pub playlist_id: String,

    #[schemars(description = "0-based position of the first track to move")]
    pub range_start: u32,

    #[schemars(description = "0-based position the tracks are moved in front of")]
    pub insert_before: u32,

    #[serde(default = "default_range_length")]
    #[schemars(description = "Number of consecutive tracks to move (default: 1)")]
    pub range_length: u32,

    #[serde(default)]
    #[schemars(description = "Snapshot ID the move applies to (optional)")]
    pub snapshot_id: Option<String>,
}

fn default_range_length() -> u32 {
    1
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct ReorderTracksResult {
    pub playlist_id: String,
    pub range_start: u32,
    pub range_length: u32,
    pub insert_before: u32,
    pub snapshot_id: String,
}

/// Reorder tracks tool.
pub struct ReorderTracksTool;

impl ReorderTracksTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "reorder_playlist_tracks";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Move one or more consecutive tracks within a Spotify playlist. \
         Positions are 0-based: range_start is the first track to move, range_length how many, \
         and insert_before the position they are moved in front of. Returns the new snapshot ID.";

    #[instrument(skip_all, fields(playlist_id = %params.playlist_id))]
    pub async fn execute(params: &ReorderTracksParams, api: &dyn SpotifyApi) -> CallToolResult {
        info!(
            "Reorder tracks tool called for: {} (start={}, length={}, before={})",
            params.playlist_id, params.range_start, params.range_length, params.insert_before
        );

        match Self::run(params, api).await {
            Ok(result) => result,
            Err(e) => failure_result("reorder tracks", &e),
        }
    }

    async fn run(
        params: &ReorderTracksParams,
        api: &dyn SpotifyApi,
    ) -> Result<CallToolResult, ToolError> {
        let playlist_id = parse_playlist_id(&params.playlist_id)?;
        let reorder = Self::build_reorder(params)?;

        let snapshot = api.reorder_tracks(&playlist_id, &reorder).await?;

        let summary = format!(
            "Moved {} track(s) starting at position {} to before position {} in playlist {}. \
             New snapshot ID: {}",
            reorder.range_length,
            reorder.range_start,
            reorder.insert_before,
            playlist_id,
            snapshot.snapshot_id
        );
        info!("{}", summary);

        let data = ReorderTracksResult {
            playlist_id,
            range_start: reorder.range_start,
            range_length: reorder.range_length,
            insert_before: reorder.insert_before,
            snapshot_id: snapshot.snapshot_id,
        };
        Ok(structured_result(summary, data))
    }

    /// Validate the move and build the request body.
    pub fn build_reorder(params: &ReorderTracksParams) -> Result<TrackReorder, ToolError> {
        if params.range_length == 0 {
            return Err(ToolError::invalid_arguments(
                "range_length must be at least 1",
            ));
        }

        let range_end = params.range_start.saturating_add(params.range_length);
        if (params.range_start..=range_end).contains(&params.insert_before) {
            return Err(ToolError::invalid_arguments(format!(
                "moving tracks {}..{} to before position {} leaves the playlist unchanged",
                params.range_start, range_end, params.insert_before
            )));
        }

        Ok(TrackReorder {
            range_start: params.range_start,
            insert_before: params.insert_before,
            range_length: params.range_length,
            snapshot_id: params.snapshot_id.clone().filter(|s| !s.trim().is_empty()),
        })
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        api: Arc<dyn SpotifyApi>,
    ) -> Result<serde_json::Value, ToolError> {
        let params: ReorderTracksParams = super::common::parse_http_params(arguments)?;
        let result = Self::execute(&params, api.as_ref()).await;
        Ok(super::common::to_http_response(result))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<ReorderTracksParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: Some("Reorder Playlist Tracks".into()),
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
                let params: ReorderTracksParams =
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

    fn params(range_start: u32, insert_before: u32, range_length: u32) -> ReorderTracksParams {
        ReorderTracksParams {
            playlist_id: "pl1".to_string(),
            range_start,
            insert_before,
            range_length,
            snapshot_id: None,
        }
    }

    #[tokio::test]
    async fn test_move_track_to_front() {
        let api = MockSpotify::new();
        let result = ReorderTracksTool::execute(&params(2, 0, 1), &api).await;

        assert_eq!(result.is_error, Some(false));
        assert_eq!(
            result_text(&result),
            "Moved 1 track(s) starting at position 2 to before position 0 in playlist pl1. \
             New snapshot ID: snapshot-new"
        );
        assert_eq!(
            api.calls(),
            vec![RecordedCall::Reorder(
                "pl1".to_string(),
                TrackReorder {
                    range_start: 2,
                    insert_before: 0,
                    range_length: 1,
                    snapshot_id: None,
                }
            )]
        );
    }

    #[tokio::test]
    async fn test_move_block_to_end() {
        let api = MockSpotify::new();
        let mut p = params(0, 10, 3);
        p.snapshot_id = Some("snapshot-1".to_string());

        let result = ReorderTracksTool::execute(&p, &api).await;
        assert_eq!(result.is_error, Some(false));

        let structured = result.structured_content.unwrap();
        assert_eq!(structured["range_length"], 3);
        assert_eq!(structured["snapshot_id"], "snapshot-new");
    }

    #[test]
    fn test_zero_length_rejected() {
        let err = ReorderTracksTool::build_reorder(&params(0, 5, 0)).unwrap_err();
        assert!(err.to_string().contains("range_length must be at least 1"));
    }

    #[test]
    fn test_noop_moves_rejected() {
        // Before itself, inside the block, and directly after the block.
        for insert_before in [2, 3, 4] {
            let result = ReorderTracksTool::build_reorder(&params(2, insert_before, 2));
            assert!(
                matches!(result, Err(ToolError::InvalidArguments(_))),
                "insert_before={insert_before} should be rejected"
            );
        }
        assert!(ReorderTracksTool::build_reorder(&params(2, 5, 2)).is_ok());
        assert!(ReorderTracksTool::build_reorder(&params(2, 1, 2)).is_ok());
    }

    #[test]
    fn test_default_range_length() {
        let p: ReorderTracksParams = serde_json::from_value(serde_json::json!({
            "playlist_id": "pl1",
            "range_start": 4,
            "insert_before": 0
        }))
        .unwrap();
        assert_eq!(p.range_length, 1);
    }

    #[test]
    fn test_negative_position_rejected_by_schema_type() {
        let parsed: Result<ReorderTracksParams, _> = serde_json::from_value(serde_json::json!({
            "playlist_id": "pl1",
            "range_start": -1,
            "insert_before": 0
        }));
        assert!(parsed.is_err());
    }

    #[tokio::test]
    async fn test_snapshot_conflict_reported() {
        let api = MockSpotify::failing(400, "Invalid snapshot id");
        let result = ReorderTracksTool::execute(&params(1, 0, 1), &api).await;

        assert_eq!(result.is_error, Some(true));
        assert_eq!(
            result_text(&result),
            "Failed to reorder tracks: Spotify API error (400): Invalid snapshot id"
        );
    }
}
